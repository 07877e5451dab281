//! Clipboard capability with a fallback path.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Mutex;

use crate::error::{OutreachError, Result};

/// Somewhere generated text can be copied to.
pub trait Clipboard: Send + Sync {
    fn name(&self) -> &str;

    fn write_text(&self, text: &str) -> Result<()>;
}

/// Which capability ended up holding the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Primary,
    Fallback,
}

/// Try `primary`, and on failure `fallback`.
pub fn copy_with_fallback(text: &str, primary: &dyn Clipboard, fallback: &dyn Clipboard) -> Result<CopyMethod> {
    match primary.write_text(text) {
        Ok(()) => Ok(CopyMethod::Primary),
        Err(e) => {
            log::warn!("{} copy failed, falling back to {}: {}", primary.name(), fallback.name(), e);
            fallback.write_text(text)?;
            Ok(CopyMethod::Fallback)
        }
    }
}

/// Pipes text into a system clipboard utility such as `pbcopy` or `xclip`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Best guess for the current platform
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", vec![])
        } else if cfg!(target_os = "windows") {
            Self::new("clip", vec![])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", vec![])
        } else {
            Self::new("xclip", vec!["-selection".to_string(), "clipboard".to_string()])
        }
    }
}

impl Clipboard for CommandClipboard {
    fn name(&self) -> &str {
        &self.program
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| OutreachError::Clipboard(format!("failed to start {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(OutreachError::Clipboard(format!("{} exited with {}", self.program, status)));
        }
        Ok(())
    }
}

/// Writes the text to a file.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Clipboard for FileClipboard {
    fn name(&self) -> &str {
        "file"
    }

    fn write_text(&self, text: &str) -> Result<()> {
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn name(&self) -> &str {
        "memory"
    }

    fn write_text(&self, text: &str) -> Result<()> {
        *self.contents.lock().unwrap_or_else(|e| e.into_inner()) = Some(text.to_string());
        Ok(())
    }
}

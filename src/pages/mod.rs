//! Page controllers
//!
//! Each page owns its resources and form stores and exposes the actions a
//! front end binds to buttons and inputs. Rendering is left to the caller.

pub mod campaign_form;
pub mod clipboard;
pub mod dashboard;
pub mod lead_form;
pub mod message_generator;

pub use campaign_form::CampaignEditor;
pub use clipboard::{Clipboard, CommandClipboard, CopyMethod, FileClipboard, MemoryClipboard, copy_with_fallback};
pub use dashboard::{Dashboard, DashboardView};
pub use lead_form::LeadEditor;
pub use message_generator::MessageGenerator;

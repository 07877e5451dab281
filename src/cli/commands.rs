//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list/show: read campaigns
//! - create/update/toggle/delete: change campaigns
//! - generate: personalized message from a profile
//! - lead: validate a single lead

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Outreach - campaign management and personalized outreach messages
#[derive(Parser, Debug)]
#[command(name = "outreach")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all campaigns
    List,

    /// Show one campaign
    Show {
        /// Campaign ID
        id: String,
    },

    /// Create a new campaign
    Create {
        #[command(flatten)]
        fields: CampaignArgs,
    },

    /// Update an existing campaign
    Update {
        /// Campaign ID
        id: String,

        #[command(flatten)]
        fields: CampaignArgs,
    },

    /// Toggle a campaign between ACTIVE and INACTIVE
    Toggle {
        /// Campaign ID
        id: String,
    },

    /// Delete a campaign
    Delete {
        /// Campaign ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate a personalized message from a LinkedIn profile
    Generate {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Copy the message to the system clipboard
        #[arg(long)]
        copy: bool,

        /// File to write the message to when the clipboard is unavailable
        #[arg(long)]
        copy_to: Option<PathBuf>,
    },

    /// Validate a lead and print it as JSON
    Lead {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        job_title: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
}

/// Editable campaign fields; omitted flags leave the field unchanged
#[derive(Args, Debug, Clone, Default)]
pub struct CampaignArgs {
    /// Campaign name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Campaign description
    #[arg(short, long)]
    pub description: Option<String>,

    /// ACTIVE or INACTIVE
    #[arg(short, long)]
    pub status: Option<String>,

    /// LinkedIn profile URL (repeatable)
    #[arg(short, long = "lead")]
    pub leads: Vec<String>,

    /// File with one LinkedIn profile URL per line
    #[arg(long)]
    pub leads_file: Option<PathBuf>,

    /// Account ID (repeatable)
    #[arg(short, long = "account")]
    pub accounts: Vec<String>,
}

/// Profile fields; omitted flags keep the prefilled sample values
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub job_title: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub summary: Option<String>,
}

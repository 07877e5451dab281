//! Payload types exchanged with the campaign backend.

pub mod campaign;
pub mod lead;
pub mod profile;

pub use campaign::{Campaign, CampaignFormData, CampaignPatch, CampaignStatus};
pub use lead::Lead;
pub use profile::{GeneratedMessage, LinkedInProfile};

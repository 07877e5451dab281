//! Outreach - campaign management client with resilient async resources
//!
//! Outreach wraps a campaign backend behind async resources that track
//! loading, data and error state, retries transient resource-exhaustion
//! failures with exponential backoff, and drives the campaign, message
//! generator and lead screens through a small form state store.

pub mod api;
pub mod domain;
pub mod error;
pub mod form;
pub mod pages;
pub mod resource;

pub use error::{OutreachError, Result};

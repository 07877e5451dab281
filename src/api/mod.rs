//! Campaign backend layer - REST client and test double
//!
//! This module provides:
//! - `CampaignApi` trait over the campaign and message endpoints
//! - `HttpCampaignApi` implementation backed by reqwest
//! - `MockCampaignApi` in-memory implementation for tests and offline use

pub mod client;
pub mod http;
pub mod mock;

pub use client::{ApiError, CampaignApi};
pub use http::{HttpCampaignApi, HttpConfig};
pub use mock::MockCampaignApi;

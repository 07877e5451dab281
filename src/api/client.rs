//! Core API trait and error definitions

use async_trait::async_trait;
use std::error::Error as StdError;

use crate::domain::{Campaign, CampaignFormData, CampaignPatch, GeneratedMessage, LinkedInProfile};

/// Signature carried by errors caused by local resource exhaustion.
pub const INSUFFICIENT_RESOURCES: &str = "ERR_INSUFFICIENT_RESOURCES";

/// OS error code for "too many open files".
const EMFILE: i32 = 24;

/// Stateless campaign backend - each call is an independent request
#[async_trait]
pub trait CampaignApi: Send + Sync {
    /// GET /campaigns
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiError>;

    /// GET /campaigns/{id}
    async fn get_campaign(&self, id: &str) -> Result<Campaign, ApiError>;

    /// POST /campaigns
    async fn create_campaign(&self, campaign: &CampaignFormData) -> Result<Campaign, ApiError>;

    /// PUT /campaigns/{id}
    async fn update_campaign(&self, id: &str, patch: &CampaignPatch) -> Result<Campaign, ApiError>;

    /// DELETE /campaigns/{id}
    async fn delete_campaign(&self, id: &str) -> Result<(), ApiError>;

    /// POST /personalized-message
    async fn generate_message(&self, profile: &LinkedInProfile) -> Result<GeneratedMessage, ApiError>;
}

/// Errors that can occur talking to the backend
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Campaign not found: {0}")]
    NotFound(String),

    #[error("ERR_INSUFFICIENT_RESOURCES: {0}")]
    InsufficientResources(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Classify a transport-level reqwest failure.
    ///
    /// Exhaustion of local sockets or file descriptors is reported with the
    /// `ERR_INSUFFICIENT_RESOURCES` signature so retry policies can spot it.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if is_resource_exhaustion(&err) {
            return ApiError::InsufficientResources(err.to_string());
        }
        if err.is_decode() {
            return ApiError::InvalidResponse(err.to_string());
        }
        ApiError::Network(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_)) || matches!(self, ApiError::Status { status: 404, .. })
    }
}

fn is_resource_exhaustion(err: &(dyn StdError + 'static)) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = source {
        if let Some(io) = e.downcast_ref::<std::io::Error>()
            && (io.raw_os_error() == Some(EMFILE) || io.kind() == std::io::ErrorKind::OutOfMemory)
        {
            return true;
        }
        source = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapper(std::io::Error);

    impl std::fmt::Display for Wrapper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "connect failed")
        }
    }

    impl StdError for Wrapper {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_insufficient_resources_carries_signature() {
        let err = ApiError::InsufficientResources("too many open files".to_string());
        assert!(err.to_string().starts_with("ERR_INSUFFICIENT_RESOURCES"));
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status 502: bad gateway");
    }

    #[test]
    fn test_is_not_found() {
        assert!(ApiError::NotFound("x".to_string()).is_not_found());
        assert!(
            ApiError::Status {
                status: 404,
                body: String::new()
            }
            .is_not_found()
        );
        assert!(!ApiError::Network("down".to_string()).is_not_found());
    }

    #[test]
    fn test_resource_exhaustion_walks_source_chain() {
        let emfile = Wrapper(std::io::Error::from_raw_os_error(EMFILE));
        assert!(is_resource_exhaustion(&emfile));

        let refused = Wrapper(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"));
        assert!(!is_resource_exhaustion(&refused));
    }
}

//! REST client for the campaign backend
//!
//! Implements `CampaignApi` over plain JSON HTTP with reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::api::client::{ApiError, CampaignApi};
use crate::domain::{Campaign, CampaignFormData, CampaignPatch, GeneratedMessage, LinkedInProfile};

/// Default backend base URL
const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Campaign backend client
pub struct HttpCampaignApi {
    client: Client,
    config: HttpConfig,
}

impl HttpCampaignApi {
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Turn a non-success status into an error, keeping the body for context
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl CampaignApi for HttpCampaignApi {
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        log::debug!("GET /campaigns");
        let response = self
            .client
            .get(self.url("/campaigns"))
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::parse(response).await
    }

    async fn get_campaign(&self, id: &str) -> Result<Campaign, ApiError> {
        log::debug!("GET /campaigns/{}", id);
        let response = self
            .client
            .get(self.url(&format!("/campaigns/{}", id)))
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if response.status().as_u16() == 404 {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Self::parse(response).await
    }

    async fn create_campaign(&self, campaign: &CampaignFormData) -> Result<Campaign, ApiError> {
        log::debug!("POST /campaigns name={}", campaign.name);
        let response = self
            .client
            .post(self.url("/campaigns"))
            .json(campaign)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::parse(response).await
    }

    async fn update_campaign(&self, id: &str, patch: &CampaignPatch) -> Result<Campaign, ApiError> {
        log::debug!("PUT /campaigns/{}", id);
        let response = self
            .client
            .put(self.url(&format!("/campaigns/{}", id)))
            .json(patch)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if response.status().as_u16() == 404 {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Self::parse(response).await
    }

    async fn delete_campaign(&self, id: &str) -> Result<(), ApiError> {
        log::debug!("DELETE /campaigns/{}", id);
        let response = self
            .client
            .delete(self.url(&format!("/campaigns/{}", id)))
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if response.status().as_u16() == 404 {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Self::check_status(response).await?;
        Ok(())
    }

    async fn generate_message(&self, profile: &LinkedInProfile) -> Result<GeneratedMessage, ApiError> {
        log::debug!("POST /personalized-message for {}", profile.name);
        let response = self
            .client
            .post(self.url("/personalized-message"))
            .json(profile)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::parse(response).await
    }
}

impl std::fmt::Debug for HttpCampaignApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCampaignApi")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CampaignStatus;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn campaign_json(id: &str, status: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "name": "Spring push",
            "description": "Q2",
            "status": status,
            "leads": ["https://linkedin.com/in/a"],
            "accountIDs": []
        })
    }

    async fn client_for(server: &MockServer) -> HttpCampaignApi {
        HttpCampaignApi::new(HttpConfig::with_base_url(server.uri())).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = HttpConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = HttpCampaignApi::new(HttpConfig::with_base_url("http://host:5001/")).unwrap();
        assert_eq!(api.url("/campaigns"), "http://host:5001/campaigns");
    }

    #[tokio::test]
    async fn test_list_campaigns() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/campaigns"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([campaign_json("1", "ACTIVE"), campaign_json("2", "INACTIVE")])),
            )
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let campaigns = api.list_campaigns().await.unwrap();
        assert_eq!(campaigns.len(), 2);
        assert!(campaigns[0].is_active());
        assert!(!campaigns[1].is_active());
    }

    #[tokio::test]
    async fn test_get_campaign_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/campaigns/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let err = api.get_campaign("missing").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_update_sends_partial_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/campaigns/1"))
            .and(body_json(json!({"status": "ACTIVE"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(campaign_json("1", "ACTIVE")))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let updated = api
            .update_campaign("1", &CampaignPatch::status(CampaignStatus::Active))
            .await
            .unwrap();
        assert!(updated.is_active());
    }

    #[tokio::test]
    async fn test_create_campaign_posts_form_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/campaigns"))
            .respond_with(ResponseTemplate::new(201).set_body_json(campaign_json("new", "INACTIVE")))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let data = CampaignFormData {
            name: "Spring push".to_string(),
            description: "Q2".to_string(),
            ..Default::default()
        };
        let created = api.create_campaign(&data).await.unwrap();
        assert_eq!(created.id, "new");
    }

    #[tokio::test]
    async fn test_server_error_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/campaigns/1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let err = api.delete_campaign("1").await.unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "database down");
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/personalized-message"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Hi John"})))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let generated = api.generate_message(&LinkedInProfile::default()).await.unwrap();
        assert_eq!(generated.message, "Hi John");
    }

    #[tokio::test]
    async fn test_invalid_json_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/campaigns"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let err = api.list_campaigns().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}

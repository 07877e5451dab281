//! In-memory campaign backend
//!
//! Keeps campaigns in a Vec and lets tests queue failures that the next
//! calls will return instead of touching the store.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::client::{ApiError, CampaignApi};
use crate::domain::{Campaign, CampaignFormData, CampaignPatch, GeneratedMessage, LinkedInProfile};

#[derive(Debug, Default)]
struct MockState {
    campaigns: Vec<Campaign>,
    next_id: u64,
    failures: VecDeque<(Option<String>, ApiError)>,
    calls: Vec<String>,
}

/// Shared in-memory backend; clones observe the same store.
#[derive(Debug, Clone, Default)]
pub struct MockCampaignApi {
    state: Arc<Mutex<MockState>>,
}

impl MockCampaignApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an error returned by the next call, whichever endpoint it hits
    pub fn fail_next(&self, err: ApiError) {
        self.lock().failures.push_back((None, err));
    }

    /// Queue an error for the next call to one endpoint, e.g. `"list"` or `"delete"`
    pub fn fail_next_on(&self, endpoint: &str, err: ApiError) {
        self.lock().failures.push_back((Some(endpoint.to_string()), err));
    }

    /// Endpoint names in call order, e.g. `"list"`, `"update:1"`
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn campaigns(&self) -> Vec<Campaign> {
        self.lock().campaigns.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only means a test panicked mid-call; the data is still usable
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: String) -> Result<std::sync::MutexGuard<'_, MockState>, ApiError> {
        let mut state = self.lock();
        let endpoint = call.split(':').next().unwrap_or_default().to_string();
        state.calls.push(call);
        let position = state
            .failures
            .iter()
            .position(|(target, _)| target.as_deref().is_none_or(|target| target == endpoint));
        match position.and_then(|i| state.failures.remove(i)) {
            Some((_, err)) => Err(err),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl CampaignApi for MockCampaignApi {
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        let state = self.record("list".to_string())?;
        Ok(state.campaigns.clone())
    }

    async fn get_campaign(&self, id: &str) -> Result<Campaign, ApiError> {
        let state = self.record(format!("get:{}", id))?;
        state
            .campaigns
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    async fn create_campaign(&self, campaign: &CampaignFormData) -> Result<Campaign, ApiError> {
        let mut state = self.record("create".to_string())?;
        state.next_id += 1;
        let created = Campaign {
            id: state.next_id.to_string(),
            name: campaign.name.clone(),
            description: campaign.description.clone(),
            status: campaign.status,
            leads: campaign.leads.clone(),
            account_ids: campaign.account_ids.clone(),
            created_at: Some(chrono::Utc::now()),
        };
        state.campaigns.push(created.clone());
        Ok(created)
    }

    async fn update_campaign(&self, id: &str, patch: &CampaignPatch) -> Result<Campaign, ApiError> {
        let mut state = self.record(format!("update:{}", id))?;
        let campaign = state
            .campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        patch.apply(campaign);
        Ok(campaign.clone())
    }

    async fn delete_campaign(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.record(format!("delete:{}", id))?;
        let before = state.campaigns.len();
        state.campaigns.retain(|c| c.id != id);
        if state.campaigns.len() == before {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn generate_message(&self, profile: &LinkedInProfile) -> Result<GeneratedMessage, ApiError> {
        self.record("generate".to_string())?;
        Ok(GeneratedMessage {
            message: format!(
                "Hi {}, I noticed your work as {} at {}. Would love to connect!",
                profile.name, profile.job_title, profile.company
            ),
        })
    }
}

//! Campaign list with status toggling and deletion.

use std::sync::Arc;

use crate::api::CampaignApi;
use crate::domain::{Campaign, CampaignPatch};
use crate::error::Result;
use crate::resource::{AsyncState, Outcome, Resource, RetryPhase, RetryPolicy, RetryingResource};

/// What the dashboard should show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Loading,
    Empty { error: Option<String> },
    Campaigns { campaigns: Vec<Campaign>, error: Option<String> },
}

pub struct Dashboard {
    api: Arc<dyn CampaignApi>,
    campaigns: RetryingResource<(), Vec<Campaign>>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn CampaignApi>, policy: RetryPolicy) -> Self {
        let list_api = Arc::clone(&api);
        let resource = Resource::new(move |_: ()| {
            let api = Arc::clone(&list_api);
            async move { api.list_campaigns().await }
        });

        Self {
            api,
            campaigns: RetryingResource::new(resource, policy),
        }
    }

    /// Fetch the campaign list; transient failures retry in the background
    pub async fn load(&self) -> Outcome<Vec<Campaign>> {
        log::info!("Loading campaigns");
        self.campaigns.execute(()).await
    }

    pub fn state(&self) -> AsyncState<Vec<Campaign>> {
        self.campaigns.state()
    }

    pub fn retry_phase(&self) -> RetryPhase {
        self.campaigns.retry_phase()
    }

    pub fn campaigns(&self) -> Vec<Campaign> {
        self.campaigns.state().data.unwrap_or_default()
    }

    pub fn view(&self) -> DashboardView {
        let state = self.campaigns.state();
        if state.loading {
            return DashboardView::Loading;
        }
        match state.data {
            Some(campaigns) if !campaigns.is_empty() => DashboardView::Campaigns {
                campaigns,
                error: state.error,
            },
            _ => DashboardView::Empty { error: state.error },
        }
    }

    /// Flip ACTIVE/INACTIVE, then refetch the list
    pub async fn toggle_status(&self, campaign: &Campaign) -> Result<Campaign> {
        let status = campaign.status.toggled();
        let updated = match self
            .api
            .update_campaign(&campaign.id, &CampaignPatch::status(status))
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                log::error!("Failed to update campaign status: {}", e);
                return Err(e.into());
            }
        };

        log::info!("Campaign {} is now {}", campaign.id, status);
        self.load().await;
        Ok(updated)
    }

    /// Delete a campaign, then refetch the list
    pub async fn delete(&self, id: &str) -> Result<()> {
        if let Err(e) = self.api.delete_campaign(id).await {
            log::error!("Failed to delete campaign: {}", e);
            return Err(e.into());
        }

        log::info!("Deleted campaign {}", id);
        self.load().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockCampaignApi};
    use crate::domain::{CampaignFormData, CampaignStatus};
    use std::time::Duration;

    async fn seeded() -> (MockCampaignApi, Dashboard) {
        let mock = MockCampaignApi::new();
        for name in ["Alpha", "Beta"] {
            mock.create_campaign(&CampaignFormData {
                name: name.to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        }
        let dashboard = Dashboard::new(Arc::new(mock.clone()), RetryPolicy::default());
        (mock, dashboard)
    }

    #[tokio::test]
    async fn test_initial_view_is_empty() {
        let dashboard = Dashboard::new(Arc::new(MockCampaignApi::new()), RetryPolicy::default());
        assert_eq!(dashboard.view(), DashboardView::Empty { error: None });
    }

    #[tokio::test]
    async fn test_load_lists_campaigns() {
        let (_, dashboard) = seeded().await;
        dashboard.load().await;

        match dashboard.view() {
            DashboardView::Campaigns { campaigns, error } => {
                assert_eq!(campaigns.len(), 2);
                assert!(error.is_none());
            }
            other => panic!("Expected campaigns view, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_toggle_status_refetches() {
        let (mock, dashboard) = seeded().await;
        dashboard.load().await;
        let first = dashboard.campaigns()[0].clone();
        assert_eq!(first.status, CampaignStatus::Inactive);

        let updated = dashboard.toggle_status(&first).await.unwrap();

        assert_eq!(updated.status, CampaignStatus::Active);
        assert!(dashboard.campaigns()[0].is_active());
        assert_eq!(mock.calls().last().map(String::as_str), Some("list"));
    }

    #[tokio::test]
    async fn test_failed_toggle_does_not_refetch() {
        let (mock, dashboard) = seeded().await;
        dashboard.load().await;
        let first = dashboard.campaigns()[0].clone();
        let calls_before = mock.calls().len();

        mock.fail_next(ApiError::Network("down".to_string()));
        assert!(dashboard.toggle_status(&first).await.is_err());

        assert_eq!(mock.calls().len(), calls_before + 1);
        assert!(dashboard.state().error.is_none(), "write failures do not touch the list state");
    }

    #[tokio::test]
    async fn test_delete_refetches() {
        let (_, dashboard) = seeded().await;
        dashboard.load().await;
        let id = dashboard.campaigns()[0].id.clone();

        dashboard.delete(&id).await.unwrap();

        assert_eq!(dashboard.campaigns().len(), 1);
        assert!(dashboard.campaigns().iter().all(|c| c.id != id));
    }

    #[tokio::test]
    async fn test_load_error_shown_with_empty_view() {
        let mock = MockCampaignApi::new();
        mock.fail_next(ApiError::Status {
            status: 500,
            body: "oops".to_string(),
        });
        let dashboard = Dashboard::new(Arc::new(mock), RetryPolicy::default());

        dashboard.load().await;

        assert_eq!(
            dashboard.view(),
            DashboardView::Empty {
                error: Some("Request failed with status 500: oops".to_string())
            }
        );
        assert_eq!(dashboard.retry_phase(), RetryPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_load_failure_recovers() {
        let (mock, dashboard) = seeded().await;
        mock.fail_next(ApiError::InsufficientResources("too many open files".to_string()));

        dashboard.load().await;
        assert!(dashboard.retry_phase().is_scheduled());

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(dashboard.campaigns().len(), 2);
        assert!(dashboard.state().error.is_none());
    }
}

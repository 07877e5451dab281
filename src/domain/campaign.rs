//! Campaign records as stored by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a campaign is currently sending outreach.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    #[default]
    Inactive,
}

impl CampaignStatus {
    /// The opposite status, used by the dashboard toggle.
    pub fn toggled(self) -> Self {
        match self {
            CampaignStatus::Active => CampaignStatus::Inactive,
            CampaignStatus::Inactive => CampaignStatus::Active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(CampaignStatus::Active),
            "INACTIVE" => Ok(CampaignStatus::Inactive),
            other => Err(format!("Unknown campaign status: {}", other)),
        }
    }
}

/// A campaign as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: CampaignStatus,
    /// LinkedIn profile URLs
    #[serde(default)]
    pub leads: Vec<String>,
    #[serde(default, rename = "accountIDs")]
    pub account_ids: Vec<String>,
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Campaign {
    pub fn is_active(&self) -> bool {
        self.status == CampaignStatus::Active
    }

    /// Editable fields of this campaign.
    pub fn form_data(&self) -> CampaignFormData {
        CampaignFormData {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            leads: self.leads.clone(),
            account_ids: self.account_ids.clone(),
        }
    }
}

/// Body of a create request; also the shape of the campaign form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CampaignFormData {
    pub name: String,
    pub description: String,
    pub status: CampaignStatus,
    pub leads: Vec<String>,
    #[serde(rename = "accountIDs")]
    pub account_ids: Vec<String>,
}

/// Partial update body; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CampaignPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leads: Option<Vec<String>>,
    #[serde(rename = "accountIDs", skip_serializing_if = "Option::is_none")]
    pub account_ids: Option<Vec<String>>,
}

impl CampaignPatch {
    pub fn status(status: CampaignStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Apply this patch to an existing campaign.
    pub fn apply(&self, campaign: &mut Campaign) {
        if let Some(name) = &self.name {
            campaign.name = name.clone();
        }
        if let Some(description) = &self.description {
            campaign.description = description.clone();
        }
        if let Some(status) = self.status {
            campaign.status = status;
        }
        if let Some(leads) = &self.leads {
            campaign.leads = leads.clone();
        }
        if let Some(account_ids) = &self.account_ids {
            campaign.account_ids = account_ids.clone();
        }
    }
}

impl From<CampaignFormData> for CampaignPatch {
    fn from(data: CampaignFormData) -> Self {
        Self {
            name: Some(data.name),
            description: Some(data.description),
            status: Some(data.status),
            leads: Some(data.leads),
            account_ids: Some(data.account_ids),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&CampaignStatus::Active).unwrap(), "\"ACTIVE\"");
        assert_eq!(serde_json::to_string(&CampaignStatus::Inactive).unwrap(), "\"INACTIVE\"");
    }

    #[test]
    fn test_status_toggled() {
        assert_eq!(CampaignStatus::Active.toggled(), CampaignStatus::Inactive);
        assert_eq!(CampaignStatus::Inactive.toggled(), CampaignStatus::Active);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("active".parse::<CampaignStatus>(), Ok(CampaignStatus::Active));
        assert_eq!(" INACTIVE ".parse::<CampaignStatus>(), Ok(CampaignStatus::Inactive));
        assert!("paused".parse::<CampaignStatus>().is_err());
    }

    #[test]
    fn test_campaign_wire_names() {
        let json = r#"{
            "_id": "abc",
            "name": "Spring push",
            "description": "Q2 leads",
            "status": "ACTIVE",
            "leads": ["https://linkedin.com/in/a"],
            "accountIDs": ["acc-1"],
            "createdAt": "2024-03-01T12:00:00Z"
        }"#;
        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.id, "abc");
        assert!(campaign.is_active());
        assert_eq!(campaign.account_ids, vec!["acc-1".to_string()]);
        assert!(campaign.created_at.is_some());
    }

    #[test]
    fn test_campaign_missing_optional_fields() {
        let campaign: Campaign = serde_json::from_str(r#"{"_id": "x", "name": "n"}"#).unwrap();
        assert_eq!(campaign.status, CampaignStatus::Inactive);
        assert!(campaign.leads.is_empty());
        assert!(campaign.created_at.is_none());
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = CampaignPatch::status(CampaignStatus::Active);
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({"status": "ACTIVE"}));
    }

    #[test]
    fn test_patch_apply() {
        let mut campaign: Campaign = serde_json::from_str(r#"{"_id": "x", "name": "old"}"#).unwrap();
        let patch = CampaignPatch {
            name: Some("new".to_string()),
            leads: Some(vec!["l".to_string()]),
            ..Default::default()
        };
        patch.apply(&mut campaign);
        assert_eq!(campaign.name, "new");
        assert_eq!(campaign.leads, vec!["l".to_string()]);
        assert_eq!(campaign.status, CampaignStatus::Inactive);
    }
}

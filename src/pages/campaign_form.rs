//! Create/edit form for a single campaign.

use std::sync::Arc;

use crate::api::CampaignApi;
use crate::domain::{Campaign, CampaignFormData, CampaignPatch};
use crate::error::{OutreachError, Result};
use crate::form::{FieldValue, FormStore, SUBMIT_ERROR_KEY, Validator};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch campaign details";

/// Controller behind the campaign form page.
///
/// Without an id it creates a new campaign; with one it loads and updates an
/// existing campaign.
pub struct CampaignEditor {
    api: Arc<dyn CampaignApi>,
    id: Option<String>,
    form: FormStore,
}

impl CampaignEditor {
    pub fn create(api: Arc<dyn CampaignApi>) -> Result<Self> {
        Ok(Self {
            api,
            id: None,
            form: FormStore::from_model(&CampaignFormData::default())?,
        })
    }

    pub fn edit(api: Arc<dyn CampaignApi>, id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: Some(id.into()),
            ..Self::create(api)?
        })
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn form(&self) -> &FormStore {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormStore {
        &mut self.form
    }

    /// Populate the form from the backend when editing
    pub async fn load(&mut self) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        match self.api.get_campaign(&id).await {
            Ok(campaign) => {
                self.form.set_form_model(&campaign.form_data())?;
                self.form.clear_errors();
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to fetch campaign {}: {}", id, e);
                self.form.set_field_error(SUBMIT_ERROR_KEY, FETCH_FAILED_MESSAGE);
                Err(e.into())
            }
        }
    }

    pub fn edit_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.form.handle_field_change(name, value);
    }

    /// One LinkedIn profile URL per line
    pub fn edit_leads(&mut self, raw: &str) {
        self.form.handle_list_field_change("leads", raw);
    }

    /// One account id per line
    pub fn edit_account_ids(&mut self, raw: &str) {
        self.form.handle_list_field_change("accountIDs", raw);
    }

    pub fn validator() -> Validator {
        Validator::new()
            .required("name", "Campaign name")
            .required("description", "Description")
    }

    /// Validate, then create or update. Failures land in the form's error map.
    pub async fn submit(&mut self) -> Result<Campaign> {
        if !Self::validator().apply(&mut self.form) {
            let fields: Vec<&str> = self.form.errors().keys().map(String::as_str).collect();
            return Err(OutreachError::ValidationFailed(fields.join(", ")));
        }

        let data: CampaignFormData = match self.form.to_model() {
            Ok(data) => data,
            Err(e) => {
                self.form.set_field_error(SUBMIT_ERROR_KEY, e.to_string());
                return Err(e);
            }
        };

        let (verb, result) = match &self.id {
            Some(id) => ("update", self.api.update_campaign(id, &CampaignPatch::from(data)).await),
            None => ("create", self.api.create_campaign(&data).await),
        };

        match result {
            Ok(campaign) => {
                log::info!("Campaign {} {}d", campaign.id, verb);
                Ok(campaign)
            }
            Err(e) => {
                log::error!("Failed to {} campaign: {}", verb, e);
                self.form
                    .set_field_error(SUBMIT_ERROR_KEY, format!("Failed to {} campaign", verb));
                Err(e.into())
            }
        }
    }
}

//! Personalized message generation from a LinkedIn profile.

use std::sync::Arc;

use crate::api::CampaignApi;
use crate::domain::{GeneratedMessage, LinkedInProfile};
use crate::error::Result;
use crate::form::{FieldValue, FormStore, SUBMIT_ERROR_KEY, Validator};
use crate::pages::clipboard::{Clipboard, CopyMethod, copy_with_fallback};
use crate::resource::{AsyncState, Resource};

pub struct MessageGenerator {
    form: FormStore,
    generate: Resource<LinkedInProfile, GeneratedMessage>,
    message: String,
}

impl MessageGenerator {
    /// Form prefilled with the sample profile
    pub fn new(api: Arc<dyn CampaignApi>) -> Result<Self> {
        Self::with_profile(api, &LinkedInProfile::default())
    }

    pub fn with_profile(api: Arc<dyn CampaignApi>, profile: &LinkedInProfile) -> Result<Self> {
        let generate = Resource::new(move |profile: LinkedInProfile| {
            let api = Arc::clone(&api);
            async move { api.generate_message(&profile).await }
        });

        Ok(Self {
            form: FormStore::from_model(profile)?,
            generate,
            message: String::new(),
        })
    }

    pub fn form(&self) -> &FormStore {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormStore {
        &mut self.form
    }

    pub fn edit_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.form.handle_field_change(name, value);
    }

    /// Loading/error state of the generation request
    pub fn state(&self) -> AsyncState<GeneratedMessage> {
        self.generate.state()
    }

    /// Last generated message; empty until one succeeds
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn validator() -> Validator {
        Validator::new()
            .required("name", "Name")
            .required("job_title", "Job Title")
            .required("company", "Company")
    }

    /// Validate the profile and request a message.
    ///
    /// Returns the new message, or `None` when validation or the request
    /// failed; details are in the form errors or `state().error`.
    pub async fn submit(&mut self) -> Option<String> {
        if !Self::validator().apply(&mut self.form) {
            log::debug!("Profile form has errors: {:?}", self.form.errors());
            return None;
        }

        let profile: LinkedInProfile = match self.form.to_model() {
            Ok(profile) => profile,
            Err(e) => {
                self.form.set_field_error(SUBMIT_ERROR_KEY, e.to_string());
                return None;
            }
        };

        let outcome = self.generate.execute(profile).await;
        let generated = outcome.data?;
        self.message = generated.message;
        Some(self.message.clone())
    }

    pub fn copy_to_clipboard(&self, primary: &dyn Clipboard, fallback: &dyn Clipboard) -> Result<CopyMethod> {
        copy_with_fallback(&self.message, primary, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockCampaignApi};
    use crate::pages::clipboard::MemoryClipboard;

    #[tokio::test]
    async fn test_prefilled_profile() {
        let generator = MessageGenerator::new(Arc::new(MockCampaignApi::new())).unwrap();
        assert_eq!(generator.form().text("name"), "John Doe");
        assert_eq!(generator.form().text("company"), "TechCorp");
        assert!(generator.message().is_empty());
    }

    #[tokio::test]
    async fn test_submit_generates_message() {
        let mut generator = MessageGenerator::new(Arc::new(MockCampaignApi::new())).unwrap();
        generator.edit_field("name", "Grace");

        let message = generator.submit().await.unwrap();

        assert!(message.contains("Grace"));
        assert_eq!(generator.message(), message);
        assert!(!generator.state().loading);
    }

    #[tokio::test]
    async fn test_missing_required_field_blocks_request() {
        let mock = MockCampaignApi::new();
        let mut generator = MessageGenerator::new(Arc::new(mock.clone())).unwrap();
        generator.edit_field("job_title", "  ");

        assert!(generator.submit().await.is_none());
        assert_eq!(generator.form().error("job_title"), Some("Job Title is required"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_request_keeps_previous_message() {
        let mock = MockCampaignApi::new();
        let mut generator = MessageGenerator::new(Arc::new(mock.clone())).unwrap();
        let first = generator.submit().await.unwrap();

        mock.fail_next(ApiError::Status {
            status: 503,
            body: "busy".to_string(),
        });
        assert!(generator.submit().await.is_none());

        assert_eq!(generator.message(), first);
        assert_eq!(
            generator.state().error.as_deref(),
            Some("Request failed with status 503: busy")
        );
    }

    #[tokio::test]
    async fn test_copy_to_clipboard() {
        let mut generator = MessageGenerator::new(Arc::new(MockCampaignApi::new())).unwrap();
        generator.submit().await.unwrap();

        let primary = MemoryClipboard::new();
        let fallback = MemoryClipboard::new();
        let method = generator.copy_to_clipboard(&primary, &fallback).unwrap();

        assert_eq!(method, CopyMethod::Primary);
        assert_eq!(primary.contents().as_deref(), Some(generator.message()));
    }
}

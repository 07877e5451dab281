//! Single-lead capture form with email checking.

use std::fmt::Display;
use std::future::Future;

use crate::domain::Lead;
use crate::error::{OutreachError, Result};
use crate::form::{FieldValue, FormStore, SUBMIT_ERROR_KEY, Validator};

pub const LEAD_SUBMIT_FAILED_MESSAGE: &str = "Failed to submit lead. Please try again.";

pub struct LeadEditor {
    form: FormStore,
}

impl LeadEditor {
    pub fn new() -> Result<Self> {
        Self::with_initial(&Lead::default())
    }

    pub fn with_initial(lead: &Lead) -> Result<Self> {
        Ok(Self {
            form: FormStore::from_model(lead)?,
        })
    }

    pub fn form(&self) -> &FormStore {
        &self.form
    }

    pub fn edit_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.form.handle_field_change(name, value);
    }

    pub fn validator() -> Validator {
        Validator::new()
            .required("name", "Name")
            .required("email", "Email")
            .email("email")
    }

    /// Validate and hand the lead to `on_submit`.
    pub async fn submit<F, Fut, E>(&mut self, on_submit: F) -> Result<Lead>
    where
        F: FnOnce(Lead) -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: Display,
    {
        if !Self::validator().apply(&mut self.form) {
            let fields: Vec<&str> = self.form.errors().keys().map(String::as_str).collect();
            return Err(OutreachError::ValidationFailed(fields.join(", ")));
        }

        let lead: Lead = self.form.to_model()?;
        if let Err(e) = on_submit(lead.clone()).await {
            log::error!("Error submitting lead: {}", e);
            self.form.set_field_error(SUBMIT_ERROR_KEY, LEAD_SUBMIT_FAILED_MESSAGE);
            return Err(OutreachError::Submit(e.to_string()));
        }
        Ok(lead)
    }
}

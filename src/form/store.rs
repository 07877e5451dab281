//! Editable record with a per-field error overlay.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::form::record::{
    FieldErrorMap, FieldValue, FormRecord, model_from_record, record_from_model, split_list_field,
};

/// Holds one form's values and validation errors.
///
/// The seed is kept by value, so `reset_form` always restores exactly what the
/// store was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct FormStore {
    seed: FormRecord,
    values: FormRecord,
    errors: FieldErrorMap,
}

impl FormStore {
    pub fn new(seed: FormRecord) -> Self {
        Self {
            values: seed.clone(),
            seed,
            errors: FieldErrorMap::new(),
        }
    }

    /// Seed the store from a serializable model
    pub fn from_model<M: Serialize>(model: &M) -> Result<Self> {
        Ok(Self::new(record_from_model(model)?))
    }

    /// Current values as a typed model
    pub fn to_model<M: DeserializeOwned>(&self) -> Result<M> {
        model_from_record(&self.values)
    }

    pub fn values(&self) -> &FormRecord {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text of a field; empty when missing or list-valued
    pub fn text(&self, name: &str) -> &str {
        self.values.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Entries of a list field; empty when missing or text-valued
    pub fn list(&self, name: &str) -> &[String] {
        self.values.get(name).and_then(FieldValue::as_list).unwrap_or(&[])
    }

    /// A list field rendered back to one entry per line
    pub fn list_text(&self, name: &str) -> String {
        self.list(name).join("\n")
    }

    pub fn errors(&self) -> &FieldErrorMap {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Values differ from the seed
    pub fn is_dirty(&self) -> bool {
        self.values != self.seed
    }

    /// Set one field; any error recorded for it is dismissed
    pub fn handle_field_change(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.values.insert(name.to_string(), value.into());
        self.dismiss_error(name);
    }

    /// Set a list field from multi-line text
    pub fn handle_list_field_change(&mut self, name: &str, raw: &str) {
        self.values
            .insert(name.to_string(), FieldValue::List(split_list_field(raw)));
        self.dismiss_error(name);
    }

    /// Restore the seed values and drop every error
    pub fn reset_form(&mut self) {
        self.values = self.seed.clone();
        self.errors.clear();
    }

    /// Shallow-merge `partial` into the current values
    pub fn set_form_values(&mut self, partial: FormRecord) {
        self.values.extend(partial);
    }

    /// Shallow-merge the fields of a serializable model
    pub fn set_form_model<M: Serialize>(&mut self, model: &M) -> Result<()> {
        self.set_form_values(record_from_model(model)?);
        Ok(())
    }

    pub fn set_field_error(&mut self, name: &str, message: impl Into<String>) {
        self.errors.insert(name.to_string(), message.into());
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    fn dismiss_error(&mut self, name: &str) {
        if self.errors.remove(name).is_some() {
            log::trace!("Cleared error for field '{}'", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CampaignFormData, CampaignStatus};
    use crate::form::record::{SUBMIT_ERROR_KEY, record_from};

    fn contact_form() -> FormStore {
        FormStore::new(record_from([("name", ""), ("email", "")]))
    }

    #[test]
    fn test_new_store_matches_seed() {
        let store = contact_form();
        assert_eq!(store.text("name"), "");
        assert!(!store.has_errors());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_field_change_clears_only_that_error() {
        let mut store = contact_form();
        store.set_field_error("email", "Required");
        store.set_field_error("name", "Required");

        store.handle_field_change("email", "a@b.com");

        assert_eq!(store.text("email"), "a@b.com");
        assert!(store.error("email").is_none());
        assert_eq!(store.error("name"), Some("Required"));
    }

    #[test]
    fn test_field_change_does_not_revalidate() {
        let mut store = contact_form();
        store.handle_field_change("email", "not-an-email");
        assert!(!store.has_errors());
    }

    #[test]
    fn test_list_field_change() {
        let mut store = contact_form();
        store.handle_list_field_change("leads", "https://a\n\n  https://b  \n");
        assert_eq!(store.list("leads"), ["https://a", "https://b"]);
        assert_eq!(store.list_text("leads"), "https://a\nhttps://b");
    }

    #[test]
    fn test_reset_restores_seed_and_clears_errors() {
        let mut store = contact_form();
        store.handle_field_change("name", "Ada");
        store.set_field_error(SUBMIT_ERROR_KEY, "Failed");
        assert!(store.is_dirty());

        store.reset_form();

        assert_eq!(store.text("name"), "");
        assert!(!store.has_errors());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_reset_is_independent_of_original_seed() {
        let mut seed = record_from([("name", "seed")]);
        let mut store = FormStore::new(seed.clone());
        seed.insert("name".to_string(), FieldValue::from("mutated"));

        store.handle_field_change("name", "edited");
        store.reset_form();

        assert_eq!(store.text("name"), "seed");
    }

    #[test]
    fn test_set_form_values_merges() {
        let mut store = contact_form();
        store.set_form_values(record_from([("name", "Ada")]));
        assert_eq!(store.text("name"), "Ada");
        assert_eq!(store.text("email"), "");
    }

    #[test]
    fn test_clear_errors() {
        let mut store = contact_form();
        store.set_field_error("name", "x");
        store.set_field_error(SUBMIT_ERROR_KEY, "y");
        store.clear_errors();
        assert!(store.errors().is_empty());
    }

    #[test]
    fn test_model_round_trip_through_edits() {
        let mut store = FormStore::from_model(&CampaignFormData::default()).unwrap();
        store.handle_field_change("name", "Launch");
        store.handle_field_change("status", "ACTIVE");
        store.handle_list_field_change("accountIDs", "acc-1\nacc-2");

        let data: CampaignFormData = store.to_model().unwrap();
        assert_eq!(data.name, "Launch");
        assert_eq!(data.status, CampaignStatus::Active);
        assert_eq!(data.account_ids, vec!["acc-1", "acc-2"]);
    }

    #[test]
    fn test_missing_fields_read_as_empty() {
        let store = contact_form();
        assert_eq!(store.text("phone"), "");
        assert!(store.list("phone").is_empty());
        assert!(store.value("phone").is_none());
    }
}

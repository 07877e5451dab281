//! Required-field and email checks run by form owners before submitting.

use regex::Regex;
use std::sync::LazyLock;

use crate::form::record::FieldErrorMap;
use crate::form::store::FormStore;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    Required { field: String, label: String },
    Email { field: String },
}

/// Ordered set of field checks; the first failure per field is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    rules: Vec<Rule>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field must be present and not blank; reported as "<label> is required"
    pub fn required(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.rules.push(Rule::Required {
            field: field.into(),
            label: label.into(),
        });
        self
    }

    /// Non-empty text must look like an email address
    pub fn email(mut self, field: impl Into<String>) -> Self {
        self.rules.push(Rule::Email { field: field.into() });
        self
    }

    pub fn validate(&self, store: &FormStore) -> FieldErrorMap {
        let mut errors = FieldErrorMap::new();
        for rule in &self.rules {
            match rule {
                Rule::Required { field, label } => {
                    let blank = store.value(field).is_none_or(|value| value.is_blank());
                    if blank {
                        errors
                            .entry(field.clone())
                            .or_insert_with(|| format!("{} is required", label));
                    }
                }
                Rule::Email { field } => {
                    let text = store.text(field);
                    if !text.trim().is_empty() && !is_valid_email(text) {
                        errors
                            .entry(field.clone())
                            .or_insert_with(|| INVALID_EMAIL_MESSAGE.to_string());
                    }
                }
            }
        }
        errors
    }

    /// Replace the store's errors with this validator's findings.
    ///
    /// Returns true when the record is submittable.
    pub fn apply(&self, store: &mut FormStore) -> bool {
        let errors = self.validate(store);
        store.clear_errors();
        for (field, message) in &errors {
            store.set_field_error(field, message.clone());
        }
        errors.is_empty()
    }
}

//! Form state - an editable record plus its field-level error overlay
//!
//! Validation is not performed by the store itself; callers build a
//! `Validator` and write its findings into the store before submitting.

pub mod record;
pub mod store;
pub mod validation;

pub use record::{FieldErrorMap, FieldValue, FormRecord, SUBMIT_ERROR_KEY, split_list_field};
pub use store::FormStore;
pub use validation::{Validator, is_valid_email};

//! Form actions: validate posted fields, run one mutation, then revalidate
//! the affected list page and redirect back to it.
//!
//! Failures never escape as errors. They come back as a [`FormState`] the
//! form can render inline.

pub mod customers;
pub mod invoices;

use serde::Serialize;
use std::collections::HashMap;

use crate::validation::FieldErrors;

pub const INVOICES_PATH: &str = "/dashboard/invoices";
pub const CUSTOMERS_PATH: &str = "/dashboard/customers";

/// Fields posted by a form
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` body.
    ///
    /// When a field repeats, the first value wins.
    pub fn parse_urlencoded(body: &str) -> Self {
        let mut fields = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
            fields.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
        Self { fields }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// What a form shows after a failed or message-only action
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct FormState {
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
    pub message: Option<String>,
}

impl FormState {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: FieldErrors::new(),
            message: Some(message.into()),
        }
    }

    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors,
            message: Some(message.into()),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Redirect { location: &'static str },
    State(FormState),
}

impl ActionOutcome {
    pub fn is_redirect(&self) -> bool {
        matches!(self, ActionOutcome::Redirect { .. })
    }

    pub fn state(&self) -> Option<&FormState> {
        match self {
            ActionOutcome::State(state) => Some(state),
            ActionOutcome::Redirect { .. } => None,
        }
    }
}

/// Invalidates cached renderings of a page after a mutation
pub trait Revalidate {
    fn revalidate_path(&self, path: &str);
}

/// Revalidator for callers without a render cache; it only records the event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRevalidator;

impl Revalidate for LogRevalidator {
    fn revalidate_path(&self, path: &str) {
        tracing::debug!(path, "revalidate");
    }
}

/// Revalidate `path` and send the caller there
fn revalidate_and_redirect(cache: &impl Revalidate, path: &'static str) -> ActionOutcome {
    cache.revalidate_path(path);
    ActionOutcome::Redirect { location: path }
}

/// Trimmed field value; blank counts as missing.
fn field<'a>(form: &'a FormData, key: &str) -> Option<&'a str> {
    form.get(key).map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencoded_bodies_decode() {
        let form = FormData::parse_urlencoded("name=Acme+Corp&email=acme%40example.com&image_url=");

        assert_eq!(form.get("name"), Some("Acme Corp"));
        assert_eq!(form.get("email"), Some("acme@example.com"));
        assert_eq!(form.get("image_url"), Some(""));
        assert_eq!(form.get("missing"), None);
    }

    #[test]
    fn first_repeated_field_wins() {
        let form = FormData::parse_urlencoded("status=paid&status=pending");
        assert_eq!(form.get("status"), Some("paid"));
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let form: FormData = [("a", "  "), ("b", " x ")].into_iter().collect();
        assert_eq!(field(&form, "a"), None);
        assert_eq!(field(&form, "b"), Some("x"));
        assert_eq!(field(&form, "c"), None);
    }

    #[test]
    fn outcome_helpers() {
        let redirect = ActionOutcome::Redirect { location: INVOICES_PATH };
        assert!(redirect.is_redirect());
        assert!(redirect.state().is_none());

        let state = ActionOutcome::State(FormState::message("Deleted Invoice."));
        assert_eq!(
            state.state().and_then(|s| s.message.as_deref()),
            Some("Deleted Invoice.")
        );
    }
}

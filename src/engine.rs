//! Field and Form Validation Passes
//!
//! Stateless entry points under the session layer. `validate_field` runs
//! one rule chain with short-circuit semantics; `validate_form` drives it
//! across a schema and aggregates the failures. Both are directly usable
//! for headless, one-shot validation without a session.

use crate::message::Translate;
use crate::rules::Rule;
use crate::schema::Schema;
use crate::value::{FieldValue, FormData};
use log::{debug, trace};
use serde::Serialize;
use std::collections::HashMap;

/// Outcome of a full-form pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormReport {
    /// True iff `errors` is empty.
    pub is_valid: bool,
    /// Field name -> resolved error message for every failing field.
    pub errors: HashMap<String, String>,
}

impl FormReport {
    /// A report with no failures.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: HashMap::new(),
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Runs a rule chain against one value, in declared order, stopping at the
/// first failure. Later predicates never run once one fails.
///
/// Returns the failing rule's resolved message, or `None` when every rule
/// passes. With no translator the raw message key comes back verbatim.
/// `form` is handed to every rule so sibling-reading rules can see the
/// whole snapshot.
pub fn validate_field(
    value: &FieldValue,
    rules: &[Rule],
    form: &FormData,
    translator: Option<&dyn Translate>,
) -> Option<String> {
    for rule in rules {
        if !rule.check(value, form) {
            trace!("rule failed with key {}", rule.message_key());
            return Some(resolve(rule, translator));
        }
    }
    None
}

fn resolve(rule: &Rule, translator: Option<&dyn Translate>) -> String {
    match translator {
        Some(translator) => translator.translate(rule.message_key(), &rule.params()),
        None => rule.message_key().to_string(),
    }
}

/// Validates every schema field against the form snapshot.
///
/// Iteration follows the schema, never the form data: form keys without a
/// schema entry are ignored, and a schema field missing from the form
/// validates as `Null`. Each field's chain sees the entire form, so
/// cross-field rules work regardless of which field they hang off.
pub fn validate_form(
    form: &FormData,
    schema: &Schema,
    translator: Option<&dyn Translate>,
) -> FormReport {
    let absent = FieldValue::Null;
    let mut errors = HashMap::new();
    for (name, field) in schema.iter() {
        let value = form.get(name).unwrap_or(&absent);
        if let Some(message) = validate_field(value, field.rules(), form, translator) {
            errors.insert(name.to_string(), message);
        }
    }
    debug!(
        "form pass over {} field(s): {} error(s)",
        schema.len(),
        errors.len()
    );
    FormReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

//! Schema Types
//!
//! A schema maps field names to their rule chains plus an optional
//! per-field trigger override. Schemas are plain data: authored with the
//! builder, cloned freely, and owned outright by each session that uses
//! one.

use crate::rules::Rule;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which UI event validates a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Blur,
    Input,
    Submit,
}

/// One field's validation config: an ordered rule chain and an optional
/// trigger override. With no override, the session's options decide when
/// the field validates.
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    rules: Vec<Rule>,
    validate_on: Option<Trigger>,
}

impl FieldRules {
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            validate_on: None,
        }
    }

    /// Pins this field to one trigger, overriding the session's blur and
    /// input gates. Submit always validates the whole form.
    pub fn on(mut self, trigger: Trigger) -> Self {
        self.validate_on = Some(trigger);
        self
    }

    /// Rules in declaration order; validation runs them front to back.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn validate_on(&self) -> Option<Trigger> {
        self.validate_on
    }
}

/// Field name -> validation config. Lookup is by name; declaration order
/// carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: HashMap<String, FieldRules>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field declaration.
    ///
    /// # Examples
    ///
    /// ```
    /// let schema = Schema::new()
    ///     .field("email", [required(), email()])
    ///     .field("age", [numeric(), min(13)]);
    /// ```
    pub fn field(
        mut self,
        name: impl Into<String>,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Self {
        self.fields.insert(name.into(), FieldRules::new(rules));
        self
    }

    /// Builder-style declaration with a full config, for per-field
    /// trigger overrides.
    pub fn field_config(mut self, name: impl Into<String>, config: FieldRules) -> Self {
        self.fields.insert(name.into(), config);
        self
    }

    /// Inserts or replaces a field's config.
    pub fn insert(&mut self, name: impl Into<String>, config: FieldRules) {
        self.fields.insert(name.into(), config);
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldRules> {
        self.fields.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldRules> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRules)> {
        self.fields.iter().map(|(name, config)| (name.as_str(), config))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

//! Error-Message Resolution
//!
//! The engine emits message keys, never finished sentences. A host bridges
//! its own i18n layer through [`Translate`]; without one, raw keys come
//! back verbatim, which is the supported degraded mode for tests and
//! headless use. [`MessageCatalog`] is a small map-backed implementation
//! with `{param}` template interpolation for hosts that have no i18n
//! framework at all.

use std::collections::HashMap;

/// Interpolation parameters for a message key, in declaration order.
///
/// Keys are the placeholder names a template refers to (`{min}`, `{size}`,
/// `{types}`); values are already rendered to strings.
pub type MessageParams = Vec<(&'static str, String)>;

/// Translation seam: `translate(key, params) -> String`.
///
/// Implemented for any `Fn(&str, &MessageParams) -> String` closure, so a
/// host bridges its translator in one line:
///
/// ```
/// let translator = |key: &str, _params: &MessageParams| my_i18n.t(key);
/// ```
pub trait Translate: Send + Sync {
    fn translate(&self, key: &str, params: &MessageParams) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str, &MessageParams) -> String + Send + Sync,
{
    fn translate(&self, key: &str, params: &MessageParams) -> String {
        self(key, params)
    }
}

/// Map-backed translator with `{param}` placeholder substitution.
///
/// Unknown keys fall back to the raw key, matching the engine's
/// no-translator behavior, so a partial catalog degrades gracefully.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration of one template.
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// English templates for every built-in message key.
    pub fn english() -> Self {
        Self::new()
            .with("validation.required", "This field is required")
            .with("validation.minLength", "Must be at least {min} characters")
            .with("validation.maxLength", "Must be no more than {max} characters")
            .with("validation.email", "Please enter a valid email address")
            .with(
                "validation.password",
                "Password must be at least 8 characters with uppercase, lowercase and a number",
            )
            .with("validation.confirmPassword", "Passwords do not match")
            .with("validation.futureDate", "Date must be today or later")
            .with("validation.pastDate", "Date cannot be in the future")
            .with("validation.invalidDate", "Please enter a valid date")
            .with("validation.invalidTime", "Please enter a valid time")
            .with("validation.phone", "Please enter a valid phone number")
            .with("validation.url", "Please enter a valid URL")
            .with("validation.numeric", "Must be a number")
            .with("validation.min", "Must be at least {min}")
            .with("validation.max", "Must be no more than {max}")
            .with("validation.fileSize", "File must be smaller than {size}MB")
            .with("validation.fileType", "File type must be one of: {types}")
    }
}

impl Translate for MessageCatalog {
    fn translate(&self, key: &str, params: &MessageParams) -> String {
        let Some(template) = self.templates.get(key) else {
            return key.to_string();
        };
        let mut message = template.clone();
        for (name, value) in params {
            message = message.replace(&format!("{{{}}}", name), value);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_interpolates_params() {
        let catalog = MessageCatalog::new().with("greeting", "Hello {name}, you are {age}");
        let params: MessageParams =
            vec![("name", "Ada".to_string()), ("age", "36".to_string())];
        assert_eq!(
            catalog.translate("greeting", &params),
            "Hello Ada, you are 36"
        );
    }

    #[test]
    fn test_catalog_falls_back_to_raw_key() {
        let catalog = MessageCatalog::new();
        assert_eq!(catalog.translate("validation.email", &vec![]), "validation.email");
    }

    #[test]
    fn test_closure_translator() {
        let upper = |key: &str, _params: &MessageParams| key.to_uppercase();
        assert_eq!(upper.translate("validation.url", &vec![]), "VALIDATION.URL");
    }

    #[test]
    fn test_english_covers_parameterized_keys() {
        let catalog = MessageCatalog::english();
        let params: MessageParams = vec![("min", "3".to_string())];
        assert_eq!(
            catalog.translate("validation.minLength", &params),
            "Must be at least 3 characters"
        );
        assert!(catalog.get("validation.fileType").is_some());
    }
}

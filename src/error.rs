//! Programmer-Error Types
//!
//! Validation failures are data and live in error maps; they never pass
//! through here. `SchemaError` covers caller bugs only, such as addressing
//! a field the schema does not declare, and is surfaced fast instead of
//! silently no-opping.

use thiserror::Error;

/// Result alias for schema-addressing operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field `{field}` is not declared in the schema")]
    UnknownField { field: String },
}

impl SchemaError {
    pub fn unknown_field(field: impl Into<String>) -> Self {
        SchemaError::UnknownField {
            field: field.into(),
        }
    }

    /// The field name the failing call addressed.
    pub fn field(&self) -> &str {
        match self {
            SchemaError::UnknownField { field } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_display() {
        let err = SchemaError::unknown_field("nickname");
        assert_eq!(err.field(), "nickname");
        assert_eq!(
            err.to_string(),
            "field `nickname` is not declared in the schema"
        );
    }
}

//! Schema-driven form validation with per-field lifecycles.
//!
//! A form declares its rules once as a [`Schema`]; a [`FormSession`] then
//! turns UI events into validation state. Blur and submit validate
//! synchronously, input validates through a per-field trailing-edge
//! debounce, and every failure resolves to a message key through an
//! injected translator (or comes back raw without one).
//!
//! Failures are data in the session's error map; `Err` is reserved for
//! caller bugs like addressing an undeclared field. Touched flags gate
//! rendering so untouched fields never show errors.
//!
//! ```
//! use formguard::prelude::*;
//!
//! let schema = Schema::new()
//!     .field("email", [required(), email()])
//!     .field("password", [required(), password()]);
//!
//! let session = FormSession::new(schema);
//! let mut form = FormData::new();
//! form.insert("email".into(), FieldValue::from("ana@example.com"));
//! form.insert("password".into(), FieldValue::from("Str0ngPass"));
//!
//! assert!(session.handle_form_submit(&form));
//! ```

pub mod debounce;
pub mod engine;
pub mod error;
pub mod message;
pub mod rules;
pub mod schema;
pub mod schemas;
pub mod session;
pub mod value;

pub use engine::{validate_field, validate_form, FormReport};
pub use error::{SchemaError, SchemaResult};
pub use message::{MessageCatalog, MessageParams, Translate};
pub use rules::{Rule, RuleKind};
pub use schema::{FieldRules, Schema, Trigger};
pub use session::{FormSession, SessionOptions, DEFAULT_DEBOUNCE};
pub use value::{form_from_json, FieldValue, FileMeta, FormData};

/// One-stop imports for hosts wiring up a form.
pub mod prelude {
    pub use crate::debounce::Debouncer;
    pub use crate::engine::{validate_field, validate_form, FormReport};
    pub use crate::error::{SchemaError, SchemaResult};
    pub use crate::message::{MessageCatalog, MessageParams, Translate};
    pub use crate::rules::{
        confirm_password, custom, email, file_size, file_type, future_date, max, max_length, min,
        min_length, numeric, password, past_date, phone, required, url, valid_date, valid_time,
        Rule, RuleKind,
    };
    pub use crate::schema::{FieldRules, Schema, Trigger};
    pub use crate::schemas;
    pub use crate::session::{FormSession, SessionOptions, DEFAULT_DEBOUNCE};
    pub use crate::value::{form_from_json, FieldValue, FileMeta, FormData};
}

//! Stateful Validation Session
//!
//! The per-form runtime. A session owns its schema outright (callers keep
//! their original and clone it in), tracks errors and touched flags, and
//! turns UI events into validation passes: blur and submit run
//! synchronously, input runs through a per-field trailing-edge debounce.
//!
//! State lives behind one mutex and every operation takes `&self`, so a
//! multi-threaded host is safe and the debounce timer task can write back
//! without a handle to the session itself. Accessors hand out snapshots,
//! never guards.
//!
//! Validation failure is data in the error map. `Err` from a session
//! operation always means a caller bug: addressing a field the schema
//! does not declare.

use crate::debounce::Debouncer;
use crate::engine::{validate_field, validate_form};
use crate::error::{SchemaError, SchemaResult};
use crate::message::Translate;
use crate::schema::{FieldRules, Schema, Trigger};
use crate::value::{FieldValue, FormData};
use log::{debug, trace, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Default quiet window for input-triggered validation.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Trigger configuration for a session.
///
/// The defaults validate on blur and submit but not on every keystroke;
/// a field's own `validate_on` overrides the blur and input gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub validate_on_blur: bool,
    pub validate_on_input: bool,
    pub validate_on_submit: bool,
    pub debounce: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            validate_on_blur: true,
            validate_on_input: false,
            validate_on_submit: true,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl SessionOptions {
    pub fn with_blur(mut self, enabled: bool) -> Self {
        self.validate_on_blur = enabled;
        self
    }

    pub fn with_input(mut self, enabled: bool) -> Self {
        self.validate_on_input = enabled;
        self
    }

    pub fn with_submit(mut self, enabled: bool) -> Self {
        self.validate_on_submit = enabled;
        self
    }

    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }
}

struct SessionState {
    schema: Schema,
    errors: HashMap<String, String>,
    touched: HashMap<String, bool>,
    is_validating: bool,
    is_valid: bool,
}

impl SessionState {
    /// Runs one field's chain and writes the outcome into the error map.
    /// Assumes the caller already checked the field exists; a vanished
    /// field just clears, which is the safe direction.
    fn revalidate_field(
        &mut self,
        translator: Option<&dyn Translate>,
        name: &str,
        value: &FieldValue,
        form: &FormData,
    ) -> Option<String> {
        let outcome = match self.schema.get(name) {
            Some(field) => validate_field(value, field.rules(), form, translator),
            None => None,
        };
        match &outcome {
            Some(message) => {
                self.errors.insert(name.to_string(), message.clone());
            }
            None => {
                self.errors.remove(name);
            }
        }
        outcome
    }
}

/// The per-form validation runtime described in the module docs.
pub struct FormSession {
    state: Arc<Mutex<SessionState>>,
    options: SessionOptions,
    translator: Option<Arc<dyn Translate>>,
    debouncer: Debouncer,
}

impl FormSession {
    /// A session over the given schema with default options. The session
    /// owns the schema; pass a clone to reuse the original elsewhere.
    pub fn new(schema: Schema) -> Self {
        Self::with_options(schema, SessionOptions::default())
    }

    pub fn with_options(schema: Schema, options: SessionOptions) -> Self {
        let debouncer = Debouncer::new(options.debounce);
        Self {
            state: Arc::new(Mutex::new(SessionState {
                schema,
                errors: HashMap::new(),
                touched: HashMap::new(),
                is_validating: false,
                is_valid: true,
            })),
            options,
            translator: None,
            debouncer,
        }
    }

    /// Attaches the translator used to resolve failure messages. Without
    /// one, raw message keys come back.
    pub fn with_translator(mut self, translator: Arc<dyn Translate>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap()
    }

    fn translator_ref(&self) -> Option<&dyn Translate> {
        self.translator.as_deref()
    }

    /// Marks a field as interacted-with. Touched flags only ever go from
    /// false to true; reset and field removal are the sole exceptions.
    pub fn touch_field(&self, name: &str) -> SchemaResult<()> {
        let mut state = self.lock();
        if !state.schema.contains(name) {
            return Err(SchemaError::unknown_field(name));
        }
        state.touched.insert(name.to_string(), true);
        Ok(())
    }

    /// Validates one field right now and records the outcome.
    ///
    /// Leaves `is_valid` alone: that flag reflects full-form passes only,
    /// so a failing single field does not flip a previously valid form.
    pub fn validate_single_field(
        &self,
        name: &str,
        value: &FieldValue,
        form: &FormData,
    ) -> SchemaResult<Option<String>> {
        let mut state = self.lock();
        if !state.schema.contains(name) {
            return Err(SchemaError::unknown_field(name));
        }
        let outcome = state.revalidate_field(self.translator_ref(), name, value, form);
        trace!(
            "field {} validated: {}",
            name,
            if outcome.is_some() { "failed" } else { "ok" }
        );
        Ok(outcome)
    }

    /// Full-form pass: replaces the error map wholesale, sets `is_valid`,
    /// and holds `is_validating` true for the duration. Returns `is_valid`.
    pub fn validate_all_fields(&self, form: &FormData) -> bool {
        let schema = {
            let mut state = self.lock();
            state.is_validating = true;
            state.schema.clone()
        };
        let report = validate_form(form, &schema, self.translator_ref());
        let mut state = self.lock();
        state.is_validating = false;
        state.is_valid = report.is_valid;
        state.errors = report.errors;
        debug!(
            "full-form pass: valid={} errors={}",
            state.is_valid,
            state.errors.len()
        );
        state.is_valid
    }

    /// Blur handler: touch, then validate the field if blur validation is
    /// gated on for it.
    pub fn handle_field_blur(
        &self,
        name: &str,
        value: &FieldValue,
        form: &FormData,
    ) -> SchemaResult<()> {
        let mut state = self.lock();
        let field_trigger = match state.schema.get(name) {
            Some(field) => field.validate_on(),
            None => return Err(SchemaError::unknown_field(name)),
        };
        state.touched.insert(name.to_string(), true);
        let gated_on = field_trigger
            .map(|trigger| trigger == Trigger::Blur)
            .unwrap_or(self.options.validate_on_blur);
        if gated_on {
            state.revalidate_field(self.translator_ref(), name, value, form);
        }
        Ok(())
    }

    /// Input handler: drops any standing error for the field immediately
    /// (a stale error over a mid-edit value reads as noise), then, if
    /// input validation is gated on, schedules a debounced validation of
    /// the given snapshot. Bursts collapse to the trailing snapshot.
    ///
    /// Scheduling runs on the ambient tokio runtime; with input validation
    /// gated off this never touches a timer.
    pub fn handle_field_input(
        &self,
        name: &str,
        value: &FieldValue,
        form: &FormData,
    ) -> SchemaResult<()> {
        let field_trigger = {
            let mut state = self.lock();
            let field_trigger = match state.schema.get(name) {
                Some(field) => field.validate_on(),
                None => return Err(SchemaError::unknown_field(name)),
            };
            state.errors.remove(name);
            field_trigger
        };
        let gated_on = field_trigger
            .map(|trigger| trigger == Trigger::Input)
            .unwrap_or(self.options.validate_on_input);
        if !gated_on {
            return Ok(());
        }

        trace!("debounced validation scheduled for field {}", name);
        let state = Arc::clone(&self.state);
        let translator = self.translator.clone();
        let name_owned = name.to_string();
        let value = value.clone();
        let form = form.clone();
        self.debouncer.call(name, move || {
            let mut state = state.lock().unwrap();
            if !state.schema.contains(&name_owned) {
                warn!(
                    "debounced validation dropped: field {} left the schema",
                    name_owned
                );
                return;
            }
            state.revalidate_field(translator.as_deref(), &name_owned, &value, &form);
        });
        Ok(())
    }

    /// Submit handler: touches every schema field, then runs a full-form
    /// pass and returns its validity. With submit validation gated off,
    /// returns true unconditionally and the caller is trusted.
    pub fn handle_form_submit(&self, form: &FormData) -> bool {
        {
            let mut state = self.lock();
            let names: Vec<String> = state.schema.field_names().map(str::to_string).collect();
            for name in names {
                state.touched.insert(name, true);
            }
        }
        if !self.options.validate_on_submit {
            debug!("submit accepted without validation (gated off)");
            return true;
        }
        self.validate_all_fields(form)
    }

    /// Adds or replaces a field's validation at runtime. An existing
    /// error or touched flag for the name survives until the next pass.
    pub fn add_field_validation(&self, name: impl Into<String>, field: FieldRules) {
        let name = name.into();
        debug!(
            "field {} validation registered ({} rule(s))",
            name,
            field.rules().len()
        );
        self.lock().schema.insert(name, field);
    }

    /// Removes a field's validation along with its error and touched
    /// entries, and cancels any debounced validation still pending for it.
    pub fn remove_field_validation(&self, name: &str) -> SchemaResult<()> {
        {
            let mut state = self.lock();
            if state.schema.remove(name).is_none() {
                return Err(SchemaError::unknown_field(name));
            }
            state.errors.remove(name);
            state.touched.remove(name);
        }
        if self.debouncer.cancel(name) {
            trace!("pending debounce for removed field {} cancelled", name);
        }
        debug!("field {} validation removed", name);
        Ok(())
    }

    /// Returns the session to its post-construction state: no errors, no
    /// touched flags, valid, and nothing left on a timer.
    pub fn reset_validation(&self) {
        self.debouncer.cancel_all();
        let mut state = self.lock();
        state.errors.clear();
        state.touched.clear();
        state.is_valid = true;
        state.is_validating = false;
        debug!("validation state reset");
    }

    pub fn errors(&self) -> HashMap<String, String> {
        self.lock().errors.clone()
    }

    pub fn error(&self, name: &str) -> Option<String> {
        self.lock().errors.get(name).cloned()
    }

    /// The error a host should actually render: present only once the
    /// field is touched. Untouched fields stay quiet no matter how
    /// invalid, so a fresh form never opens all red.
    pub fn visible_error(&self, name: &str) -> Option<String> {
        let state = self.lock();
        if state.touched.get(name).copied().unwrap_or(false) {
            state.errors.get(name).cloned()
        } else {
            None
        }
    }

    pub fn touched(&self) -> HashMap<String, bool> {
        self.lock().touched.clone()
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.lock().touched.get(name).copied().unwrap_or(false)
    }

    pub fn has_errors(&self) -> bool {
        !self.lock().errors.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.lock().is_valid
    }

    pub fn is_validating(&self) -> bool {
        self.lock().is_validating
    }

    pub fn field_names(&self) -> Vec<String> {
        self.lock().schema.field_names().map(str::to_string).collect()
    }
}

//! Rule Factory Library
//!
//! Every rule is a pure check over `(value, form)` tagged with the message
//! key it fails with. Parameterized rules carry their parameters in the
//! variant itself, so message interpolation pattern-matches them out
//! instead of parsing them back from key strings. Rules are immutable and
//! cheap to clone; sharing one instance across fields is safe.

use crate::message::MessageParams;
use crate::value::{FieldValue, FormData};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Cached regex patterns shared by every rule instance
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap());
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\+84|84|0)[35789]\d{8}$").unwrap());

/// Escape-hatch predicate: true means the value passes.
pub type CustomPredicate = Arc<dyn Fn(&FieldValue, &FormData) -> bool + Send + Sync>;

/// The semantic check a rule performs, with its parameters inline.
#[derive(Clone)]
pub enum RuleKind {
    Required,
    MinLength { min: usize },
    MaxLength { max: usize },
    Email,
    Password,
    ConfirmPassword { field: String },
    FutureDate,
    PastDate,
    ValidDate,
    ValidTime,
    Phone,
    Url,
    Numeric,
    Min { min: f64 },
    Max { max: f64 },
    FileSize { max_mb: f64 },
    FileType { allowed: Vec<String> },
    Custom { predicate: CustomPredicate },
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Required => write!(f, "Required"),
            RuleKind::MinLength { min } => write!(f, "MinLength({})", min),
            RuleKind::MaxLength { max } => write!(f, "MaxLength({})", max),
            RuleKind::Email => write!(f, "Email"),
            RuleKind::Password => write!(f, "Password"),
            RuleKind::ConfirmPassword { field } => write!(f, "ConfirmPassword({})", field),
            RuleKind::FutureDate => write!(f, "FutureDate"),
            RuleKind::PastDate => write!(f, "PastDate"),
            RuleKind::ValidDate => write!(f, "ValidDate"),
            RuleKind::ValidTime => write!(f, "ValidTime"),
            RuleKind::Phone => write!(f, "Phone"),
            RuleKind::Url => write!(f, "Url"),
            RuleKind::Numeric => write!(f, "Numeric"),
            RuleKind::Min { min } => write!(f, "Min({})", min),
            RuleKind::Max { max } => write!(f, "Max({})", max),
            RuleKind::FileSize { max_mb } => write!(f, "FileSize({}MB)", max_mb),
            RuleKind::FileType { allowed } => write!(f, "FileType({})", allowed.iter().join(", ")),
            RuleKind::Custom { .. } => write!(f, "Custom(..)"),
        }
    }
}

/// A single validation rule: one check plus the message key it fails with.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    message: Option<String>,
}

impl Rule {
    fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Replaces the rule's default message key.
    pub fn with_message(mut self, key: impl Into<String>) -> Self {
        self.message = Some(key.into());
        self
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// The message key reported when this rule fails.
    pub fn message_key(&self) -> &str {
        if let Some(key) = &self.message {
            return key;
        }
        match &self.kind {
            RuleKind::Required => "validation.required",
            RuleKind::MinLength { .. } => "validation.minLength",
            RuleKind::MaxLength { .. } => "validation.maxLength",
            RuleKind::Email => "validation.email",
            RuleKind::Password => "validation.password",
            RuleKind::ConfirmPassword { .. } => "validation.confirmPassword",
            RuleKind::FutureDate => "validation.futureDate",
            RuleKind::PastDate => "validation.pastDate",
            RuleKind::ValidDate => "validation.invalidDate",
            RuleKind::ValidTime => "validation.invalidTime",
            RuleKind::Phone => "validation.phone",
            RuleKind::Url => "validation.url",
            RuleKind::Numeric => "validation.numeric",
            RuleKind::Min { .. } => "validation.min",
            RuleKind::Max { .. } => "validation.max",
            RuleKind::FileSize { .. } => "validation.fileSize",
            RuleKind::FileType { .. } => "validation.fileType",
            RuleKind::Custom { .. } => "validation.invalid",
        }
    }

    /// Interpolation parameters for this rule's message, taken straight
    /// from the variant.
    pub fn params(&self) -> MessageParams {
        match &self.kind {
            RuleKind::MinLength { min } => vec![("min", min.to_string())],
            RuleKind::MaxLength { max } => vec![("max", max.to_string())],
            RuleKind::Min { min } => vec![("min", format_bound(*min))],
            RuleKind::Max { max } => vec![("max", format_bound(*max))],
            RuleKind::FileSize { max_mb } => vec![("size", format_bound(*max_mb))],
            RuleKind::FileType { allowed } => vec![("types", allowed.iter().join(", "))],
            _ => Vec::new(),
        }
    }

    /// Runs the rule's check. `form` gives sibling access to the rules
    /// that need it (`confirm_password`, custom predicates).
    pub fn check(&self, value: &FieldValue, form: &FormData) -> bool {
        match &self.kind {
            RuleKind::Required => !value.is_absent(),
            RuleKind::MinLength { min } => check_min_length(value, *min),
            RuleKind::MaxLength { max } => check_max_length(value, *max),
            RuleKind::Email => check_text(value, |text| EMAIL_REGEX.is_match(text)),
            RuleKind::Password => check_text(value, check_password),
            RuleKind::ConfirmPassword { field } => {
                value.is_blank() || form.get(field) == Some(value)
            }
            RuleKind::FutureDate => check_text(value, |text| {
                parse_date(text).is_some_and(|date| date >= today())
            }),
            RuleKind::PastDate => check_text(value, |text| {
                parse_date(text).is_some_and(|date| date <= today())
            }),
            RuleKind::ValidDate => check_text(value, |text| parse_date(text).is_some()),
            RuleKind::ValidTime => check_text(value, |text| TIME_REGEX.is_match(text)),
            RuleKind::Phone => check_text(value, |text| {
                let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                PHONE_REGEX.is_match(&stripped)
            }),
            RuleKind::Url => check_text(value, |text| url::Url::parse(text).is_ok()),
            RuleKind::Numeric => !matches!(coerce_number(value), Coerced::NotNumeric),
            RuleKind::Min { min } => match coerce_number(value) {
                Coerced::Empty => true,
                Coerced::Num(n) => n >= *min,
                Coerced::NotNumeric => false,
            },
            RuleKind::Max { max } => match coerce_number(value) {
                Coerced::Empty => true,
                Coerced::Num(n) => n <= *max,
                Coerced::NotNumeric => false,
            },
            RuleKind::FileSize { max_mb } => match value.as_file() {
                Some(meta) => (meta.size as f64) <= max_mb * 1024.0 * 1024.0,
                None => true,
            },
            RuleKind::FileType { allowed } => match value.as_file() {
                Some(meta) => allowed.iter().any(|mime| mime == &meta.mime),
                None => true,
            },
            RuleKind::Custom { predicate } => predicate(value, form),
        }
    }
}

/// Applies a text check, passing vacuously on blank or non-text values.
fn check_text(value: &FieldValue, check: impl Fn(&str) -> bool) -> bool {
    if value.is_blank() {
        return true;
    }
    match value.as_text() {
        Some(text) => check(text),
        None => true,
    }
}

fn check_min_length(value: &FieldValue, min: usize) -> bool {
    if value.is_blank() {
        return true;
    }
    match value {
        FieldValue::Text(text) => text.chars().count() >= min,
        FieldValue::List(items) => items.len() >= min,
        _ => true,
    }
}

fn check_max_length(value: &FieldValue, max: usize) -> bool {
    match value {
        FieldValue::Text(text) => text.chars().count() <= max,
        FieldValue::List(items) => items.len() <= max,
        _ => true,
    }
}

fn check_password(text: &str) -> bool {
    text.chars().count() >= 8
        && text.chars().any(|c| c.is_ascii_lowercase())
        && text.chars().any(|c| c.is_ascii_uppercase())
        && text.chars().any(|c| c.is_ascii_digit())
}

enum Coerced {
    /// Nullish: no value to compare. `0` is NOT nullish.
    Empty,
    Num(f64),
    NotNumeric,
}

fn coerce_number(value: &FieldValue) -> Coerced {
    match value {
        FieldValue::Null => Coerced::Empty,
        FieldValue::Number(n) => Coerced::Num(*n),
        FieldValue::Text(text) if text.trim().is_empty() => Coerced::Empty,
        FieldValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .map(Coerced::Num)
            .unwrap_or(Coerced::NotNumeric),
        _ => Coerced::NotNumeric,
    }
}

/// Accepts ISO dates, RFC 3339 timestamps, and local timestamps without an
/// offset. Anything else is not a date.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.date_naive());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|instant| instant.date())
}

/// Date rules compare at day granularity in local time, and today passes
/// both `past_date` and `future_date`.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Renders a numeric bound without a trailing `.0` for whole numbers.
fn format_bound(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Fails on null, text that is empty after trimming, and empty lists.
/// `0` and `false` pass; emptiness is this rule's job alone.
///
/// # Examples
///
/// ```
/// let rule = required();
/// assert!(!rule.check(&FieldValue::from("   "), &FormData::new()));
/// assert!(rule.check(&FieldValue::from(0), &FormData::new()));
/// ```
pub fn required() -> Rule {
    Rule::new(RuleKind::Required)
}

/// Minimum character count for text, element count for lists.
/// Blank values pass; pair with `required` to reject emptiness.
pub fn min_length(min: usize) -> Rule {
    Rule::new(RuleKind::MinLength { min })
}

/// Maximum character count for text, element count for lists.
pub fn max_length(max: usize) -> Rule {
    Rule::new(RuleKind::MaxLength { max })
}

/// Email shape check: something@something.something, no whitespace.
pub fn email() -> Rule {
    Rule::new(RuleKind::Email)
}

/// At least 8 characters with one lowercase, one uppercase, and one digit.
pub fn password() -> Rule {
    Rule::new(RuleKind::Password)
}

/// Equality against the named sibling field. A blank value passes; a
/// missing sibling fails.
pub fn confirm_password(field: impl Into<String>) -> Rule {
    Rule::new(RuleKind::ConfirmPassword {
        field: field.into(),
    })
}

/// Date must be today or later (local time, day granularity).
pub fn future_date() -> Rule {
    Rule::new(RuleKind::FutureDate)
}

/// Date must be today or earlier (local time, day granularity).
pub fn past_date() -> Rule {
    Rule::new(RuleKind::PastDate)
}

/// Value must parse as a date; see `parse_date` for accepted shapes.
pub fn valid_date() -> Rule {
    Rule::new(RuleKind::ValidDate)
}

/// 24-hour `HH:MM` time, single-digit hour allowed.
pub fn valid_time() -> Rule {
    Rule::new(RuleKind::ValidTime)
}

/// Vietnamese mobile number: `(+84|84|0)` then a 3/5/7/8/9 network digit
/// and 8 more digits. Whitespace is stripped first.
pub fn phone() -> Rule {
    Rule::new(RuleKind::Phone)
}

/// Must parse as an absolute URL.
pub fn url() -> Rule {
    Rule::new(RuleKind::Url)
}

/// Numbers pass; text must parse as a number; nullish passes.
pub fn numeric() -> Rule {
    Rule::new(RuleKind::Numeric)
}

/// Numeric lower bound, inclusive. Nullish passes, `0` is compared.
pub fn min(bound: impl Into<f64>) -> Rule {
    Rule::new(RuleKind::Min { min: bound.into() })
}

/// Numeric upper bound, inclusive.
pub fn max(bound: impl Into<f64>) -> Rule {
    Rule::new(RuleKind::Max { max: bound.into() })
}

/// Maximum file size in megabytes. Non-file values pass.
pub fn file_size(max_mb: impl Into<f64>) -> Rule {
    Rule::new(RuleKind::FileSize {
        max_mb: max_mb.into(),
    })
}

/// Allowed MIME types, exact match. Non-file values pass.
pub fn file_type<I, S>(allowed: I) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Rule::new(RuleKind::FileType {
        allowed: allowed.into_iter().map(Into::into).collect(),
    })
}

/// Escape hatch: any predicate over `(value, form)`, failing with the
/// given message key. The engine never catches a panicking predicate;
/// that is an authoring bug and propagates to the host.
///
/// # Examples
///
/// ```
/// let adult = custom(
///     |value, _form| value.as_number().map(|n| n >= 18.0).unwrap_or(false),
///     "validation.adult",
/// );
/// assert!(adult.check(&FieldValue::from(21), &FormData::new()));
/// ```
pub fn custom<F>(predicate: F, message: impl Into<String>) -> Rule
where
    F: Fn(&FieldValue, &FormData) -> bool + Send + Sync + 'static,
{
    Rule::new(RuleKind::Custom {
        predicate: Arc::new(predicate),
    })
    .with_message(message)
}

//! Predefined Form Schemas
//!
//! The application's known forms, expressed purely as rule-factory calls.
//! These encode real product requirements, so their composition is part of
//! the public surface. Constructors return fresh values; sessions take
//! owned copies anyway, so there is nothing worth caching.

use crate::rules::{
    confirm_password, email, file_size, file_type, future_date, max_length, min_length, password,
    past_date, phone, required, valid_date, valid_time,
};
use crate::schema::Schema;

const IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Email + password sign-in.
pub fn login() -> Schema {
    Schema::new()
        .field("email", [required(), email()])
        .field("password", [required()])
}

/// Account creation: display name, email, and a confirmed password
/// meeting the 8+ mixed-case-plus-digit policy.
pub fn register() -> Schema {
    Schema::new()
        .field("name", [required(), min_length(2), max_length(50)])
        .field("email", [required(), email()])
        .field("password", [required(), password()])
        .field(
            "confirm_password",
            [required(), confirm_password("password")],
        )
}

/// Profile editing. Phone and birthday are optional; when present the
/// phone must be a Vietnamese mobile number and the birthday a past date.
pub fn profile() -> Schema {
    Schema::new()
        .field("name", [required(), min_length(2), max_length(50)])
        .field("email", [required(), email()])
        .field("phone", [phone()])
        .field("birthday", [valid_date(), past_date()])
        .field("bio", [max_length(500)])
        .field("avatar", [file_size(5), file_type(IMAGE_TYPES)])
}

/// A journal memory: titled, dated in the past (today included), with
/// optional photos.
pub fn memory() -> Schema {
    Schema::new()
        .field("title", [required(), min_length(3), max_length(100)])
        .field("content", [required(), max_length(2000)])
        .field("date", [required(), valid_date(), past_date()])
        .field("location", [max_length(200)])
        .field("photos", [file_size(10), file_type(IMAGE_TYPES)])
}

/// A reminder: dated today or later, with an optional HH:MM time.
pub fn reminder() -> Schema {
    Schema::new()
        .field("title", [required(), min_length(3), max_length(100)])
        .field("date", [required(), valid_date(), future_date()])
        .field("time", [valid_time()])
        .field("description", [max_length(500)])
}

/// A blog post: long-form content of at least 50 characters, an optional
/// cover image, at most ten tags.
pub fn blog() -> Schema {
    Schema::new()
        .field("title", [required(), min_length(5), max_length(200)])
        .field("content", [required(), min_length(50)])
        .field("cover_image", [file_size(5), file_type(IMAGE_TYPES)])
        .field("tags", [max_length(10)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::validate_form;
    use crate::value::{FieldValue, FormData};
    use chrono::{Duration, Local};

    fn form(entries: &[(&str, &str)]) -> FormData {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), FieldValue::from(*value)))
            .collect()
    }

    fn date_offset(days: i64) -> String {
        (Local::now().date_naive() + Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn test_login_accepts_credentials() {
        let good = form(&[("email", "a@b.co"), ("password", "anything")]);
        assert!(validate_form(&good, &login(), None).is_valid);

        let report = validate_form(&form(&[("email", "nope")]), &login(), None);
        assert_eq!(report.error("email"), Some("validation.email"));
        assert_eq!(report.error("password"), Some("validation.required"));
    }

    #[test]
    fn test_register_enforces_password_policy_and_match() {
        let report = validate_form(
            &form(&[
                ("name", "Ana"),
                ("email", "ana@example.com"),
                ("password", "weakpass"),
                ("confirm_password", "weakpass"),
            ]),
            &register(),
            None,
        );
        assert_eq!(report.error("password"), Some("validation.password"));

        let report = validate_form(
            &form(&[
                ("name", "Ana"),
                ("email", "ana@example.com"),
                ("password", "Str0ngPass"),
                ("confirm_password", "Str0ngPas"),
            ]),
            &register(),
            None,
        );
        assert_eq!(
            report.error("confirm_password"),
            Some("validation.confirmPassword")
        );

        let ok = form(&[
            ("name", "Ana"),
            ("email", "ana@example.com"),
            ("password", "Str0ngPass"),
            ("confirm_password", "Str0ngPass"),
        ]);
        assert!(validate_form(&ok, &register(), None).is_valid);
    }

    #[test]
    fn test_memory_title_bounds() {
        let mut entries = form(&[("content", "we met"), ("date", &date_offset(-7))]);
        entries.insert("title".to_string(), FieldValue::from("ab"));
        let report = validate_form(&entries, &memory(), None);
        assert_eq!(report.error("title"), Some("validation.minLength"));

        entries.insert("title".to_string(), FieldValue::from("a".repeat(101)));
        let report = validate_form(&entries, &memory(), None);
        assert_eq!(report.error("title"), Some("validation.maxLength"));

        entries.insert("title".to_string(), FieldValue::from("First trip"));
        assert!(validate_form(&entries, &memory(), None).is_valid);
    }

    #[test]
    fn test_memory_date_must_not_be_ahead() {
        let entries = form(&[
            ("title", "Picnic"),
            ("content", "sunny"),
            ("date", &date_offset(3)),
        ]);
        let report = validate_form(&entries, &memory(), None);
        assert_eq!(report.error("date"), Some("validation.pastDate"));
    }

    #[test]
    fn test_reminder_wants_a_future_date_and_sane_time() {
        let report = validate_form(
            &form(&[
                ("title", "Anniversary dinner"),
                ("date", &date_offset(-1)),
                ("time", "25:00"),
            ]),
            &reminder(),
            None,
        );
        assert_eq!(report.error("date"), Some("validation.futureDate"));
        assert_eq!(report.error("time"), Some("validation.invalidTime"));

        let ok = form(&[
            ("title", "Anniversary dinner"),
            ("date", &date_offset(0)),
            ("time", "19:30"),
        ]);
        assert!(validate_form(&ok, &reminder(), None).is_valid);
    }

    #[test]
    fn test_blog_needs_substantial_content() {
        let report = validate_form(
            &form(&[("title", "Our year"), ("content", "too short")]),
            &blog(),
            None,
        );
        assert_eq!(report.error("content"), Some("validation.minLength"));

        let ok = form(&[
            ("title", "Our year"),
            (
                "content",
                "A retrospective long enough to clear the fifty character floor.",
            ),
        ]);
        assert!(validate_form(&ok, &blog(), None).is_valid);
    }

    #[test]
    fn test_profile_optional_fields_stay_quiet_when_empty() {
        let minimal = form(&[("name", "An"), ("email", "an@example.com")]);
        assert!(validate_form(&minimal, &profile(), None).is_valid);

        let report = validate_form(
            &form(&[
                ("name", "An"),
                ("email", "an@example.com"),
                ("phone", "12345"),
                ("birthday", &date_offset(30)),
            ]),
            &profile(),
            None,
        );
        assert_eq!(report.error("phone"), Some("validation.phone"));
        assert_eq!(report.error("birthday"), Some("validation.pastDate"));
    }
}

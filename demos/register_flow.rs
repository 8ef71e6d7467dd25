// Example walking a register form through its validation lifecycle
//
// Shows the session handlers a UI would wire up: blur validation with
// touched gating, debounced input validation, submit, and runtime schema
// mutation, with messages resolved through the built-in English catalog.

use formguard::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn draft(entries: &[(&str, &str)]) -> FormData {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), FieldValue::from(*value)))
        .collect()
}

fn show(session: &FormSession, fields: &[&str]) {
    for field in fields {
        match session.visible_error(field) {
            Some(message) => println!("  {:<18} !! {}", field, message),
            None => println!("  {:<18} ok", field),
        }
    }
}

#[tokio::main]
async fn main() {
    println!("=== Register Form Validation Demo ===\n");

    let fields = ["name", "email", "password", "confirm_password"];
    let session = FormSession::with_options(
        schemas::register(),
        SessionOptions::default().with_input(true),
    )
    .with_translator(Arc::new(MessageCatalog::english()));

    // A fresh form renders clean even though every field would fail.
    println!("Fresh form (nothing touched, nothing rendered):");
    show(&session, &fields);

    // The user tabs out of an empty email field.
    println!("\nBlur on empty email:");
    let form = draft(&[]);
    session
        .handle_field_blur("email", &FieldValue::from(""), &form)
        .unwrap();
    show(&session, &["email"]);

    // Typing again clears the error at once; validation waits out the
    // debounce window and then judges the trailing snapshot only.
    println!("\nTyping into email (debounced input validation):");
    for snapshot in ["a", "an", "ana@"] {
        session
            .handle_field_input("email", &FieldValue::from(snapshot), &form)
            .unwrap();
    }
    println!("  mid-burst:              error = {:?}", session.error("email"));
    tokio::time::sleep(DEFAULT_DEBOUNCE + Duration::from_millis(50)).await;
    println!("  after the quiet window: error = {:?}", session.error("email"));
    session
        .handle_field_input("email", &FieldValue::from("ana@example.com"), &form)
        .unwrap();
    tokio::time::sleep(DEFAULT_DEBOUNCE + Duration::from_millis(50)).await;
    println!("  finished address:       error = {:?}", session.error("email"));

    // Submit touches everything and reports overall validity.
    println!("\nSubmit with a weak password and a mismatched confirmation:");
    let form = draft(&[
        ("name", "Ana"),
        ("email", "ana@example.com"),
        ("password", "weakpass"),
        ("confirm_password", "other"),
    ]);
    let accepted = session.handle_form_submit(&form);
    println!("  accepted: {}", accepted);
    show(&session, &fields);

    println!("\nSubmit after fixing both:");
    let form = draft(&[
        ("name", "Ana"),
        ("email", "ana@example.com"),
        ("password", "Str0ngPass"),
        ("confirm_password", "Str0ngPass"),
    ]);
    let accepted = session.handle_form_submit(&form);
    println!("  accepted: {}", accepted);
    show(&session, &fields);

    // Fields can join and leave the schema while the session lives.
    println!("\nRuntime schema mutation (add a website field, then drop it):");
    session.add_field_validation("website", FieldRules::new([url()]));
    let with_site = draft(&[
        ("name", "Ana"),
        ("email", "ana@example.com"),
        ("password", "Str0ngPass"),
        ("confirm_password", "Str0ngPass"),
        ("website", "not a url"),
    ]);
    println!("  submit with bad website: {}", session.handle_form_submit(&with_site));
    show(&session, &["website"]);
    session.remove_field_validation("website").unwrap();
    println!("  submit after removal:    {}", session.handle_form_submit(&with_site));

    println!("\n=== Demo Complete ===");
}

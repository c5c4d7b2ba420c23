//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn user() -> User {
    User::new(
        UserId::new(7).expect("valid id"),
        Email::new("dodo@gmail.com").expect("valid email"),
        HashedPassword::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
        Role::Client,
    )
}

#[rstest]
#[case(0)]
#[case(-3)]
fn user_id_rejects_non_positive_values(#[case] raw: i64) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::NonPositiveId));
}

#[rstest]
#[case("42", 42)]
#[case("1", 1)]
fn user_id_parses_decimal_strings(#[case] raw: &str, #[case] expected: i64) {
    let id: UserId = raw.parse().expect("valid id");
    assert_eq!(id.get(), expected);
    assert_eq!(id.to_string(), raw);
}

#[rstest]
#[case("abc")]
#[case("")]
#[case("0")]
fn user_id_rejects_bad_strings(#[case] raw: &str) {
    assert!(raw.parse::<UserId>().is_err());
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("no-at-sign", UserValidationError::InvalidEmail)]
#[case("two@@signs", UserValidationError::InvalidEmail)]
#[case("a b@c.com", UserValidationError::InvalidEmail)]
#[case("@c.com", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Email::new(raw), Err(expected));
}

#[rstest]
fn email_trims_but_preserves_case() {
    let email = Email::new("  Go@Gmail.com ").expect("valid email");
    assert_eq!(email.as_ref(), "Go@Gmail.com");
    assert_ne!(email, Email::new("go@gmail.com").expect("valid email"));
}

#[rstest]
#[case("Client", Role::Client)]
#[case("owner", Role::Owner)]
#[case(" OWNER ", Role::Owner)]
fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(raw.parse::<Role>(), Ok(expected));
}

#[rstest]
fn role_rejects_unknown_tags() {
    let err = "Admin".parse::<Role>().expect_err("unknown role");
    assert!(err.to_string().contains("Admin"));
}

#[rstest]
fn hashed_password_debug_is_redacted() {
    let hash = HashedPassword::new("$argon2id$secret-material");
    assert!(!format!("{hash:?}").contains("secret-material"));
}

#[rstest]
fn with_email_keeps_hash_and_id(user: User) {
    let original_hash = user.password_hash().clone();
    let updated = user.with_email(Email::new("go@gmail.com").expect("valid email"));
    assert_eq!(updated.id().get(), 7);
    assert_eq!(updated.email().as_ref(), "go@gmail.com");
    assert_eq!(updated.password_hash(), &original_hash);
}

#[rstest]
fn with_password_hash_keeps_email(user: User) {
    let updated = user.with_password_hash(HashedPassword::new("$argon2id$new"));
    assert_eq!(updated.email().as_ref(), "dodo@gmail.com");
    assert_eq!(updated.password_hash().as_str(), "$argon2id$new");
}

#[rstest]
fn serialised_user_omits_password_hash(user: User) {
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({ "id": 7, "email": "dodo@gmail.com", "role": "Client" })
    );
}

#[rstest]
fn account_record_exposes_email(user: User) {
    let draft = AccountRecord::Draft(NewAccount::new(
        Email::new("new@b.com").expect("valid email"),
        HashedPassword::new("h"),
        Role::Owner,
    ));
    assert_eq!(draft.email().as_ref(), "new@b.com");
    assert_eq!(AccountRecord::Persisted(user).email().as_ref(), "dodo@gmail.com");
}

// tests/validation_tests.rs - Form validation rules for auth and user management

use catalog_proposals::web_app::model::{PasswordReset, RegisterData, UserPayload};
use catalog_proposals::web_app::validation::{
    password_checklist, validate_forgot_password, validate_login, validate_password_reset, validate_register,
    validate_user_form, PASSWORD_RULES,
};

const STRONG: &str = "Sup3r!secret";

fn register(password: &str, repeat: &str) -> RegisterData {
    RegisterData {
        name: "Ana Souza".to_string(),
        email: "ana@example.com".to_string(),
        phone: "+55 11 99999-0000".to_string(),
        password: password.to_string(),
        repeat_password: repeat.to_string(),
    }
}

#[test]
fn test_login_requires_valid_email_and_password() {
    assert!(validate_login("ana@example.com", "anything").is_ok());

    let errors = validate_login("", "").unwrap_err();
    assert_eq!(errors.get("email"), Some("Email is required"));
    assert_eq!(errors.get("password"), Some("Password is required"));

    let errors = validate_login("not-an-email", "x").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("email"), Some("Enter a valid email address"));
}

#[test]
fn test_forgot_password_only_checks_email() {
    assert!(validate_forgot_password("ana@example.com").is_ok());
    assert_eq!(
        validate_forgot_password("ana@").unwrap_err().first().map(|e| e.field),
        Some("email")
    );
}

#[test]
fn test_register_accepts_complete_form() {
    assert!(validate_register(&register(STRONG, STRONG)).is_ok());
}

#[test]
fn test_register_reports_first_failing_password_rule() {
    let errors = validate_register(&register("short", "short")).unwrap_err();
    assert_eq!(errors.get("password"), Some("Password needs at least 8 characters"));

    let errors = validate_register(&register("alllowercase1!", "alllowercase1!")).unwrap_err();
    assert_eq!(errors.get("password"), Some("Password needs one uppercase letter"));

    let errors = validate_register(&register("NoDigitsHere!", "NoDigitsHere!")).unwrap_err();
    assert_eq!(errors.get("password"), Some("Password needs one number"));
}

#[test]
fn test_register_mismatch_lands_on_repeat_field() {
    let errors = validate_register(&register(STRONG, "Sup3r!secreT")).unwrap_err();
    assert_eq!(errors.get("password"), None);
    assert_eq!(errors.get("repeat_password"), Some("Passwords do not match"));
}

#[test]
fn test_register_errors_follow_form_order() {
    let data = RegisterData::default();
    let errors = validate_register(&data).unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["name", "email", "phone", "password"]);
}

#[test]
fn test_password_checklist_tracks_each_rule() {
    let checklist = password_checklist("abcDEF");
    assert_eq!(checklist.len(), PASSWORD_RULES.len());
    let met: Vec<bool> = checklist.iter().map(|(_, ok)| *ok).collect();
    assert_eq!(met, vec![false, true, true, false, false]);

    assert!(password_checklist(STRONG).iter().all(|(_, ok)| *ok));
}

#[test]
fn test_password_reset_rules() {
    let mut reset = PasswordReset {
        email: "ana@example.com".to_string(),
        token: "t0k".to_string(),
        password: STRONG.to_string(),
        password_confirmation: STRONG.to_string(),
    };
    assert!(validate_password_reset(&reset).is_ok());

    reset.password_confirmation = "different".to_string();
    assert_eq!(
        validate_password_reset(&reset).unwrap_err().get("password_confirmation"),
        Some("Passwords do not match")
    );
}

#[test]
fn test_user_form_password_optional_when_editing() {
    let payload = UserPayload {
        name: "Bia".to_string(),
        email: "bia@example.com".to_string(),
        ..UserPayload::default()
    };
    assert!(validate_user_form(&payload, false).is_ok());
    assert_eq!(
        validate_user_form(&payload, true).unwrap_err().get("password"),
        Some("Password is required")
    );

    let with_password = UserPayload {
        password: Some(STRONG.to_string()),
        password_confirmation: None,
        ..payload
    };
    assert_eq!(
        validate_user_form(&with_password, false).unwrap_err().get("password_confirmation"),
        Some("Passwords do not match")
    );
}

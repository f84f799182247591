// web_app/validation.rs - Client-side form validation
//
// Every form is checked before any network call. Errors are keyed by the
// form field they belong to so the view can show them inline.

use std::sync::LazyLock;

use regex::Regex;

use crate::web_app::model::{PasswordReset, RegisterData, UserPayload};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Errors in the order the fields appear on the form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First message for `field`, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// One line of the password strength checklist
#[derive(Clone, Copy, Debug)]
pub struct PasswordRule {
    pub label: &'static str,
    pub check: fn(&str) -> bool,
}

pub const PASSWORD_RULES: [PasswordRule; 5] = [
    PasswordRule {
        label: "At least 8 characters",
        check: |p| p.chars().count() >= MIN_PASSWORD_LEN,
    },
    PasswordRule {
        label: "One uppercase letter",
        check: |p| p.chars().any(char::is_uppercase),
    },
    PasswordRule {
        label: "One lowercase letter",
        check: |p| p.chars().any(char::is_lowercase),
    },
    PasswordRule {
        label: "One number",
        check: |p| p.chars().any(|c| c.is_ascii_digit()),
    },
    PasswordRule {
        label: "One special character",
        check: |p| p.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
    },
];

/// Checklist state for the live password indicator
pub fn password_checklist(password: &str) -> Vec<(&'static str, bool)> {
    PASSWORD_RULES
        .iter()
        .map(|rule| (rule.label, (rule.check)(password)))
        .collect()
}

fn check_password(errors: &mut FieldErrors, field: &'static str, password: &str) {
    if password.is_empty() {
        errors.push(field, "Password is required");
    } else if let Some(rule) = PASSWORD_RULES.iter().find(|rule| !(rule.check)(password)) {
        errors.push(field, format!("Password needs {}", rule.label.to_lowercase()));
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.trim().is_empty() {
        errors.push("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.push("email", "Enter a valid email address");
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(field, message);
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, email);
    if password.is_empty() {
        errors.push("password", "Password is required");
    }
    errors.into_result()
}

pub fn validate_forgot_password(email: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, email);
    errors.into_result()
}

pub fn validate_register(data: &RegisterData) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    require(&mut errors, "name", &data.name, "Name is required");
    check_email(&mut errors, &data.email);
    require(&mut errors, "phone", &data.phone, "Phone is required");
    check_password(&mut errors, "password", &data.password);
    if data.repeat_password != data.password {
        errors.push("repeat_password", "Passwords do not match");
    }
    errors.into_result()
}

pub fn validate_password_reset(reset: &PasswordReset) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_password(&mut errors, "password", &reset.password);
    if reset.password_confirmation != reset.password {
        errors.push("password_confirmation", "Passwords do not match");
    }
    errors.into_result()
}

/// Admin create/edit dialog; a password is only mandatory when creating
pub fn validate_user_form(payload: &UserPayload, creating: bool) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    require(&mut errors, "name", &payload.name, "Name is required");
    check_email(&mut errors, &payload.email);

    match payload.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => {
            check_password(&mut errors, "password", password);
            if payload.password_confirmation.as_deref() != Some(password) {
                errors.push("password_confirmation", "Passwords do not match");
            }
        }
        None if creating => errors.push("password", "Password is required"),
        None => {}
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("  ana@example.com "));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example@x.com"));
        assert!(!is_valid_email("@x.com"));
    }

    #[test]
    fn test_checklist_reports_each_rule() {
        let checklist = password_checklist("abc");
        assert_eq!(checklist.len(), 5);
        assert!(!checklist[0].1);
        assert!(!checklist[1].1);
        assert!(checklist[2].1);

        assert!(password_checklist("Secret#12").iter().all(|(_, ok)| *ok));
    }

    #[test]
    fn test_invalid_email_reported_once() {
        let err = validate_forgot_password("nope").unwrap_err();
        assert_eq!(err.get("email"), Some("Enter a valid email address"));
        assert_eq!(err.len(), 1);
    }
}

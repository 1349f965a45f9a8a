//! 表单校验模块
//!
//! Field rules enforced before any request leaves the browser. A failed
//! check blocks submission; the messages are shown under the offending input.

use crate::{
    CreateStoreRequest, CreateUserRequest, LoginRequest, RecordId, RegisterRequest, Role,
    UpdatePasswordRequest,
};
use regex::Regex;
use std::sync::LazyLock;

pub const NAME_MIN_CHARS: usize = 20;
pub const NAME_MAX_CHARS: usize = 60;
pub const STORE_NAME_MAX_CHARS: usize = 60;
pub const ADDRESS_MAX_CHARS: usize = 400;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 16;
/// At least one of these must appear in a password.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Address,
    Password,
    Role,
    OwnerId,
}

/// Field errors in the order they were found. At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<(Field, &'static str)>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&mut self, field: Field, outcome: Option<&'static str>) {
        if let Some(message) = outcome {
            if self.get(field).is_none() {
                self.0.push((field, message));
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, m)| *m)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|(_, m)| *m)
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

// =========================================================
// Field rules
// =========================================================

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn check_full_name(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        Some("Full name is required")
    } else if char_len(value) < NAME_MIN_CHARS {
        Some("Name must be at least 20 characters")
    } else if char_len(value) > NAME_MAX_CHARS {
        Some("Name must not exceed 60 characters")
    } else {
        None
    }
}

pub fn check_store_name(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        Some("Store name is required")
    } else if char_len(value) > STORE_NAME_MAX_CHARS {
        Some("Store name must not exceed 60 characters")
    } else {
        None
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

/// `invalid` differs between the sign-in and sign-up screens.
pub fn check_email(value: &str, invalid: &'static str) -> Option<&'static str> {
    if blank(value) {
        Some("Email is required")
    } else if !is_valid_email(value) {
        Some(invalid)
    } else {
        None
    }
}

pub fn check_optional_address(value: &str) -> Option<&'static str> {
    if char_len(value.trim()) > ADDRESS_MAX_CHARS {
        Some("Address must not exceed 400 characters")
    } else {
        None
    }
}

pub fn check_required_address(value: &str) -> Option<&'static str> {
    if blank(value) {
        Some("Address is required")
    } else {
        check_optional_address(value)
    }
}

/// Strength rules for new passwords (registration, password change, admin
/// user creation).
pub fn check_new_password(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some("Password is required")
    } else if char_len(value) < PASSWORD_MIN_CHARS {
        Some("Password must be at least 8 characters")
    } else if char_len(value) > PASSWORD_MAX_CHARS {
        Some("Password must not exceed 16 characters")
    } else if !value.chars().any(|c| c.is_ascii_uppercase())
        || !value.chars().any(|c| PASSWORD_SPECIALS.contains(c))
    {
        Some("Password must contain at least one uppercase letter and one special character")
    } else {
        None
    }
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// =========================================================
// Forms
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Email, check_email(&self.email, "Invalid email address"));
        errors.check(
            Field::Password,
            self.password.is_empty().then_some("Password is required"),
        );
        errors.finish(|| LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Name, check_full_name(&self.name));
        errors.check(
            Field::Email,
            check_email(&self.email, "Please enter a valid email address"),
        );
        errors.check(Field::Address, check_optional_address(&self.address));
        errors.check(Field::Password, check_new_password(&self.password));
        errors.finish(|| RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            address: optional_text(&self.address),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordForm {
    pub password: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<UpdatePasswordRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Password, check_new_password(&self.password));
        errors.finish(|| UpdatePasswordRequest {
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateUserForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub password: String,
    pub role: Option<Role>,
}

impl CreateUserForm {
    pub fn validate(&self) -> Result<CreateUserRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Name, check_full_name(&self.name));
        errors.check(
            Field::Email,
            check_email(&self.email, "Please enter a valid email address"),
        );
        errors.check(Field::Address, check_optional_address(&self.address));
        errors.check(Field::Password, check_new_password(&self.password));
        errors.check(Field::Role, self.role.is_none().then_some("Role is required"));
        match self.role {
            Some(role) if errors.is_empty() => Ok(CreateUserRequest {
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                address: optional_text(&self.address),
                password: self.password.clone(),
                role,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateStoreForm {
    pub name: String,
    pub email: String,
    pub address: String,
    /// Free text from the input; blank means "no owner yet".
    pub owner_id: String,
}

impl CreateStoreForm {
    pub fn validate(&self) -> Result<CreateStoreRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Name, check_store_name(&self.name));
        errors.check(
            Field::Email,
            check_email(&self.email, "Please enter a valid email address"),
        );
        errors.check(Field::Address, check_required_address(&self.address));

        let owner_id = match optional_text(&self.owner_id) {
            None => None,
            Some(raw) => match raw.parse::<RecordId>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    errors.check(Field::OwnerId, Some("Owner ID must be a positive number"));
                    None
                }
            },
        };

        errors.finish(|| CreateStoreRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            owner_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_NAME: &str = "Alexandra Montgomery-Smith";

    fn register(name: &str, email: &str, address: &str, password: &str) -> RegisterForm {
        RegisterForm {
            name: name.into(),
            email: email.into(),
            address: address.into(),
            password: password.into(),
        }
    }

    #[test]
    fn email_pattern_is_case_insensitive() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("First.Last+tag@Example.ORG"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a@b.c"));
    }

    #[test]
    fn password_rules_in_order() {
        assert_eq!(check_new_password(""), Some("Password is required"));
        assert_eq!(
            check_new_password("Ab1!"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(
            check_new_password("Abcdefghijklmnop!"),
            Some("Password must not exceed 16 characters")
        );
        assert_eq!(
            check_new_password("abcdefgh!"),
            Some("Password must contain at least one uppercase letter and one special character")
        );
        assert_eq!(
            check_new_password("Abcdefgh1"),
            Some("Password must contain at least one uppercase letter and one special character")
        );
        assert_eq!(check_new_password("Secret1!"), None);
    }

    #[test]
    fn name_length_bounds() {
        assert_eq!(check_full_name("   "), Some("Full name is required"));
        assert_eq!(
            check_full_name("Short Name"),
            Some("Name must be at least 20 characters")
        );
        assert_eq!(
            check_full_name(&"x".repeat(61)),
            Some("Name must not exceed 60 characters")
        );
        assert_eq!(check_full_name(&"x".repeat(20)), None);
        assert_eq!(check_full_name(&"x".repeat(60)), None);
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));

        let form = LoginForm {
            email: "bad".into(),
            password: "x".into(),
        };
        assert_eq!(
            form.validate().unwrap_err().get(Field::Email),
            Some("Invalid email address")
        );

        let req = LoginForm {
            email: " a@b.com ".into(),
            password: "Secret1!".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(req.email, "a@b.com");
    }

    #[test]
    fn register_builds_request_and_drops_blank_address() {
        let req = register(GOOD_NAME, "a@b.com", "  ", "Secret1!")
            .validate()
            .unwrap();
        assert_eq!(req.address, None);
        assert_eq!(req.name, GOOD_NAME);

        let errors = register("x", "nope", &"a".repeat(401), "weak")
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.get(Field::Address),
            Some("Address must not exceed 400 characters")
        );
        assert_eq!(
            errors.get(Field::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn create_user_needs_role() {
        let mut form = CreateUserForm {
            name: GOOD_NAME.into(),
            email: "owner@shop.com".into(),
            address: String::new(),
            password: "Secret1!".into(),
            role: None,
        };
        assert_eq!(
            form.validate().unwrap_err().get(Field::Role),
            Some("Role is required")
        );
        form.role = Some(Role::StoreOwner);
        assert_eq!(form.validate().unwrap().role, Role::StoreOwner);
    }

    #[test]
    fn create_store_parses_owner_id() {
        let mut form = CreateStoreForm {
            name: "Corner Shop".into(),
            email: "corner@shop.com".into(),
            address: "2 Side St".into(),
            owner_id: "12".into(),
        };
        assert_eq!(form.validate().unwrap().owner_id, Some(12));

        form.owner_id = String::new();
        assert_eq!(form.validate().unwrap().owner_id, None);

        form.owner_id = "abc".into();
        assert_eq!(
            form.validate().unwrap_err().get(Field::OwnerId),
            Some("Owner ID must be a positive number")
        );

        form.owner_id.clear();
        form.address.clear();
        assert_eq!(
            form.validate().unwrap_err().get(Field::Address),
            Some("Address is required")
        );
    }

    #[test]
    fn summary_joins_messages() {
        let errors = PasswordForm::default().validate().unwrap_err();
        assert_eq!(errors.to_string(), "Password is required");
    }
}

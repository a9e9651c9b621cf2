//! Field validators. Each one returns the first rule the value breaks.

use thiserror::Error;

pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*";

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 30;
const PASSWORD_MIN: usize = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be at least 2 characters")]
    NameTooShort(&'static str),
    #[error("{0} must be less than 30 characters")]
    NameTooLong(&'static str),
    #[error("{0} can only contain letters and spaces")]
    NameCharacters(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Email must be from one of these domains: {}", .0.join(", "))]
    DomainNotAllowed(Vec<String>),
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("Password must contain at least one number")]
    MissingDigit,
    #[error("Password must contain at least one special character")]
    MissingSpecial,
    #[error("Please confirm your password")]
    ConfirmationRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

pub fn validate_name(name: &str, label: &'static str) -> Result<(), FieldError> {
    let length = name.chars().count();
    if name.is_empty() {
        Err(FieldError::Required(label))
    } else if length < NAME_MIN {
        Err(FieldError::NameTooShort(label))
    } else if length > NAME_MAX {
        Err(FieldError::NameTooLong(label))
    } else if !name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        Err(FieldError::NameCharacters(label))
    } else {
        Ok(())
    }
}

pub fn validate_email(email: &str, allowed_domains: &[String]) -> Result<(), FieldError> {
    if email.is_empty() {
        return Err(FieldError::Required("Email"));
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FieldError::InvalidEmail);
    };
    if !allowed_domains.iter().any(|allowed| allowed == domain) {
        return Err(FieldError::DomainNotAllowed(allowed_domains.to_vec()));
    }
    if !looks_like_address(local, domain) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

/// local@host.tld with nothing empty and no whitespace
fn looks_like_address(local: &str, domain: &str) -> bool {
    let blank = |part: &str| part.is_empty() || part.chars().any(char::is_whitespace);
    if blank(local) || blank(domain) {
        return false;
    }
    domain
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        Err(FieldError::Required("Password"))
    } else if password.chars().count() < PASSWORD_MIN {
        Err(FieldError::PasswordTooShort)
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Err(FieldError::MissingUppercase)
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Err(FieldError::MissingLowercase)
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Err(FieldError::MissingDigit)
    } else if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        Err(FieldError::MissingSpecial)
    } else {
        Ok(())
    }
}

pub fn validate_confirmation(confirmation: &str, password: &str) -> Result<(), FieldError> {
    if confirmation.is_empty() {
        Err(FieldError::ConfirmationRequired)
    } else if confirmation != password {
        Err(FieldError::PasswordMismatch)
    } else {
        Ok(())
    }
}

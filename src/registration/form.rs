use std::collections::HashMap;

use super::{
    store::Record,
    validate::{
        validate_confirmation, validate_email, validate_name, validate_password, FieldError,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// used in the error messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
        }
    }

    #[must_use]
    pub const fn valid_message(self) -> &'static str {
        match self {
            Self::FirstName => "First name is valid",
            Self::LastName => "Last name is valid",
            Self::Email => "Email is valid",
            Self::Password => "Password meets requirements",
            Self::ConfirmPassword => "Passwords match",
        }
    }

    #[must_use]
    pub const fn requirements(self) -> Option<&'static str> {
        match self {
            Self::FirstName | Self::LastName => Some("Must contain only letters and spaces"),
            Self::Email => Some("Must be from one of the allowed domains"),
            Self::Password => Some(
                "Must contain at least 8 characters, one uppercase, one lowercase, one number and one special character",
            ),
            Self::ConfirmPassword => None,
        }
    }

    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

/// The five inputs with their current error and validity.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: HashMap<Field, String>,
    errors: HashMap<Field, FieldError>,
    valid: HashMap<Field, bool>,
    allowed_domains: Vec<String>,
}

impl FormState {
    #[must_use]
    pub fn new(allowed_domains: Vec<String>) -> Self {
        Self {
            allowed_domains,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// for binding to a text box, call [`FormState::revalidate`] after an edit
    pub fn value_mut(&mut self, field: Field) -> &mut String {
        self.values.entry(field).or_default()
    }

    /// a keystroke: store the value and check only that field
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.value_mut(field) = value.into();
        self.revalidate(field);
    }

    pub fn revalidate(&mut self, field: Field) {
        let result = self.check(field);
        self.record(field, result);
    }

    /// checks every field, true when all of them pass
    pub fn validate_all(&mut self) -> bool {
        let mut all_ok = true;
        for field in Field::ALL {
            let result = self.check(field);
            all_ok &= result.is_ok();
            self.record(field, result);
        }
        all_ok
    }

    #[must_use]
    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    #[must_use]
    pub fn is_valid(&self, field: Field) -> bool {
        self.valid.get(&field).copied().unwrap_or(false)
    }

    /// the register button is enabled only when this is true
    #[must_use]
    pub fn can_submit(&self) -> bool {
        Field::ALL.into_iter().all(|field| self.is_valid(field))
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.valid.clear();
    }

    /// what gets sent to the sheet, the confirmed password is stored
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record {
            first_name: self.value(Field::FirstName).to_string(),
            last_name: self.value(Field::LastName).to_string(),
            email: self.value(Field::Email).to_string(),
            password: self.value(Field::ConfirmPassword).to_string(),
        }
    }

    fn check(&self, field: Field) -> Result<(), FieldError> {
        let value = self.value(field);
        match field {
            Field::FirstName | Field::LastName => validate_name(value, field.label()),
            Field::Email => validate_email(value, &self.allowed_domains),
            Field::Password => validate_password(value),
            Field::ConfirmPassword => {
                validate_confirmation(value, self.value(Field::Password))
            }
        }
    }

    fn record(&mut self, field: Field, result: Result<(), FieldError>) {
        let valid = result.is_ok() && !self.value(field).is_empty();
        match result {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(e) => {
                self.errors.insert(field, e);
            }
        }
        self.valid.insert(field, valid);
    }
}

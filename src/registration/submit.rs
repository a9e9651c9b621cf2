use thiserror::Error;

use super::{
    form::FormState,
    store::{Record, RecordStore, StoreError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Registered,
    /// the sheet's copy of the row that has the same email
    AlreadyRegistered(Record),
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("An error occurred while checking registration status. Please try again later.")]
    Lookup(#[source] StoreError),
    #[error("An error occurred during registration. Please try again later.")]
    Insert(#[source] StoreError),
}

/// Look the email up and insert the record only if nobody has it yet.
///
/// Nothing stops a second submission from racing this one between the lookup
/// and the insert, so the sheet can still end up with duplicates.
pub fn register(store: &dyn RecordStore, record: &Record) -> Result<Outcome, RegistrationError> {
    let existing = store.fetch_records().map_err(RegistrationError::Lookup)?;
    if let Some(found) = existing.into_iter().find(|row| row.email == record.email) {
        log::info!("{} is already registered", record.email);
        return Ok(Outcome::AlreadyRegistered(found));
    }
    store.insert(record).map_err(RegistrationError::Insert)?;
    log::info!("registered {}", record.email);
    Ok(Outcome::Registered)
}

/// Applies a finished submission to the form and returns what to tell the user.
/// On failure the form is left as it was so the user can retry.
pub fn resolve(form: &mut FormState, result: &Result<Outcome, RegistrationError>) -> String {
    match result {
        Ok(Outcome::Registered) => {
            form.clear();
            "Registration successful!".to_string()
        }
        Ok(Outcome::AlreadyRegistered(found)) => {
            form.clear();
            format!(
                "{}, you are already registered with this email, {}",
                found.first_name, found.email
            )
        }
        Err(e) => {
            match std::error::Error::source(e) {
                Some(cause) => log::error!("{e} caused by: {cause}"),
                None => log::error!("{e}"),
            }
            e.to_string()
        }
    }
}

//! The spreadsheet-backed record store the form registers into.

use reqwest::{blocking::Client, header, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to the record store failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("record store answered with {0}")]
    Status(StatusCode),
}

/// one sheet row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(rename = "First-Name")]
    pub first_name: String,
    #[serde(rename = "Last-Name")]
    pub last_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
}

#[derive(Debug, Serialize)]
struct InsertRequest<'a> {
    data: [&'a Record; 1],
}

pub trait RecordStore: Send + Sync {
    fn fetch_records(&self) -> Result<Vec<Record>, StoreError>;

    fn insert(&self, record: &Record) -> Result<(), StoreError>;
}

/// Talks to the sheet over blocking HTTP, so only call it off the ui thread.
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: Client,
    endpoint: String,
}

impl SheetClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RecordStore for SheetClient {
    fn fetch_records(&self) -> Result<Vec<Record>, StoreError> {
        log::debug!("fetching records from {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send()?;
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }
        Ok(response.json()?)
    }

    fn insert(&self, record: &Record) -> Result<(), StoreError> {
        log::debug!("inserting record for {}", record.email);
        let response = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(&InsertRequest { data: [record] })
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status));
        }
        log::debug!("record store answered {status}: {}", response.text()?);
        Ok(())
    }
}

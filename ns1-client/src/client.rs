//! The NS1 API client and its endpoint wrappers.

use std::time::Duration;

use reqwest::{Client, Method};

use crate::error::Result;
use crate::http::NotFound;
use crate::model::{Record, Zone};

/// Production NS1 API endpoint.
pub(crate) const NS1_API_BASE: &str = "https://api.nsone.net/v1";

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// Typed client for the NS1 REST API.
///
/// Authenticates with an API key (`X-NSONE-Key` header). Each operation
/// sends or fetches exactly one domain object; transient failures are
/// retried internally with exponential backoff, everything else is
/// surfaced to the caller as an [`Ns1Error`](crate::Ns1Error).
pub struct Ns1Client {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
}

impl Ns1Client {
    /// Client against the production NS1 API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, NS1_API_BASE)
    }

    /// Client against a custom endpoint (self-hosted or test deployments).
    ///
    /// A trailing slash on `endpoint` is stripped.
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: create_http_client(),
            api_key: api_key.into(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a zone by name.
    ///
    /// # Errors
    ///
    /// [`Ns1Error::ZoneNotFound`](crate::Ns1Error::ZoneNotFound) when the
    /// zone does not exist.
    pub async fn get_zone(&self, zone: &str) -> Result<Zone> {
        let path = format!("/zones/{}", urlencoding::encode(zone));
        self.execute(
            Method::GET,
            &path,
            NotFound::Zone {
                zone: zone.to_string(),
            },
        )
        .await
    }

    /// Fetch a record by its (zone, domain, type) triplet.
    ///
    /// # Errors
    ///
    /// [`Ns1Error::RecordNotFound`](crate::Ns1Error::RecordNotFound) when
    /// the record does not exist.
    pub async fn get_record(&self, zone: &str, domain: &str, record_type: &str) -> Result<Record> {
        self.execute(
            Method::GET,
            &record_path(zone, domain, record_type),
            record_not_found(zone, domain, record_type),
        )
        .await
    }

    /// Create a record. Returns the record as stored by the server, with
    /// server-assigned fields (id, defaulted TTL) filled in.
    pub async fn create_record(&self, record: &Record) -> Result<Record> {
        self.execute_with_body(
            Method::PUT,
            &record_path(&record.zone, &record.domain, &record.record_type),
            record,
            record_not_found(&record.zone, &record.domain, &record.record_type),
        )
        .await
    }

    /// Update an existing record. Returns the record as stored by the server.
    pub async fn update_record(&self, record: &Record) -> Result<Record> {
        self.execute_with_body(
            Method::POST,
            &record_path(&record.zone, &record.domain, &record.record_type),
            record,
            record_not_found(&record.zone, &record.domain, &record.record_type),
        )
        .await
    }

    /// Delete a record by its (zone, domain, type) triplet.
    pub async fn delete_record(&self, zone: &str, domain: &str, record_type: &str) -> Result<()> {
        self.execute_discard(
            Method::DELETE,
            &record_path(zone, domain, record_type),
            record_not_found(zone, domain, record_type),
        )
        .await
    }
}

fn record_path(zone: &str, domain: &str, record_type: &str) -> String {
    format!(
        "/zones/{}/{}/{}",
        urlencoding::encode(zone),
        urlencoding::encode(domain),
        urlencoding::encode(record_type)
    )
}

fn record_not_found(zone: &str, domain: &str, record_type: &str) -> NotFound {
    NotFound::Record {
        zone: zone.to_string(),
        domain: domain.to_string(),
        record_type: record_type.to_string(),
    }
}

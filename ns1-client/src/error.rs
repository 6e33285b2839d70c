use serde::{Deserialize, Serialize};

/// Unified error type for all NS1 API operations.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — API rate limit exceeded
///
/// The client automatically retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum Ns1Error {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    ///
    /// This is a transient error and is automatically retried.
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    ///
    /// This is a transient error and is automatically retried.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API key is invalid or lacks permission (HTTP 401/403).
    InvalidCredentials {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified zone does not exist.
    ///
    /// This is the sentinel "not found" error for zone lookups; callers
    /// match on it to distinguish absence from genuine failures.
    ZoneNotFound {
        /// Zone name that was not found.
        zone: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified record does not exist.
    ///
    /// Sentinel "not found" error for record lookups.
    RecordNotFound {
        /// Zone the record was looked up in.
        zone: String,
        /// FQDN of the record.
        domain: String,
        /// Record type (e.g. `"A"`, `"CNAME"`).
        record_type: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    ///
    /// This is a transient error; the request should succeed after waiting.
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Any other non-success answer from the API.
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },
}

impl Ns1Error {
    /// Whether the error reflects expected conditions (missing resources,
    /// bad credentials) rather than an operational failure. Used for log
    /// levelling: `warn` for expected errors, `error` otherwise.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::ZoneNotFound { .. }
                | Self::RecordNotFound { .. }
        )
    }

    /// Whether the error is a "not found" sentinel (zone or record).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ZoneNotFound { .. } | Self::RecordNotFound { .. }
        )
    }
}

impl std::fmt::Display for Ns1Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => {
                write!(f, "[ns1] Network error: {detail}")
            }
            Self::Timeout { detail } => {
                write!(f, "[ns1] Request timeout: {detail}")
            }
            Self::InvalidCredentials { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "[ns1] Invalid credentials: {msg}")
                } else {
                    write!(f, "[ns1] Invalid credentials")
                }
            }
            Self::ZoneNotFound { zone, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "[ns1] Zone '{zone}' not found: {msg}")
                } else {
                    write!(f, "[ns1] Zone '{zone}' not found")
                }
            }
            Self::RecordNotFound {
                zone,
                domain,
                record_type,
                ..
            } => {
                write!(f, "[ns1] Record '{domain}/{record_type}' not found in zone '{zone}'")
            }
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "[ns1] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[ns1] Rate limited")
                }
            }
            Self::ParseError { detail } => {
                write!(f, "[ns1] Parse error: {detail}")
            }
            Self::Api { status, message } => {
                write!(f, "[ns1] API error (HTTP {status}): {message}")
            }
        }
    }
}

impl std::error::Error for Ns1Error {}

/// Convenience type alias for `Result<T, Ns1Error>`.
pub type Result<T> = std::result::Result<T, Ns1Error>;

//! HTTP request plumbing for [`Ns1Client`].
//!
//! All endpoint wrappers funnel through [`Ns1Client::execute`]: build the
//! request, send it with retries for transient failures, map the response
//! status to [`Ns1Error`], and parse the JSON body. Business errors
//! (missing records, bad credentials) are never retried.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::Ns1Client;
use crate::error::{Ns1Error, Result};

/// Maximum retry attempts for transient errors.
const MAX_RETRIES: u32 = 3;

/// Maximum number of bytes of a response body to include in debug logs.
const LOG_BODY_LIMIT: usize = 256;

/// NS1 error responses carry a single `message` field.
#[derive(Debug, serde::Deserialize)]
struct ApiMessage {
    message: String,
}

/// What a 404 on the current request means, used to produce the sentinel
/// "not found" error variants.
#[derive(Debug, Clone)]
pub(crate) enum NotFound {
    Zone {
        zone: String,
    },
    Record {
        zone: String,
        domain: String,
        record_type: String,
    },
}

impl NotFound {
    fn into_error(self, raw_message: Option<String>) -> Ns1Error {
        match self {
            Self::Zone { zone } => Ns1Error::ZoneNotFound { zone, raw_message },
            Self::Record {
                zone,
                domain,
                record_type,
            } => Ns1Error::RecordNotFound {
                zone,
                domain,
                record_type,
                raw_message,
            },
        }
    }
}

impl Ns1Client {
    /// Perform a body-less request and parse the JSON response.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        not_found: NotFound,
    ) -> Result<T> {
        let builder = self.request(method.clone(), path);
        self.run(builder, method, path, not_found).await
    }

    /// Perform a request carrying a JSON body and parse the JSON response.
    pub(crate) async fn execute_with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        not_found: NotFound,
    ) -> Result<T> {
        let builder = self.request(method.clone(), path).json(body);
        self.run(builder, method, path, not_found).await
    }

    /// Perform a body-less request, discarding the response body.
    ///
    /// DELETE responses may legitimately be empty, so nothing is parsed
    /// on success.
    pub(crate) async fn execute_discard(
        &self,
        method: Method,
        path: &str,
        not_found: NotFound,
    ) -> Result<()> {
        let builder = self.request(method.clone(), path);
        let (status, body) = dispatch_with_retry(builder, method.as_str(), path).await?;
        interpret_discard(status, &body, not_found)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.endpoint);
        self.client
            .request(method, url)
            .header("X-NSONE-Key", &self.api_key)
    }

    async fn run<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: Method,
        path: &str,
        not_found: NotFound,
    ) -> Result<T> {
        let (status, body) = dispatch_with_retry(builder, method.as_str(), path).await?;
        interpret::<T>(status, &body, not_found)
    }
}

/// Map a completed response to the caller's type or an [`Ns1Error`].
fn interpret<T: DeserializeOwned>(status: u16, body: &str, not_found: NotFound) -> Result<T> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|e| {
            log::error!("[ns1] JSON parse failed: {e}");
            log::error!("[ns1] Raw response: {}", truncate_for_log(body));
            Ns1Error::ParseError {
                detail: e.to_string(),
            }
        });
    }

    Err(interpret_failure(status, body, not_found))
}

/// Map a completed response to `Ok(())` or an [`Ns1Error`], ignoring any
/// success body.
fn interpret_discard(status: u16, body: &str, not_found: NotFound) -> Result<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    Err(interpret_failure(status, body, not_found))
}

/// Map a non-success response to the matching error.
fn interpret_failure(status: u16, body: &str, not_found: NotFound) -> Ns1Error {
    let raw_message = api_message(body);
    match status {
        404 => not_found.into_error(raw_message),
        401 | 403 => Ns1Error::InvalidCredentials { raw_message },
        _ => Ns1Error::Api {
            status,
            message: raw_message.unwrap_or_else(|| body.to_string()),
        },
    }
}

/// Extract the `message` field from an NS1 error body, if present.
fn api_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiMessage>(body)
        .ok()
        .map(|m| m.message)
}

/// Send a request once, mapping transport-level failures.
async fn dispatch(
    builder: RequestBuilder,
    method: &str,
    path: &str,
) -> Result<(u16, String)> {
    log::debug!("[ns1] {method} {path}");

    let response = builder.send().await.map_err(|e| {
        if e.is_timeout() {
            Ns1Error::Timeout {
                detail: e.to_string(),
            }
        } else {
            Ns1Error::NetworkError {
                detail: e.to_string(),
            }
        }
    })?;

    let status = response.status().as_u16();
    log::debug!("[ns1] Response Status: {status}");

    // Grab Retry-After before the response body is consumed.
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if status == 429 {
        let body = response.text().await.unwrap_or_default();
        log::warn!("[ns1] Rate limited (HTTP 429), retry_after={retry_after:?}");
        return Err(Ns1Error::RateLimited {
            retry_after,
            raw_message: Some(body),
        });
    }

    // 502/503/504 are treated as transient network failures.
    if matches!(status, 502..=504) {
        let body = response.text().await.unwrap_or_default();
        log::warn!("[ns1] Server error (HTTP {status})");
        return Err(Ns1Error::NetworkError {
            detail: format!("HTTP {status}: {body}"),
        });
    }

    let body = response.text().await.map_err(|e| Ns1Error::NetworkError {
        detail: format!("Failed to read response body: {e}"),
    })?;

    log::debug!("[ns1] Response Body: {}", truncate_for_log(&body));

    Ok((status, body))
}

/// Send a request, retrying transient failures with exponential backoff.
async fn dispatch_with_retry(
    builder: RequestBuilder,
    method: &str,
    path: &str,
) -> Result<(u16, String)> {
    let mut last_error = None;

    for attempt in 0..=MAX_RETRIES {
        // RequestBuilder is single-use; clone per attempt.
        let Some(req) = builder.try_clone() else {
            log::warn!("[ns1] Cannot clone request, disabling retry");
            return dispatch(builder, method, path).await;
        };

        match dispatch(req, method, path).await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < MAX_RETRIES && is_retryable(&e) => {
                let delay = retry_delay(&e, attempt);
                log::warn!(
                    "[ns1] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                    attempt + 1,
                    MAX_RETRIES,
                    delay.as_secs_f32(),
                    e
                );
                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or_else(|| Ns1Error::NetworkError {
        detail: "All retries exhausted with no error captured".to_string(),
    }))
}

/// Transient errors are worth retrying; business errors are not.
fn is_retryable(error: &Ns1Error) -> bool {
    matches!(
        error,
        Ns1Error::NetworkError { .. } | Ns1Error::Timeout { .. } | Ns1Error::RateLimited { .. }
    )
}

/// Honor `Retry-After` for rate limits (capped at 30s), otherwise back off
/// exponentially.
fn retry_delay(error: &Ns1Error, attempt: u32) -> Duration {
    if let Ns1Error::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// Exponential backoff: 100ms, 200ms, 400ms, ... capped at 10 seconds.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // keep 1 << attempt in range
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}

/// Truncate a response body for logging, keeping char boundaries intact.
fn truncate_for_log(s: &str) -> String {
    if s.len() <= LOG_BODY_LIMIT {
        return s.to_string();
    }
    let mut end = LOG_BODY_LIMIT;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn record_not_found() -> NotFound {
        NotFound::Record {
            zone: "example.com".to_string(),
            domain: "www.example.com".to_string(),
            record_type: "A".to_string(),
        }
    }

    // ---- interpret ----

    #[test]
    fn interpret_success_parses_body() {
        let body = r#"{"zone":"example.com","domain":"www.example.com","type":"A"}"#;
        let r: Record = interpret(200, body, record_not_found()).unwrap();
        assert_eq!(r.domain, "www.example.com");
    }

    #[test]
    fn interpret_malformed_success_body() {
        let result: Result<Record> = interpret(200, "not json", record_not_found());
        assert!(
            matches!(&result, Err(Ns1Error::ParseError { .. })),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn interpret_404_record() {
        let result: Result<Record> = interpret(
            404,
            r#"{"message": "record not found"}"#,
            record_not_found(),
        );
        assert!(
            matches!(&result, Err(Ns1Error::RecordNotFound { .. })),
            "unexpected result: {result:?}"
        );
        let Err(Ns1Error::RecordNotFound {
            zone,
            domain,
            record_type,
            raw_message,
        }) = result
        else {
            return;
        };
        assert_eq!(zone, "example.com");
        assert_eq!(domain, "www.example.com");
        assert_eq!(record_type, "A");
        assert_eq!(raw_message.as_deref(), Some("record not found"));
    }

    #[test]
    fn interpret_404_zone() {
        let result: Result<Record> = interpret(
            404,
            r#"{"message": "zone not found"}"#,
            NotFound::Zone {
                zone: "example.com".to_string(),
            },
        );
        assert!(
            matches!(&result, Err(Ns1Error::ZoneNotFound { zone, .. }) if zone == "example.com"),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn interpret_401_invalid_credentials() {
        let result: Result<Record> = interpret(
            401,
            r#"{"message": "unauthorized"}"#,
            record_not_found(),
        );
        assert!(
            matches!(&result, Err(Ns1Error::InvalidCredentials { raw_message: Some(m) }) if m == "unauthorized"),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn interpret_other_status_is_api_error() {
        let result: Result<Record> = interpret(
            400,
            r#"{"message": "invalid record type"}"#,
            record_not_found(),
        );
        assert!(
            matches!(&result, Err(Ns1Error::Api { .. })),
            "unexpected result: {result:?}"
        );
        let Err(Ns1Error::Api { status, message }) = result else {
            return;
        };
        assert_eq!(status, 400);
        assert_eq!(message, "invalid record type");
    }

    #[test]
    fn interpret_api_error_without_message_body() {
        let result: Result<Record> = interpret(500, "internal failure", record_not_found());
        assert!(
            matches!(&result, Err(Ns1Error::Api { status: 500, message }) if message == "internal failure"),
            "unexpected result: {result:?}"
        );
    }

    // ---- interpret_discard ----

    #[test]
    fn discard_accepts_empty_success_body() {
        assert!(interpret_discard(200, "", record_not_found()).is_ok());
    }

    #[test]
    fn discard_ignores_success_body_content() {
        assert!(interpret_discard(200, r#"{"message": "ok"}"#, record_not_found()).is_ok());
        assert!(interpret_discard(200, "not json", record_not_found()).is_ok());
    }

    #[test]
    fn discard_maps_404_to_sentinel() {
        let result = interpret_discard(
            404,
            r#"{"message": "record not found"}"#,
            record_not_found(),
        );
        assert!(
            matches!(&result, Err(Ns1Error::RecordNotFound { .. })),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn discard_maps_other_status_to_api_error() {
        let result = interpret_discard(500, "internal failure", record_not_found());
        assert!(
            matches!(&result, Err(Ns1Error::Api { status: 500, .. })),
            "unexpected result: {result:?}"
        );
    }

    // ---- is_retryable ----

    #[test]
    fn retryable_transient_variants() {
        assert!(is_retryable(&Ns1Error::NetworkError { detail: "x".into() }));
        assert!(is_retryable(&Ns1Error::Timeout { detail: "x".into() }));
        assert!(is_retryable(&Ns1Error::RateLimited {
            retry_after: None,
            raw_message: None,
        }));
    }

    #[test]
    fn not_retryable_business_errors() {
        assert!(!is_retryable(&Ns1Error::InvalidCredentials { raw_message: None }));
        assert!(!is_retryable(&Ns1Error::ZoneNotFound {
            zone: "x.com".into(),
            raw_message: None,
        }));
        assert!(!is_retryable(&Ns1Error::ParseError { detail: "x".into() }));
        assert!(!is_retryable(&Ns1Error::Api {
            status: 400,
            message: "x".into(),
        }));
    }

    // ---- delays ----

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(backoff_delay(0), Duration::from_millis(100));
        assert_eq!(backoff_delay(1), Duration::from_millis(200));
        assert_eq!(backoff_delay(3), Duration::from_millis(800));
        // 100 * 2^7 = 12800ms, capped to 10s
        assert_eq!(backoff_delay(7), Duration::from_millis(10_000));
    }

    #[test]
    fn rate_limit_delay_uses_retry_after() {
        let e = Ns1Error::RateLimited {
            retry_after: Some(5),
            raw_message: None,
        };
        assert_eq!(retry_delay(&e, 0), Duration::from_secs(5));
    }

    #[test]
    fn rate_limit_delay_capped_at_30s() {
        let e = Ns1Error::RateLimited {
            retry_after: Some(600),
            raw_message: None,
        };
        assert_eq!(retry_delay(&e, 0), Duration::from_secs(30));
    }

    // ---- truncate_for_log ----

    #[test]
    fn short_body_unchanged() {
        assert_eq!(truncate_for_log("hello"), "hello");
    }

    #[test]
    fn long_body_truncated() {
        let s = "a".repeat(LOG_BODY_LIMIT + 100);
        let out = truncate_for_log(&s);
        assert!(out.contains("... [truncated, total"));
        assert!(out.len() < s.len());
    }
}

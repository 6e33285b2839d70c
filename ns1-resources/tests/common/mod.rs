//! Shared helpers for live API tests.

#![allow(dead_code)]

use std::env;

use ns1_client::Ns1Client;
use ns1_resources::{AnswerState, RecordState, RecordType};

/// Skip the test when any of the named environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert a `Result` is `Ok` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique record name inside the test zone.
pub fn generate_test_domain(zone: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}.{}", &uuid.to_string()[..8], zone)
}

/// Client plus test zone, built from the environment.
pub struct TestContext {
    pub client: Ns1Client,
    pub zone: String,
}

impl TestContext {
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("NS1_APIKEY").ok()?;
        let zone = env::var("NS1_TEST_ZONE").ok()?;
        Some(Self {
            client: Ns1Client::new(api_key),
            zone,
        })
    }

    /// Fresh A-record state with one answer, on a unique test domain.
    pub fn a_record_state(&self) -> RecordState {
        let domain = generate_test_domain(&self.zone);
        let mut state = RecordState::new(&self.zone, domain, RecordType::A);
        state.ttl = Some(600);
        state.answers.push(AnswerState::new("192.0.2.1"));
        state
    }

    /// Best-effort removal of a test record.
    pub async fn cleanup_record(&self, state: &RecordState) {
        let _ = self
            .client
            .delete_record(&state.zone, &state.domain, state.record_type.as_str())
            .await;
    }
}

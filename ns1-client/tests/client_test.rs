//! Live API tests for the client.
//!
//! Run with:
//! ```bash
//! NS1_APIKEY=xxx NS1_TEST_ZONE=example.com \
//!     cargo test -p ns1-client --test client_test -- --ignored --nocapture --test-threads=1
//! ```

use std::env;

use ns1_client::{Answer, Ns1Client, Ns1Error, Record};

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

fn test_client() -> Option<(Ns1Client, String)> {
    let api_key = env::var("NS1_APIKEY").ok()?;
    let zone = env::var("NS1_TEST_ZONE").ok()?;
    Some((Ns1Client::new(api_key), zone))
}

fn unique_domain(zone: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}.{}", &uuid.to_string()[..8], zone)
}

#[tokio::test]
#[ignore]
async fn get_zone_returns_timers() {
    skip_if_no_credentials!("NS1_APIKEY", "NS1_TEST_ZONE");

    let (client, zone_name) = test_client().expect("failed to build test client");
    let zone = client.get_zone(&zone_name).await.expect("get_zone failed");
    assert_eq!(zone.zone, zone_name);
    assert!(zone.ttl > 0);
    assert!(!zone.dns_servers.is_empty());
}

#[tokio::test]
#[ignore]
async fn get_missing_zone_is_sentinel() {
    skip_if_no_credentials!("NS1_APIKEY");

    let (client, _) = test_client().expect("failed to build test client");
    let result = client.get_zone("does-not-exist.invalid").await;
    assert!(
        matches!(&result, Err(Ns1Error::ZoneNotFound { .. })),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
#[ignore]
async fn record_create_update_delete() {
    skip_if_no_credentials!("NS1_APIKEY", "NS1_TEST_ZONE");

    let (client, zone) = test_client().expect("failed to build test client");
    let domain = unique_domain(&zone);

    let mut record = Record::new(&zone, &domain, "A");
    record.ttl = Some(600);
    record.add_answer(Answer::new(vec!["192.0.2.1".to_string()]));

    let created = client.create_record(&record).await.expect("create failed");
    assert!(!created.id.is_empty());

    let mut updated = created.clone();
    updated.answers[0] = Answer::new(vec!["192.0.2.2".to_string()]);
    let after = client.update_record(&updated).await.expect("update failed");
    assert_eq!(after.answers[0].rdata, vec!["192.0.2.2"]);

    client
        .delete_record(&zone, &domain, "A")
        .await
        .expect("delete failed");

    let result = client.get_record(&zone, &domain, "A").await;
    assert!(
        matches!(&result, Err(Ns1Error::RecordNotFound { .. })),
        "unexpected result: {result:?}"
    );
}

//! # ns1-client
//!
//! A typed client for the [NS1](https://ns1.com/) DNS REST API, covering the
//! zone and record endpoints needed to manage DNS declaratively.
//!
//! ## TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ns1_client::{Answer, Ns1Client, Record};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Ns1Client::new("your-api-key");
//!
//!     let zone = client.get_zone("example.com").await?;
//!     println!("{} (ttl {})", zone.zone, zone.ttl);
//!
//!     let mut record = Record::new("example.com", "www.example.com", "A");
//!     record.add_answer(Answer::new(vec!["192.0.2.1".to_string()]));
//!     let created = client.create_record(&record).await?;
//!     println!("created {}", created.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Ns1Error>`](Ns1Error). Missing zones
//! and records surface as the sentinel variants
//! [`Ns1Error::ZoneNotFound`] and [`Ns1Error::RecordNotFound`], which
//! callers can match on directly (see [`Ns1Error::is_not_found`]).
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are
//! automatically retried with exponential backoff.

mod client;
mod error;
mod http;
mod model;

pub use client::Ns1Client;
pub use error::{Ns1Error, Result};
pub use model::{
    Answer, Filter, GEOREGIONS, Meta, MetaError, Record, Region, Zone, ZonePrimary, ZoneSecondary,
    ZoneSecondaryServer,
};

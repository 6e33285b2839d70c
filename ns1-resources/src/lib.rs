//! # ns1-resources
//!
//! Declarative resource layer over [`ns1_client`]: flat, typed state shapes
//! for DNS records and zones, converters between those shapes and the API's
//! nested domain model, and the CRUD handlers a configuration host calls to
//! reconcile declared state with the NS1 service.
//!
//! ## Resources
//!
//! - **Record** ([`RecordState`]) — full CRUD plus import via
//!   `zone/domain/type` identifiers. Answers, answer groups (regions) and
//!   the filter chain are converted both ways; metadata is validated with
//!   all failures reported in one combined error.
//! - **Zone** ([`ZoneState`]) — read-only data source exposing zone
//!   timers, nameservers and transfer configuration.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ns1_client::Ns1Client;
//! use ns1_resources::{record_create, AnswerState, RecordState, RecordType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Ns1Client::new("your-api-key");
//!
//!     let mut state = RecordState::new("example.com", "www.example.com", RecordType::A);
//!     state.answers.push(AnswerState::new("192.0.2.1"));
//!     record_create(&client, &mut state).await?;
//!     println!("created {}", state.id);
//!
//!     Ok(())
//! }
//! ```

mod error;
mod import;
mod record;
mod state;
mod zone;

pub use error::{Ns1Error, ResourceError, ResourceResult};
pub use import::{import_record_state, parse_import_id};
pub use record::{
    META_ERROR_SEPARATOR, record_create, record_delete, record_from_state,
    record_from_state_with_separator, record_read, record_to_state, record_update,
};
pub use state::{
    AnswerState, FilterState, RecordState, RecordType, RegionState, SecondaryState, ZoneState,
};
pub use zone::{zone_read, zone_to_state};

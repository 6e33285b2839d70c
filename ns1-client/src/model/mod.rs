//! NS1 domain model types.

mod meta;
mod record;
mod zone;

pub use meta::{GEOREGIONS, Meta, MetaError};
pub use record::{Answer, Filter, Record, Region};
pub use zone::{Zone, ZonePrimary, ZoneSecondary, ZoneSecondaryServer};

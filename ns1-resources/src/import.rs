//! Import of existing records by composite identifier.

use crate::error::{ResourceError, ResourceResult};
use crate::state::{RecordState, RecordType};

/// Parse a `zone/domain/type` import identifier into its parts.
///
/// # Errors
///
/// [`ResourceError::InvalidImportId`] carrying the actual slash count when
/// the identifier does not have exactly two slashes, and
/// [`ResourceError::InvalidRecordType`] when the third part is not a
/// supported record type.
pub fn parse_import_id(id: &str) -> ResourceResult<(String, String, RecordType)> {
    let parts: Vec<&str> = id.split('/').collect();
    if parts.len() != 3 {
        return Err(ResourceError::InvalidImportId(parts.len() - 1));
    }
    let record_type: RecordType = parts[2].parse()?;
    Ok((parts[0].to_string(), parts[1].to_string(), record_type))
}

/// Seed record state from an import identifier, ready for a read.
pub fn import_record_state(id: &str) -> ResourceResult<RecordState> {
    let (zone, domain, record_type) = parse_import_id(id)?;
    Ok(RecordState::new(zone, domain, record_type))
}

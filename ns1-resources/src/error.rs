//! Unified error type for the resource layer.

use thiserror::Error;

// Re-export the client error type
pub use ns1_client::Ns1Error;

/// Error produced while mapping state to the domain model or orchestrating
/// a CRUD operation.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// One or more validation failures, already joined into a single
    /// combined message.
    #[error("{0}")]
    Validation(String),

    /// The configured record type is not one this layer supports.
    #[error("unsupported record type: {0}")]
    InvalidRecordType(String),

    /// An import identifier did not have the `zone/domain/type` shape.
    /// Carries the number of slashes actually found.
    #[error("invalid record specifier: expecting 2 slashes (\"zone/domain/type\"), got {0}")]
    InvalidImportId(usize),

    /// A remote API error, passed through unmodified.
    #[error(transparent)]
    Client(#[from] Ns1Error),
}

impl ResourceError {
    /// Whether the underlying cause is a "not found" sentinel from the API.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_not_found())
    }
}

/// Convenience type alias for `Result<T, ResourceError>`.
pub type ResourceResult<T> = std::result::Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_id_message_names_format_and_slash_count() {
        let e = ResourceError::InvalidImportId(1);
        assert_eq!(
            e.to_string(),
            "invalid record specifier: expecting 2 slashes (\"zone/domain/type\"), got 1"
        );
    }

    #[test]
    fn client_error_passes_through_unmodified() {
        let inner = Ns1Error::Api {
            status: 400,
            message: "invalid record".to_string(),
        };
        let expected = inner.to_string();
        let e = ResourceError::from(inner);
        assert_eq!(e.to_string(), expected);
    }

    #[test]
    fn not_found_detection() {
        let e = ResourceError::from(Ns1Error::RecordNotFound {
            zone: "example.com".into(),
            domain: "www.example.com".into(),
            record_type: "A".into(),
            raw_message: None,
        });
        assert!(e.is_not_found());
        assert!(!ResourceError::InvalidImportId(3).is_not_found());
    }
}

//! Flat, typed state shapes.
//!
//! Hosts that drive this library persist each resource instance as a flat
//! map of primitive/list fields. These structs are the strongly typed
//! rendition of that shape: required identity fields, optional/computed
//! fields as `Option`s or defaults, nested collections as plain `Vec`s of
//! small structs.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResourceError;

/// Record types accepted by the record resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Alias,
    Afsdb,
    Cname,
    Dname,
    Hinfo,
    Mx,
    Naptr,
    Ns,
    Ptr,
    Rp,
    Spf,
    Srv,
    Txt,
}

impl RecordType {
    /// Uppercase wire name of the type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Alias => "ALIAS",
            Self::Afsdb => "AFSDB",
            Self::Cname => "CNAME",
            Self::Dname => "DNAME",
            Self::Hinfo => "HINFO",
            Self::Mx => "MX",
            Self::Naptr => "NAPTR",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Rp => "RP",
            Self::Spf => "SPF",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }

    /// Text-style types whose answers are a single rdata token rather than
    /// space-separated fields.
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::Txt | Self::Spf)
    }
}

impl FromStr for RecordType {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "ALIAS" => Ok(Self::Alias),
            "AFSDB" => Ok(Self::Afsdb),
            "CNAME" => Ok(Self::Cname),
            "DNAME" => Ok(Self::Dname),
            "HINFO" => Ok(Self::Hinfo),
            "MX" => Ok(Self::Mx),
            "NAPTR" => Ok(Self::Naptr),
            "NS" => Ok(Self::Ns),
            "PTR" => Ok(Self::Ptr),
            "RP" => Ok(Self::Rp),
            "SPF" => Ok(Self::Spf),
            "SRV" => Ok(Self::Srv),
            "TXT" => Ok(Self::Txt),
            _ => Err(ResourceError::InvalidRecordType(s.to_string())),
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_true() -> bool {
    true
}

/// One answer as declared in configuration: a space-joined rdata string
/// plus optional region tag and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerState {
    /// Space-joined rdata (for TXT/SPF records, the literal text).
    pub answer: String,

    /// Region (answer group) this answer belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Answer metadata as a flat string map.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl AnswerState {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            region: None,
            meta: BTreeMap::new(),
        }
    }
}

/// One answer group as declared in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionState {
    /// Region name, referenced from answers.
    pub name: String,

    /// Region metadata as a flat string map.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

/// One step of the filter chain as declared in configuration. List order
/// is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Filter type name.
    pub filter: String,

    /// Whether the filter is disabled but kept in the chain.
    #[serde(default)]
    pub disabled: bool,

    /// Free-form filter configuration.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, serde_json::Value>,
}

/// State of a single DNS record resource instance.
///
/// `zone`, `domain` and `record_type` are the record's immutable identity;
/// changing any of them means a different record. `id` and (when not
/// configured) `ttl` are computed from API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordState {
    /// Server-assigned record id (computed).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Zone the record lives in.
    pub zone: String,

    /// Fully qualified domain name of the record.
    pub domain: String,

    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// TTL in seconds; server-assigned when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    /// Record-level metadata as a flat string map.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,

    /// Target record this record aliases. Mutually exclusive with answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Whether EDNS client subnet data may be used. Defaults to `true`.
    #[serde(default = "default_true")]
    pub use_client_subnet: bool,

    /// Short-form answers: one string per answer, tokenized by record type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub short_answers: Vec<String>,

    /// Full-form answers with region tags and metadata.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerState>,

    /// Answer groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<RegionState>,

    /// Filter chain, in application order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterState>,
}

impl RecordState {
    /// Fresh state for the given identity triplet, everything else unset.
    pub fn new(
        zone: impl Into<String>,
        domain: impl Into<String>,
        record_type: RecordType,
    ) -> Self {
        Self {
            id: String::new(),
            zone: zone.into(),
            domain: domain.into(),
            record_type,
            ttl: None,
            meta: BTreeMap::new(),
            link: None,
            use_client_subnet: true,
            short_answers: Vec::new(),
            answers: Vec::new(),
            regions: Vec::new(),
            filters: Vec::new(),
        }
    }
}

/// One secondary server entry in the zone data source state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryState {
    /// IP address of the secondary.
    pub ip: String,

    /// Whether the secondary receives NOTIFY messages.
    pub notify: bool,

    /// Port the secondary listens on, when not the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Network ids the secondary is notified on (computed).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_ids: Vec<u32>,
}

/// State of the zone data source. Only `zone` is configured; everything
/// else is computed from the API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneState {
    /// Server-assigned zone id (computed).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Zone name to look up.
    pub zone: String,

    /// Default record TTL (computed).
    #[serde(default)]
    pub ttl: u32,

    /// SOA refresh interval (computed).
    #[serde(default)]
    pub refresh: u32,

    /// SOA retry interval (computed).
    #[serde(default)]
    pub retry: u32,

    /// SOA expiry interval (computed).
    #[serde(default)]
    pub expiry: u32,

    /// NXDOMAIN TTL (computed).
    #[serde(default)]
    pub nx_ttl: u32,

    /// Linked zone, if any (computed).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,

    /// Primary server IP when this zone is a secondary (computed).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub primary: String,

    /// Additional primary IPs when this zone is a secondary (computed).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_primaries: Vec<String>,

    /// Comma-joined nameserver list (computed).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dns_servers: String,

    /// SOA hostmaster contact (computed).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostmaster: String,

    /// Network ids the zone is published on (computed).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<u32>,

    /// Secondary servers when this zone is a primary (computed).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondaries: Vec<SecondaryState>,
}

impl ZoneState {
    /// Fresh state naming the zone to read.
    pub fn new(zone: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            zone: zone.into(),
            ttl: 0,
            refresh: 0,
            retry: 0,
            expiry: 0,
            nx_ttl: 0,
            link: String::new(),
            primary: String::new(),
            additional_primaries: Vec::new(),
            dns_servers: String::new(),
            hostmaster: String::new(),
            networks: Vec::new(),
            secondaries: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_round_trips_all_names() {
        let names = [
            "A", "AAAA", "ALIAS", "AFSDB", "CNAME", "DNAME", "HINFO", "MX", "NAPTR", "NS", "PTR",
            "RP", "SPF", "SRV", "TXT",
        ];
        for name in names {
            let t: RecordType = name.parse().unwrap();
            assert_eq!(t.as_str(), name);
        }
    }

    #[test]
    fn record_type_parse_is_case_insensitive() {
        let t: RecordType = "cname".parse().unwrap();
        assert_eq!(t, RecordType::Cname);
    }

    #[test]
    fn record_type_rejects_unknown() {
        let res = "LOC".parse::<RecordType>();
        assert!(
            matches!(&res, Err(ResourceError::InvalidRecordType(t)) if t == "LOC"),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn text_types() {
        assert!(RecordType::Txt.is_text());
        assert!(RecordType::Spf.is_text());
        assert!(!RecordType::A.is_text());
        assert!(!RecordType::Mx.is_text());
    }

    #[test]
    fn record_state_defaults() {
        let s = RecordState::new("example.com", "www.example.com", RecordType::A);
        assert!(s.use_client_subnet);
        assert!(s.id.is_empty());
        assert!(s.ttl.is_none());
    }

    #[test]
    fn record_state_serde_round_trip() {
        let mut s = RecordState::new("example.com", "www.example.com", RecordType::Mx);
        s.ttl = Some(300);
        s.answers.push(AnswerState::new("10 mx1.example.com"));
        s.filters.push(FilterState {
            filter: "up".to_string(),
            disabled: false,
            config: BTreeMap::new(),
        });
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"type\":\"MX\""));
        let back: RecordState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn use_client_subnet_defaults_true_when_absent() {
        let json = r#"{"zone":"example.com","domain":"www.example.com","type":"A"}"#;
        let s: RecordState = serde_json::from_str(json).unwrap();
        assert!(s.use_client_subnet);
    }
}

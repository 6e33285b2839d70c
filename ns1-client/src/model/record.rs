//! DNS record domain model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::meta::Meta;

/// A single response payload for a record.
///
/// The rdata tokens are ordered; for most record types they are the
/// space-separated fields of the answer (e.g. `["10", "mail.example.com"]`
/// for MX), while TXT/SPF answers carry the whole text as one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Ordered response data tokens.
    #[serde(rename = "answer")]
    pub rdata: Vec<String>,

    /// Region (answer group) this answer belongs to, for traffic steering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Answer-level metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Answer {
    /// Answer from pre-split rdata tokens.
    pub fn new(rdata: Vec<String>) -> Self {
        Self {
            rdata,
            region: None,
            meta: None,
        }
    }

    /// TXT/SPF answer: the whole text is a single rdata token.
    pub fn txt(text: impl Into<String>) -> Self {
        Self::new(vec![text.into()])
    }
}

/// A named answer group with associated metadata.
///
/// Regions are referenced by [`Answer::region`] and consulted by
/// traffic-steering filters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    /// Region-level metadata.
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

/// One step in a record's filter chain.
///
/// Filter order is significant: the API applies filters in list order and
/// the chain must round-trip exactly as declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Filter type name (e.g. `"select_first_n"`, `"geotarget_country"`).
    #[serde(rename = "filter")]
    pub filter_type: String,

    /// Whether the filter is present in the chain but disabled.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,

    /// Free-form filter configuration.
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
}

impl Filter {
    pub fn new(filter_type: impl Into<String>) -> Self {
        Self {
            filter_type: filter_type.into(),
            disabled: false,
            config: BTreeMap::new(),
        }
    }
}

/// A DNS record, keyed by the immutable (zone, domain, type) triplet.
///
/// A record either links to another record (`link`) or carries its own
/// answers; the two are mutually exclusive. That invariant is enforced by
/// the resource converter before a record reaches the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Server-assigned record id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Zone the record lives in.
    pub zone: String,

    /// Fully qualified domain name of the record.
    pub domain: String,

    /// Record type (`"A"`, `"CNAME"`, ...).
    #[serde(rename = "type")]
    pub record_type: String,

    /// Time to live in seconds. Server-assigned when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    /// Target record this record aliases. Empty when the record carries
    /// its own answers.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,

    /// Record-level metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// Whether EDNS client subnet data may be used when answering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_client_subnet: Option<bool>,

    /// Answers returned for this record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<Answer>,

    /// Answer groups, keyed by region name. A `BTreeMap` keeps iteration
    /// in sorted name order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub regions: BTreeMap<String, Region>,

    /// Filter chain, applied in list order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
}

impl Record {
    /// New record for the given identity triplet, with everything else unset.
    pub fn new(
        zone: impl Into<String>,
        domain: impl Into<String>,
        record_type: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            zone: zone.into(),
            domain: domain.into(),
            record_type: record_type.into(),
            ttl: None,
            link: String::new(),
            meta: None,
            use_client_subnet: None,
            answers: Vec::new(),
            regions: BTreeMap::new(),
            filters: Vec::new(),
        }
    }

    /// Append an answer.
    pub fn add_answer(&mut self, answer: Answer) {
        self.answers.push(answer);
    }

    /// Turn the record into an alias for `target`.
    pub fn link_to(&mut self, target: impl Into<String>) {
        self.link = target.into();
    }
}

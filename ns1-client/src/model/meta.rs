//! Record/answer/region metadata and its validation.
//!
//! NS1 metadata drives traffic steering: weights, geo coordinates, IP
//! prefixes, watermarks. The API accepts it as a JSON object with
//! well-known keys; hosts that persist flat state carry it as a string
//! map, so this module also owns the string-map conversions.

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Geographic regions accepted in the `georegion` metadata field.
pub const GEOREGIONS: &[&str] = &[
    "US-WEST",
    "US-EAST",
    "US-CENTRAL",
    "EUROPE",
    "AFRICA",
    "ASIAPAC",
    "SOUTH-AMERICA",
];

/// Maximum length of the free-form `note` field.
const MAX_NOTE_LEN: usize = 256;

/// A single metadata validation failure.
///
/// Validation never stops at the first problem; callers receive every
/// failure so they can be reported together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaError {
    /// Metadata field the error relates to.
    pub field: String,
    /// Description of what's wrong.
    pub detail: String,
}

impl MetaError {
    pub(crate) fn new(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for MetaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.detail)
    }
}

impl std::error::Error for MetaError {}

/// Typed NS1 metadata attached to records, answers and regions.
///
/// All fields are optional; an all-`None` value serializes to `{}` and is
/// treated as absent by the record converters (see [`Meta::is_empty`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Whether the answer endpoint is up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up: Option<bool>,

    /// Active connection count at the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<u64>,

    /// Requests per second at the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<u64>,

    /// Load average at the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loadavg: Option<f64>,

    /// Pulsar job id feeding this metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulsar: Option<String>,

    /// Latitude of the endpoint, in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude of the endpoint, in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Geographic regions, drawn from [`GEOREGIONS`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub georegion: Vec<String>,

    /// ISO 3166 alpha-2 country codes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub country: Vec<String>,

    /// Two-letter US state codes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub us_state: Vec<String>,

    /// Two-letter Canadian province codes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ca_province: Vec<String>,

    /// Free-form note, at most 256 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// CIDR prefixes (IPv4 or IPv6) the answer applies to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_prefixes: Vec<String>,

    /// Autonomous system numbers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub asn: Vec<u32>,

    /// Priority tier (lower is preferred).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u64>,

    /// Shuffle weight, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Low watermark for connection-based steering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_watermark: Option<u64>,

    /// High watermark for connection-based steering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_watermark: Option<u64>,
}

impl Meta {
    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build metadata from a flat string map, the shape hosts persist it in.
    ///
    /// List-valued fields are comma-separated; booleans accept
    /// `1`/`0`/`true`/`false`. Parsing is permissive in the sense that every
    /// entry is examined and **all** failures (unknown keys, unparsable
    /// scalars) are collected and returned together.
    ///
    /// # Errors
    ///
    /// Returns the full list of [`MetaError`]s when any entry fails to parse.
    pub fn from_string_map(map: &BTreeMap<String, String>) -> Result<Self, Vec<MetaError>> {
        let mut meta = Self::default();
        let mut errs = Vec::new();

        for (key, value) in map {
            match key.as_str() {
                "up" => match parse_bool(value) {
                    Some(v) => meta.up = Some(v),
                    None => errs.push(MetaError::new(key, format!("invalid boolean '{value}'"))),
                },
                "connections" => parse_u64(key, value, &mut meta.connections, &mut errs),
                "requests" => parse_u64(key, value, &mut meta.requests, &mut errs),
                "loadavg" => parse_f64(key, value, &mut meta.loadavg, &mut errs),
                "pulsar" => meta.pulsar = Some(value.clone()),
                "latitude" => parse_f64(key, value, &mut meta.latitude, &mut errs),
                "longitude" => parse_f64(key, value, &mut meta.longitude, &mut errs),
                "georegion" => meta.georegion = split_list(value),
                "country" => meta.country = split_list(value),
                "us_state" => meta.us_state = split_list(value),
                "ca_province" => meta.ca_province = split_list(value),
                "note" => meta.note = Some(value.clone()),
                "ip_prefixes" => meta.ip_prefixes = split_list(value),
                "asn" => {
                    for item in split_list(value) {
                        match item.parse::<u32>() {
                            Ok(v) => meta.asn.push(v),
                            Err(_) => {
                                errs.push(MetaError::new(key, format!("invalid ASN '{item}'")));
                            }
                        }
                    }
                }
                "priority" => parse_u64(key, value, &mut meta.priority, &mut errs),
                "weight" => parse_f64(key, value, &mut meta.weight, &mut errs),
                "low_watermark" => parse_u64(key, value, &mut meta.low_watermark, &mut errs),
                "high_watermark" => parse_u64(key, value, &mut meta.high_watermark, &mut errs),
                _ => errs.push(MetaError::new(key, "unknown metadata field")),
            }
        }

        if errs.is_empty() { Ok(meta) } else { Err(errs) }
    }

    /// Flatten metadata back into the string-map shape.
    ///
    /// Inverse of [`from_string_map`](Self::from_string_map) for every value
    /// that parses cleanly: lists are comma-joined and booleans become
    /// `1`/`0`.
    #[must_use]
    pub fn to_string_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();

        if let Some(up) = self.up {
            map.insert("up".to_string(), if up { "1" } else { "0" }.to_string());
        }
        if let Some(v) = self.connections {
            map.insert("connections".to_string(), v.to_string());
        }
        if let Some(v) = self.requests {
            map.insert("requests".to_string(), v.to_string());
        }
        if let Some(v) = self.loadavg {
            map.insert("loadavg".to_string(), v.to_string());
        }
        if let Some(ref v) = self.pulsar {
            map.insert("pulsar".to_string(), v.clone());
        }
        if let Some(v) = self.latitude {
            map.insert("latitude".to_string(), v.to_string());
        }
        if let Some(v) = self.longitude {
            map.insert("longitude".to_string(), v.to_string());
        }
        if !self.georegion.is_empty() {
            map.insert("georegion".to_string(), self.georegion.join(","));
        }
        if !self.country.is_empty() {
            map.insert("country".to_string(), self.country.join(","));
        }
        if !self.us_state.is_empty() {
            map.insert("us_state".to_string(), self.us_state.join(","));
        }
        if !self.ca_province.is_empty() {
            map.insert("ca_province".to_string(), self.ca_province.join(","));
        }
        if let Some(ref v) = self.note {
            map.insert("note".to_string(), v.clone());
        }
        if !self.ip_prefixes.is_empty() {
            map.insert("ip_prefixes".to_string(), self.ip_prefixes.join(","));
        }
        if !self.asn.is_empty() {
            let asn: Vec<String> = self.asn.iter().map(ToString::to_string).collect();
            map.insert("asn".to_string(), asn.join(","));
        }
        if let Some(v) = self.priority {
            map.insert("priority".to_string(), v.to_string());
        }
        if let Some(v) = self.weight {
            map.insert("weight".to_string(), v.to_string());
        }
        if let Some(v) = self.low_watermark {
            map.insert("low_watermark".to_string(), v.to_string());
        }
        if let Some(v) = self.high_watermark {
            map.insert("high_watermark".to_string(), v.to_string());
        }

        map
    }

    /// Check every set field against its value constraints.
    ///
    /// Returns one [`MetaError`] per violation; an empty vec means the
    /// metadata is valid. Failures are collected, never short-circuited,
    /// so callers can surface all of them at once.
    #[must_use]
    pub fn validate(&self) -> Vec<MetaError> {
        let mut errs = Vec::new();

        if let Some(lat) = self.latitude
            && !(-90.0..=90.0).contains(&lat)
        {
            errs.push(MetaError::new(
                "latitude",
                format!("must be between -90 and 90, got {lat}"),
            ));
        }
        if let Some(lon) = self.longitude
            && !(-180.0..=180.0).contains(&lon)
        {
            errs.push(MetaError::new(
                "longitude",
                format!("must be between -180 and 180, got {lon}"),
            ));
        }
        for region in &self.georegion {
            if !GEOREGIONS.contains(&region.as_str()) {
                errs.push(MetaError::new(
                    "georegion",
                    format!("unknown region '{region}'"),
                ));
            }
        }
        for code in &self.country {
            if !is_two_letter_code(code) {
                errs.push(MetaError::new(
                    "country",
                    format!("'{code}' is not a two-letter country code"),
                ));
            }
        }
        for code in &self.us_state {
            if !is_two_letter_code(code) {
                errs.push(MetaError::new(
                    "us_state",
                    format!("'{code}' is not a two-letter state code"),
                ));
            }
        }
        for code in &self.ca_province {
            if !is_two_letter_code(code) {
                errs.push(MetaError::new(
                    "ca_province",
                    format!("'{code}' is not a two-letter province code"),
                ));
            }
        }
        if let Some(ref note) = self.note
            && note.chars().count() > MAX_NOTE_LEN
        {
            errs.push(MetaError::new(
                "note",
                format!("must be at most {MAX_NOTE_LEN} characters"),
            ));
        }
        for prefix in &self.ip_prefixes {
            if let Some(detail) = check_cidr(prefix) {
                errs.push(MetaError::new("ip_prefixes", detail));
            }
        }
        if let Some(weight) = self.weight
            && !(0.0..=100.0).contains(&weight)
        {
            errs.push(MetaError::new(
                "weight",
                format!("must be between 0 and 100, got {weight}"),
            ));
        }
        if let (Some(low), Some(high)) = (self.low_watermark, self.high_watermark)
            && low > high
        {
            errs.push(MetaError::new(
                "low_watermark",
                format!("must not exceed high_watermark ({low} > {high})"),
            ));
        }

        errs
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "up" => Some(true),
        "0" | "false" | "down" => Some(false),
        _ => None,
    }
}

fn parse_u64(key: &str, value: &str, target: &mut Option<u64>, errs: &mut Vec<MetaError>) {
    match value.parse::<u64>() {
        Ok(v) => *target = Some(v),
        Err(_) => errs.push(MetaError::new(key, format!("invalid integer '{value}'"))),
    }
}

fn parse_f64(key: &str, value: &str, target: &mut Option<f64>, errs: &mut Vec<MetaError>) {
    match value.parse::<f64>() {
        Ok(v) => *target = Some(v),
        Err(_) => errs.push(MetaError::new(key, format!("invalid number '{value}'"))),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn is_two_letter_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Returns an error description when `prefix` is not valid CIDR notation.
fn check_cidr(prefix: &str) -> Option<String> {
    let Some((addr, len)) = prefix.split_once('/') else {
        return Some(format!("'{prefix}' is missing a prefix length"));
    };
    let Ok(addr) = addr.parse::<IpAddr>() else {
        return Some(format!("'{prefix}' has an invalid address"));
    };
    let Ok(len) = len.parse::<u8>() else {
        return Some(format!("'{prefix}' has an invalid prefix length"));
    };
    let max = if addr.is_ipv4() { 32 } else { 128 };
    if len > max {
        return Some(format!("'{prefix}' prefix length exceeds /{max}"));
    }
    None
}

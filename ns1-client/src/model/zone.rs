//! DNS zone domain model.
//!
//! Zones are read-only from this library's perspective (the zone surface is
//! a data source); the structs mirror the API response shape.

use serde::{Deserialize, Serialize};

/// A DNS zone as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Server-assigned zone id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Zone name (e.g. `"example.com"`).
    pub zone: String,

    /// Default TTL for records in the zone, in seconds.
    #[serde(default)]
    pub ttl: u32,

    /// TTL for NXDOMAIN responses, in seconds.
    #[serde(default)]
    pub nx_ttl: u32,

    /// SOA refresh interval, in seconds.
    #[serde(default)]
    pub refresh: u32,

    /// SOA retry interval, in seconds.
    #[serde(default)]
    pub retry: u32,

    /// SOA expiry interval, in seconds.
    #[serde(default)]
    pub expiry: u32,

    /// SOA hostmaster contact.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostmaster: String,

    /// Nameservers serving the zone.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns_servers: Vec<String>,

    /// Network ids the zone is published on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<u32>,

    /// Zone this zone is linked to, if any.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,

    /// Outbound zone transfer configuration (set when this zone acts as a
    /// primary for external secondaries).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<ZonePrimary>,

    /// Inbound zone transfer configuration (set when this zone is a
    /// secondary fed from an external primary).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<ZoneSecondary>,
}

/// Primary-role transfer configuration: the external secondaries this zone
/// notifies and allows transfers to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZonePrimary {
    /// Whether outbound transfers are enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Secondary servers allowed to transfer the zone.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondaries: Vec<ZoneSecondaryServer>,
}

/// One secondary server in a primary zone's transfer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSecondaryServer {
    /// IP address of the secondary.
    pub ip: String,

    /// Port the secondary listens on, when not the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Whether to send NOTIFY messages to this secondary.
    #[serde(default)]
    pub notify: bool,

    /// Network ids this secondary is notified on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<u32>,
}

/// Secondary-role transfer configuration: the external primary this zone is
/// fed from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneSecondary {
    /// Whether inbound transfers are enabled.
    #[serde(default)]
    pub enabled: bool,

    /// IP address of the primary server.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub primary_ip: String,

    /// Port of the primary server, when not the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_port: Option<u16>,

    /// Additional primary IPs to pull from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_ips: Vec<String>,

    /// Ports matching `other_ips`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_ports: Vec<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_primary_zone() {
        let json = r#"{
            "id": "520c6522",
            "zone": "example.com",
            "ttl": 3600,
            "nx_ttl": 60,
            "refresh": 43200,
            "retry": 7200,
            "expiry": 1209600,
            "hostmaster": "hostmaster@nsone.net",
            "dns_servers": ["dns1.p01.nsone.net", "dns2.p01.nsone.net"],
            "networks": [0],
            "primary": {
                "enabled": true,
                "secondaries": [
                    {"ip": "192.0.2.1", "port": 53, "notify": true, "networks": [0, 1]}
                ]
            }
        }"#;
        let z: Zone = serde_json::from_str(json).unwrap();
        assert_eq!(z.zone, "example.com");
        assert_eq!(z.ttl, 3600);
        assert_eq!(z.dns_servers.len(), 2);
        let primary = z.primary.unwrap();
        assert!(primary.enabled);
        assert_eq!(primary.secondaries[0].ip, "192.0.2.1");
        assert_eq!(primary.secondaries[0].networks, vec![0, 1]);
        assert!(z.secondary.is_none());
    }

    #[test]
    fn deserialize_secondary_zone() {
        let json = r#"{
            "zone": "secondary.example",
            "secondary": {
                "enabled": true,
                "primary_ip": "198.51.100.7",
                "other_ips": ["198.51.100.8"]
            }
        }"#;
        let z: Zone = serde_json::from_str(json).unwrap();
        let secondary = z.secondary.unwrap();
        assert!(secondary.enabled);
        assert_eq!(secondary.primary_ip, "198.51.100.7");
        assert_eq!(secondary.other_ips, vec!["198.51.100.8"]);
    }

    #[test]
    fn missing_timers_default_to_zero() {
        let z: Zone = serde_json::from_str(r#"{"zone":"example.com"}"#).unwrap();
        assert_eq!(z.refresh, 0);
        assert_eq!(z.expiry, 0);
        assert!(z.dns_servers.is_empty());
    }
}

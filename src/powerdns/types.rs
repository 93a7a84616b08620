use serde::{Deserialize, Serialize};

/// Replication role of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ZoneKind {
    Native,
    Master,
    Slave,
    /// Kinds newer PowerDNS releases may report (Producer, Consumer).
    Other,
}

impl From<String> for ZoneKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Native" => Self::Native,
            "Master" => Self::Master,
            "Slave" => Self::Slave,
            _ => Self::Other,
        }
    }
}

/// Operation marker on a record set submitted in a zone patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Changetype {
    Replace,
    Delete,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdnsZone {
    pub id: String,   // "/api/v1/.../zones/example.com."
    pub name: String, // "example.com."
    pub kind: ZoneKind,
    #[serde(default)]
    pub serial: Option<u32>,
    #[serde(default)]
    pub account: Option<String>,
    /// Primary addresses to pull from; meaningful only for Slave zones.
    #[serde(default)]
    pub masters: Vec<String>,
    pub rrsets: Option<Vec<PdnsRrset>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsRrset {
    pub name: String, // "www.example.com."
    #[serde(rename = "type")]
    pub rtype: String, // "A", "NS", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Present only when patching; a DELETE carries no records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changetype: Option<Changetype>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<PdnsRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<PdnsComment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsRecord {
    pub content: String, // "192.0.2.1" or "ns1.example.net."
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsComment {
    pub content: String,
    pub account: String,
    #[serde(default)]
    pub modified_at: i64,
}

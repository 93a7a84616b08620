//! Assembling PowerDNS change operations from editor actions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::codec::RecordType;
use super::name::{absolute_name, validate_relative_name};
use super::{RecordForm, ValidationError};
use crate::powerdns::types::{Changetype, PdnsRecord, PdnsRrset};

/// Identifies one record set for selection tracking and deletion.
///
/// Request bodies carry the pair directly. The string form is
/// `name|type`, parsed at the *last* separator: type mnemonics never
/// contain `|`, so the pair survives even a name that (theoretically)
/// does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RrsetKey {
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
}

impl RrsetKey {
    pub fn new(name: impl Into<String>, rtype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rtype: rtype.into(),
        }
    }
}

impl fmt::Display for RrsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.name, self.rtype)
    }
}

impl FromStr for RrsetKey {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (name, rtype) = value
            .rsplit_once('|')
            .ok_or_else(|| ValidationError::InvalidKey(value.to_string()))?;
        Ok(Self::new(name, rtype))
    }
}

/// Build the single REPLACE operation for one edited record set. The
/// disabled flag is applied to every record; the editor does not support
/// per-record disable within one save.
pub fn replace_op(zone: &str, form: &RecordForm) -> Result<PdnsRrset, ValidationError> {
    validate_relative_name(&form.name)?;
    let contents = form.data.encode()?;
    // encode never yields an empty list; REPLACE without records is invalid
    debug_assert!(!contents.is_empty());
    Ok(PdnsRrset {
        name: absolute_name(&form.name, zone),
        rtype: form.data.rtype().to_string(),
        ttl: Some(form.ttl),
        changetype: Some(Changetype::Replace),
        records: contents
            .into_iter()
            .map(|content| PdnsRecord {
                content,
                disabled: form.disabled,
            })
            .collect(),
        comments: Vec::new(),
    })
}

/// Build the DELETE operation for one record set. The SOA set is never
/// offered for deletion.
pub fn delete_op(zone: &str, key: &RrsetKey) -> Result<PdnsRrset, ValidationError> {
    validate_relative_name(&key.name)?;
    if key.rtype.eq_ignore_ascii_case(RecordType::Soa.as_str()) {
        return Err(ValidationError::SoaDeletion);
    }
    Ok(PdnsRrset {
        name: absolute_name(&key.name, zone),
        rtype: key.rtype.to_ascii_uppercase(),
        ttl: None,
        changetype: Some(Changetype::Delete),
        records: Vec::new(),
        comments: Vec::new(),
    })
}

/// One DELETE per selected set, sent together as a single zone patch.
pub fn delete_ops(zone: &str, keys: &[RrsetKey]) -> Result<Vec<PdnsRrset>, ValidationError> {
    if keys.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    keys.iter().map(|key| delete_op(zone, key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::codec::RecordData;

    const ZONE: &str = "example.com.";

    #[test]
    fn replace_op_carries_records_ttl_and_disabled() {
        let form = RecordForm {
            name: "www".into(),
            ttl: 300,
            disabled: true,
            data: RecordData::A {
                content: "192.0.2.1\n192.0.2.2".into(),
            },
        };
        let op = replace_op(ZONE, &form).unwrap();
        assert_eq!(op.name, "www.example.com.");
        assert_eq!(op.rtype, "A");
        assert_eq!(op.ttl, Some(300));
        assert_eq!(op.changetype, Some(Changetype::Replace));
        assert_eq!(op.records.len(), 2);
        assert!(op.records.iter().all(|record| record.disabled));
    }

    #[test]
    fn replace_op_rejects_empty_required_field() {
        let form = RecordForm {
            name: "mail".into(),
            ttl: 300,
            disabled: false,
            data: RecordData::Mx {
                priority: 10,
                exchange: String::new(),
            },
        };
        assert_eq!(
            replace_op(ZONE, &form),
            Err(ValidationError::EmptyField("exchange"))
        );
    }

    #[test]
    fn replace_op_rejects_bad_names() {
        let form = RecordForm {
            name: "no spaces".into(),
            ttl: 300,
            disabled: false,
            data: RecordData::A {
                content: "192.0.2.1".into(),
            },
        };
        assert!(matches!(
            replace_op(ZONE, &form),
            Err(ValidationError::InvalidName(_))
        ));
    }

    #[test]
    fn delete_op_carries_no_records() {
        let op = delete_op(ZONE, &RrsetKey::new("www", "A")).unwrap();
        assert_eq!(op.name, "www.example.com.");
        assert_eq!(op.changetype, Some(Changetype::Delete));
        assert_eq!(op.ttl, None);
        assert!(op.records.is_empty());
    }

    #[test]
    fn soa_cannot_be_deleted() {
        assert_eq!(
            delete_op(ZONE, &RrsetKey::new("@", "SOA")),
            Err(ValidationError::SoaDeletion)
        );
        assert_eq!(
            delete_op(ZONE, &RrsetKey::new("@", "soa")),
            Err(ValidationError::SoaDeletion)
        );
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert_eq!(delete_ops(ZONE, &[]), Err(ValidationError::EmptySelection));
    }

    #[test]
    fn selection_key_round_trip() {
        let key = RrsetKey::new("www.example.com.", "A");
        let encoded = key.to_string();
        assert_eq!(encoded, "www.example.com.|A");
        assert_eq!(encoded.parse::<RrsetKey>().unwrap(), key);
    }

    #[test]
    fn selection_key_parses_at_last_separator() {
        let key = RrsetKey::new("we|ird.example.com.", "TXT");
        assert_eq!(key.to_string().parse::<RrsetKey>().unwrap(), key);
    }

    #[test]
    fn selection_key_without_separator_is_rejected() {
        assert!(matches!(
            "www.example.com.".parse::<RrsetKey>(),
            Err(ValidationError::InvalidKey(_))
        ));
    }
}

//! The record editing model: name normalization, the per-type codec, and
//! the change-operation batch builder.

pub mod batch;
pub mod codec;
pub mod name;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use codec::RecordData;

/// One editable record set as the UI presents it: a zone-relative name,
/// the TTL, one disabled flag applied to every record in the set, and the
/// per-type fields selected by the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordForm {
    pub name: String,
    pub ttl: u32,
    #[serde(default)]
    pub disabled: bool,
    #[serde(flatten)]
    pub data: RecordData,
}

/// Rejected form input, caught before any upstream call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field '{0}' is empty")]
    EmptyField(&'static str),
    #[error("record name '{0}' contains invalid characters")]
    InvalidName(String),
    #[error("malformed selection key '{0}'")]
    InvalidKey(String),
    #[error("no records selected")]
    EmptySelection,
    #[error("the SOA record set cannot be deleted")]
    SoaDeletion,
}

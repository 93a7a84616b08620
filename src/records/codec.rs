//! Per-type translation between structured form fields and the flat
//! content strings PowerDNS stores.
//!
//! Each record type the editor offers has one [`RecordData`] variant;
//! `encode` produces the wire content strings (one per record) and
//! `decode` rebuilds form fields from them, substituting documented
//! defaults for missing pieces. The wire format itself is type-agnostic
//! text, so sets with types outside this list are left to the raw API.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;
use super::name::ensure_trailing_dot;

/// Record types offered by the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Caa,
    Cname,
    Mx,
    Ns,
    Ptr,
    Soa,
    Srv,
    Txt,
}

impl RecordType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "AAAA" => Some(Self::Aaaa),
            "CAA" => Some(Self::Caa),
            "CNAME" => Some(Self::Cname),
            "MX" => Some(Self::Mx),
            "NS" => Some(Self::Ns),
            "PTR" => Some(Self::Ptr),
            "SOA" => Some(Self::Soa),
            "SRV" => Some(Self::Srv),
            "TXT" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CAA property tags understood by the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaaTag {
    #[default]
    Issue,
    IssueWild,
    Iodef,
}

impl CaaTag {
    fn parse(value: &str) -> Self {
        match value {
            "issuewild" => Self::IssueWild,
            "iodef" => Self::Iodef,
            _ => Self::Issue,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::IssueWild => "issuewild",
            Self::Iodef => "iodef",
        }
    }
}

impl fmt::Display for CaaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured per-type form fields; the `type` tag selects the variant.
///
/// Line-oriented variants (`A`, `AAAA`, `CNAME`, `NS`, `PTR`, `TXT`)
/// carry one value per line of `content` and encode to one record per
/// line. `SOA` is edited as a single opaque string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum RecordData {
    A {
        content: String,
    },
    Aaaa {
        content: String,
    },
    Caa {
        #[serde(default)]
        flags: u8,
        #[serde(default)]
        tag: CaaTag,
        value: String,
    },
    Cname {
        content: String,
    },
    Mx {
        #[serde(default = "default_mx_priority")]
        priority: u16,
        exchange: String,
    },
    Ns {
        content: String,
    },
    Ptr {
        content: String,
    },
    Soa {
        content: String,
    },
    Srv {
        #[serde(default)]
        priority: u16,
        #[serde(default)]
        weight: u16,
        #[serde(default = "default_srv_port")]
        port: u16,
        target: String,
    },
    Txt {
        content: String,
    },
}

fn default_mx_priority() -> u16 {
    10
}

fn default_srv_port() -> u16 {
    80
}

impl RecordData {
    pub fn rtype(&self) -> RecordType {
        match self {
            Self::A { .. } => RecordType::A,
            Self::Aaaa { .. } => RecordType::Aaaa,
            Self::Caa { .. } => RecordType::Caa,
            Self::Cname { .. } => RecordType::Cname,
            Self::Mx { .. } => RecordType::Mx,
            Self::Ns { .. } => RecordType::Ns,
            Self::Ptr { .. } => RecordType::Ptr,
            Self::Soa { .. } => RecordType::Soa,
            Self::Srv { .. } => RecordType::Srv,
            Self::Txt { .. } => RecordType::Txt,
        }
    }

    /// Encode the form into wire content strings, one per record.
    /// An empty required field is rejected before anything is sent.
    pub fn encode(&self) -> Result<Vec<String>, ValidationError> {
        match self {
            Self::Mx { priority, exchange } => {
                let exchange = required("exchange", exchange)?;
                Ok(vec![format!("{priority} {}", ensure_trailing_dot(exchange))])
            }
            Self::Srv {
                priority,
                weight,
                port,
                target,
            } => {
                let target = required("target", target)?;
                Ok(vec![format!(
                    "{priority} {weight} {port} {}",
                    ensure_trailing_dot(target)
                )])
            }
            Self::Caa { flags, tag, value } => {
                let value = required("value", value)?;
                Ok(vec![format!("{flags} {tag} {}", quote_wrap(value))])
            }
            Self::Txt { content } => encode_lines(content, quote_wrap),
            Self::Soa { content } => {
                let content = required("content", content)?;
                Ok(vec![content.to_string()])
            }
            Self::Cname { content } | Self::Ns { content } | Self::Ptr { content } => {
                encode_lines(content, ensure_trailing_dot)
            }
            Self::A { content } | Self::Aaaa { content } => {
                encode_lines(content, str::to_string)
            }
        }
    }

    /// Rebuild form fields from the wire contents of one record set,
    /// substituting documented defaults for missing fields.
    pub fn decode(rtype: RecordType, contents: &[String]) -> Self {
        match rtype {
            RecordType::Mx => {
                let fields: Vec<&str> = first(contents).split_whitespace().collect();
                Self::Mx {
                    priority: parse_field(&fields, 0, default_mx_priority()),
                    exchange: text_field(&fields, 1),
                }
            }
            RecordType::Srv => {
                let fields: Vec<&str> = first(contents).split_whitespace().collect();
                Self::Srv {
                    priority: parse_field(&fields, 0, 0),
                    weight: parse_field(&fields, 1, 0),
                    port: parse_field(&fields, 2, default_srv_port()),
                    target: text_field(&fields, 3),
                }
            }
            RecordType::Caa => {
                let fields: Vec<&str> = first(contents).split_whitespace().collect();
                Self::Caa {
                    flags: parse_field(&fields, 0, 0),
                    tag: CaaTag::parse(fields.get(1).copied().unwrap_or_default()),
                    value: unquote(&fields.get(2..).unwrap_or_default().join(" ")).to_string(),
                }
            }
            RecordType::Txt => Self::Txt {
                content: contents
                    .iter()
                    .map(|content| unquote(content))
                    .collect::<Vec<_>>()
                    .join("\n"),
            },
            RecordType::Soa => Self::Soa {
                content: first(contents).to_string(),
            },
            RecordType::Cname => Self::Cname {
                content: contents.join("\n"),
            },
            RecordType::Ns => Self::Ns {
                content: contents.join("\n"),
            },
            RecordType::Ptr => Self::Ptr {
                content: contents.join("\n"),
            },
            RecordType::A => Self::A {
                content: contents.join("\n"),
            },
            RecordType::Aaaa => Self::Aaaa {
                content: contents.join("\n"),
            },
        }
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed)
}

/// Non-blank lines of a multi-value field, mapped to wire contents.
fn encode_lines(
    content: &str,
    to_wire: impl Fn(&str) -> String,
) -> Result<Vec<String>, ValidationError> {
    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| to_wire(line))
        .collect();
    if lines.is_empty() {
        return Err(ValidationError::EmptyField("content"));
    }
    Ok(lines)
}

fn first(contents: &[String]) -> &str {
    contents.first().map(String::as_str).unwrap_or_default()
}

fn parse_field<T: std::str::FromStr>(fields: &[&str], index: usize, default: T) -> T {
    fields
        .get(index)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn text_field(fields: &[&str], index: usize) -> String {
    fields.get(index).copied().unwrap_or_default().to_string()
}

fn quote_wrap(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value.to_string()
    } else {
        format!("\"{value}\"")
    }
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

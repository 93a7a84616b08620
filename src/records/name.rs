//! Conversions between wire-form FQDNs (trailing dot) and the
//! zone-relative names shown in the editor.

use lazy_static::lazy_static;
use regex::Regex;

use super::ValidationError;

/// Reserved token that displays the zone apex.
pub const APEX: &str = "@";

lazy_static! {
    /// Characters accepted in a relative record name. Wildcard and
    /// service-style underscore labels are allowed; whitespace and `|`
    /// are not, which keeps selection keys unambiguous for every name
    /// the console produces.
    static ref RELATIVE_NAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_*][A-Za-z0-9_*.\-]*$").unwrap();
}

pub fn validate_relative_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyField("name"));
    }
    if name == APEX || RELATIVE_NAME_RE.is_match(name) {
        return Ok(());
    }
    Err(ValidationError::InvalidName(name.to_string()))
}

/// Append the trailing dot that marks a name as fully qualified.
pub fn ensure_trailing_dot(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Wire name to editor name: the apex collapses to `@`, names under the
/// zone lose the zone suffix, anything else stays fully qualified.
pub fn relative_name(name: &str, zone: &str) -> String {
    let zone = ensure_trailing_dot(zone);
    if name == zone {
        return APEX.to_string();
    }
    match name.strip_suffix(&format!(".{zone}")) {
        Some(head) => head.to_string(),
        None => name.to_string(),
    }
}

/// Editor name to wire name: `@` maps to the zone, a trailing dot is
/// honored as already fully qualified (escaping the zone), everything
/// else is suffixed with the zone.
pub fn absolute_name(name: &str, zone: &str) -> String {
    let zone = ensure_trailing_dot(zone);
    if name == APEX {
        return zone;
    }
    if name.ends_with('.') {
        return name.to_string();
    }
    format!("{name}.{zone}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE: &str = "example.com.";

    #[test]
    fn apex_collapses_to_token() {
        assert_eq!(relative_name("example.com.", ZONE), "@");
    }

    #[test]
    fn child_name_loses_zone_suffix() {
        assert_eq!(relative_name("www.example.com.", ZONE), "www");
        assert_eq!(relative_name("a.b.example.com.", ZONE), "a.b");
    }

    #[test]
    fn foreign_name_stays_fully_qualified() {
        assert_eq!(relative_name("other.org.", ZONE), "other.org.");
        // a name that merely ends in the zone text is not under the zone
        assert_eq!(relative_name("xexample.com.", ZONE), "xexample.com.");
    }

    #[test]
    fn apex_token_maps_back_to_zone() {
        assert_eq!(absolute_name("@", ZONE), "example.com.");
        assert_eq!(absolute_name("@", "example.com"), "example.com.");
    }

    #[test]
    fn relative_names_get_zone_suffix() {
        assert_eq!(absolute_name("www", ZONE), "www.example.com.");
    }

    #[test]
    fn trailing_dot_escapes_the_zone() {
        assert_eq!(absolute_name("www.other.org.", ZONE), "www.other.org.");
    }

    #[test]
    fn normalization_is_a_retraction() {
        for name in [
            "example.com.",
            "www.example.com.",
            "a.b.example.com.",
            "*.wild.example.com.",
            "other.org.",
        ] {
            assert_eq!(absolute_name(&relative_name(name, ZONE), ZONE), name);
        }
    }

    #[test]
    fn name_validation() {
        for ok in ["@", "www", "a.b", "*.www", "_sip._tcp", "www.other.org."] {
            assert_eq!(validate_relative_name(ok), Ok(()), "{ok}");
        }
        assert_eq!(
            validate_relative_name(""),
            Err(ValidationError::EmptyField("name"))
        );
        for bad in ["a b", "a|b", "-x"] {
            assert!(
                matches!(
                    validate_relative_name(bad),
                    Err(ValidationError::InvalidName(_))
                ),
                "{bad}"
            );
        }
    }
}

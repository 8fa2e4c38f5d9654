//! Boolean conditions compare an incoming request key to `true` or `false`
use super::util::any_match;
use log::debug;

// only the exact lower case tokens are booleans, "True" or "1" are not
fn parse(s: &str) -> Option<bool> {
    match s {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// True if the request value and at least one condition value are the same boolean token. A token
/// other than `"true"` or `"false"` on either side is a non-match.
pub(crate) fn equals(values: &[String], actual: Option<&str>) -> bool {
    let actual = match actual {
        Some(a) => a,
        None => return false,
    };

    match parse(actual) {
        Some(b) => any_match(values, &b, |v, b| parse(v) == Some(*b)),
        None => {
            debug!("request value '{}' is not a boolean", actual);
            false
        }
    }
}

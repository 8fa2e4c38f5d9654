//! The `Null` condition checks whether a key is present on the request at all. Unlike every other
//! operator it looks at the [`Attribute`] state rather than a value.
use super::util::any_match;
use crate::Attribute;

/// With the value `"true"` the condition holds when the key is absent. With `"false"` it holds
/// when the key is present and carries a value, a key supplied as null does not count. Multiple
/// values are OR'd together, any other token never matches.
pub(crate) fn is_null(values: &[String], actual: Attribute<'_>) -> bool {
    any_match(values, &actual, |v, a| match v.as_str() {
        "true" => *a == Attribute::Absent,
        "false" => a.value().is_some(),
        _ => false,
    })
}

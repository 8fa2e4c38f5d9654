//! String condition operators let you construct Condition elements that restrict access based on
//! comparing a key to a string value.
//!
//! Every matcher takes the condition values and the request value. A key that is absent or null
//! has no string to compare and never satisfies a string condition, the negated operators
//! included.
use super::util::{any_match, none_match};
use crate::wildcard;

/// Exact matching, case sensitive. True if the value equals any of the condition values.
pub(crate) fn equals(values: &[String], actual: Option<&str>) -> bool {
    actual.map_or(false, |a| any_match(values, a, |v, a| v == a))
}

/// Negated matching, case sensitive. True if the value equals none of the condition values.
pub(crate) fn not_equals(values: &[String], actual: Option<&str>) -> bool {
    actual.map_or(false, |a| none_match(values, a, |v, a| v == a))
}

/// Exact matching, ignoring case
pub(crate) fn equals_ignore_case(values: &[String], actual: Option<&str>) -> bool {
    actual
        .map(str::to_lowercase)
        .map_or(false, |a| any_match(values, a.as_str(), |v, a| v.to_lowercase() == a))
}

/// Negated matching, ignoring case
pub(crate) fn not_equals_ignore_case(values: &[String], actual: Option<&str>) -> bool {
    actual
        .map(str::to_lowercase)
        .map_or(false, |a| none_match(values, a.as_str(), |v, a| v.to_lowercase() == a))
}

/// Case sensitive glob matching. The values can include a multi-character wildcard (`*`) and a
/// single character wildcard (`?`) anywhere in the string.
pub(crate) fn like(values: &[String], actual: Option<&str>) -> bool {
    actual.map_or(false, |a| any_match(values, a, |p, a| wildcard::matches(p, a)))
}

/// Negated case sensitive glob matching
pub(crate) fn not_like(values: &[String], actual: Option<&str>) -> bool {
    actual.map_or(false, |a| none_match(values, a, |p, a| wildcard::matches(p, a)))
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! vec_of_strings {
        ($($x:expr),*) => (vec![$($x.to_string()),*]);
    }

    #[test]
    fn test_equals() {
        // singular
        let values = vec_of_strings!["abc"];
        assert!(equals(&values, Some("abc")));
        assert!(!equals(&values, Some("pqr")));
        assert!(!equals(&values, Some("ABC")));

        // multiple allowed
        let values = vec_of_strings!["v1", "v2"];
        assert!(equals(&values, Some("v2")));
        assert!(!equals(&values, Some("v3")));
    }

    #[test]
    fn test_not_equals() {
        let values = vec_of_strings!["ABC"];
        assert!(not_equals(&values, Some("abc")));
        assert!(!not_equals(&values, Some("ABC")));

        // multiple not allowed, every value has to differ
        let values = vec_of_strings!["v1", "v2"];
        assert!(!not_equals(&values, Some("v1")));
        assert!(!not_equals(&values, Some("v2")));
        assert!(not_equals(&values, Some("v3")));
    }

    #[test]
    fn test_equals_ignore_case() {
        let values = vec_of_strings!["abc"];
        assert!(equals_ignore_case(&values, Some("Abc")));
        assert!(!equals_ignore_case(&values, Some("pqr")));

        let values = vec_of_strings!["VaLue1", "ValUE2"];
        assert!(equals_ignore_case(&values, Some("value2")));
        assert!(!equals_ignore_case(&values, Some("v3")));

        // not limited to ascii
        let values = vec_of_strings!["ÉTÉ"];
        assert!(equals_ignore_case(&values, Some("été")));
    }

    #[test]
    fn test_not_equals_ignore_case() {
        let values = vec_of_strings!["abc"];
        assert!(not_equals_ignore_case(&values, Some("pqr")));
        assert!(!not_equals_ignore_case(&values, Some("abC")));

        let values = vec_of_strings!["VaLue1", "ValUE2"];
        assert!(!not_equals_ignore_case(&values, Some("value1")));
        assert!(not_equals_ignore_case(&values, Some("VaLue3")));
    }

    #[test]
    fn test_like() {
        assert!(like(&vec_of_strings!["ab?"], Some("abc")));
        assert!(!like(&vec_of_strings!["a*d"], Some("abc")));
        assert!(!like(&vec_of_strings!["AB?"], Some("abc")));

        // anchored, not a substring search
        assert!(!like(&vec_of_strings!["b"], Some("abc")));

        // multiple allowed
        let values = vec_of_strings!["photos/*.jpg", "photos/*.png"];
        assert!(like(&values, Some("photos/cat.png")));
        assert!(!like(&values, Some("photos/cat.gif")));
    }

    #[test]
    fn test_not_like() {
        assert!(not_like(&vec_of_strings!["a*d"], Some("abc")));
        assert!(!not_like(&vec_of_strings!["ab?"], Some("abc")));

        let values = vec_of_strings!["photos/*.jpg", "photos/*.png"];
        assert!(!not_like(&values, Some("photos/cat.png")));
        assert!(not_like(&values, Some("photos/cat.gif")));
    }

    #[test]
    fn test_missing_value_never_matches() {
        let values = vec_of_strings!["null"];
        assert!(!equals(&values, None));
        assert!(!not_equals(&values, None));
        assert!(!equals_ignore_case(&values, None));
        assert!(!not_equals_ignore_case(&values, None));
        assert!(!like(&vec_of_strings!["*"], None));
        assert!(!not_like(&vec_of_strings!["x"], None));
    }

    #[test]
    fn test_equals_is_not_pointwise_negation() {
        // with more than one value StringNotEquals is "equals none", so both can be false
        let values = vec_of_strings!["v1", "v2"];
        assert!(equals(&values, Some("v1")));
        assert!(!not_equals(&values, Some("v1")));
        assert!(values.iter().any(|v| v != "v1"));
    }
}

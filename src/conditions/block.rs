use super::{Condition, Eval, Operator};
use crate::{Context, Result};
use log::debug;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{self, SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::iter::FromIterator;
use std::slice;

// Scalar (singular) or sequence (multiple) of values.
//
// Type `ScalarOrSeq` holds either a single value or a vector of values.
// Used internally to serialize/deserialize either JSON type easily (via untagged).
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(untagged)]
enum ScalarOrSeq<T> {
    Scalar(T),
    Seq(Vec<T>),
}

// Policies commonly write numeric and boolean condition values without quotes,
// e.g. {"Bool": {"aws:SecureTransport": false}}. They are compared as strings.
#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Bool(bool),
    Num(serde_json::Number),
}

impl From<Scalar> for String {
    fn from(s: Scalar) -> String {
        match s {
            Scalar::Str(s) => s,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Num(n) => n.to_string(),
        }
    }
}

/// The Condition element (or Condition block) of a policy statement.
///
/// A block is satisfied only if every condition in it is satisfied; an empty block is always
/// satisfied. It serializes to the same shape IAM uses for the condition element:
///
/// ```
/// # use policy_conditions::{ConditionBlock, Context, Eval};
/// let block = ConditionBlock::from_json(r#"
/// {
///     "StringEquals": {"x-amz-acl": ["private", "bucket-owner-full-control"]},
///     "NumericLessThanEquals": {"max-keys": 100}
/// }
/// "#).unwrap();
/// assert_eq!(block.len(), 2);
///
/// let mut ctx = Context::new();
/// ctx.insert("x-amz-acl", "private");
/// ctx.insert("max-keys", "50");
/// assert!(block.evaluate(&ctx));
///
/// ctx.insert("max-keys", "500");
/// assert!(!block.evaluate(&ctx));
/// ```
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ConditionBlock(Vec<Condition>);

impl ConditionBlock {
    /// Create a new empty block
    pub fn new() -> Self {
        ConditionBlock(Vec::new())
    }

    /// Build a block from (operator name, key, values) triples. The first unknown or unsupported
    /// operator name is returned as an error.
    pub fn from_clauses<'a, I, V>(clauses: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str, V)>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        clauses
            .into_iter()
            .map(|(name, key, values)| Condition::parse(name, key, values))
            .collect()
    }

    /// Decode a block from its JSON (IAM) representation
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Add a condition to the block
    pub fn push(&mut self, cond: Condition) {
        self.0.push(cond);
    }

    /// Iterate over the conditions in the order they were declared
    pub fn iter(&self) -> slice::Iter<'_, Condition> {
        self.0.iter()
    }

    /// Number of conditions in the block
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the block has no conditions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Test whether every condition is satisfied by the request context. Evaluation stops at the
/// first condition that isn't. An empty set of conditions is satisfied.
pub fn conditions_satisfied(conditions: &[Condition], ctx: &Context) -> bool {
    for (i, cond) in conditions.iter().enumerate() {
        if !cond.evaluate(ctx) {
            debug!(
                "condition[{}] {} on '{}' is not satisfied",
                i,
                cond.serialized_name(),
                cond.key()
            );
            return false;
        }
    }
    true
}

impl Eval for ConditionBlock {
    fn evaluate(&self, ctx: &Context) -> bool {
        conditions_satisfied(&self.0, ctx)
    }
}

impl From<Vec<Condition>> for ConditionBlock {
    fn from(v: Vec<Condition>) -> Self {
        ConditionBlock(v)
    }
}

impl FromIterator<Condition> for ConditionBlock {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        ConditionBlock(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ConditionBlock {
    type Item = &'a Condition;
    type IntoIter = slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// A single key and its values within an operator body
struct Entry<'a>(&'a [String]);

impl<'a> Serialize for Entry<'a> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.len() == 1 {
            self.0[0].serialize(serializer)
        } else {
            self.0.serialize(serializer)
        }
    }
}

// All of the conditions sharing one operator name, e.g. {"k1": "v1", "k2": ["v2", "v3"]}
struct Body<'a>(Vec<&'a Condition>);

impl<'a> Serialize for Body<'a> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seen = HashSet::new();
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for cond in self.0.iter() {
            // two clauses with the same operator and key can't share an object, folding them
            // together would turn an AND into an OR
            if !seen.insert(cond.key()) {
                return Err(ser::Error::custom(format!(
                    "duplicate key '{}' for condition operator {}",
                    cond.key(),
                    cond.serialized_name()
                )));
            }
            map.serialize_entry(cond.key(), &Entry(cond.values()))?;
        }
        map.end()
    }
}

// The only way to get the serialized format of a condition block to match the syntax of AWS
// conditions is to implement custom serialization. Conditions are grouped under their operator
// name in the order the operator first appears.
impl Serialize for ConditionBlock {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut groups: Vec<(String, Body<'_>)> = Vec::new();
        for cond in self.0.iter() {
            let name = cond.serialized_name();
            match groups.iter_mut().find(|(n, _)| *n == name) {
                Some((_, body)) => body.0.push(cond),
                None => groups.push((name, Body(vec![cond]))),
            }
        }

        let mut map = serializer.serialize_map(Some(groups.len()))?;
        for (name, body) in groups.iter() {
            map.serialize_entry(name, body)?;
        }
        map.end()
    }
}

// The entries of one operator body in document order. A key may repeat, every entry is kept as
// its own clause.
struct Entries(Vec<(String, ScalarOrSeq<Scalar>)>);

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = Entries;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of condition keys to values")
    }

    fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry()? {
            entries.push(entry);
        }
        Ok(Entries(entries))
    }
}

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EntriesVisitor)
    }
}

struct ConditionBlockVisitor;

impl<'de> Visitor<'de> for ConditionBlockVisitor {
    type Value = ConditionBlock;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of condition operators to condition bodies")
    }

    fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut block = ConditionBlock::new();
        while let Some(name) = map.next_key::<String>()? {
            let (operator, if_exists) = Operator::parse_qualified(&name).map_err(<M::Error as de::Error>::custom)?;

            let body: Entries = map.next_value()?;
            for (key, values) in body.0 {
                let values = match values {
                    ScalarOrSeq::Scalar(sc) => vec![sc],
                    ScalarOrSeq::Seq(seq) => seq,
                };

                let mut cond = Condition::new(operator, key, values);
                if if_exists {
                    cond = cond.with_if_exists();
                }
                block.push(cond);
            }
        }
        Ok(block)
    }
}

impl<'de> Deserialize<'de> for ConditionBlock {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ConditionBlockVisitor)
    }
}

// A lone condition uses the same syntax as a block holding exactly one clause
impl Serialize for Condition {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.serialized_name(), &Body(vec![self]))?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut block = ConditionBlock::deserialize(deserializer)?;
        if block.len() != 1 {
            return Err(de::Error::invalid_length(block.len(), &"a single condition"));
        }
        Ok(block.0.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PolicyError;

    fn ctx_of(pairs: &[(&str, Option<&str>)]) -> Context {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_scalar_or_seq_json() {
        let actual: ScalarOrSeq<String> = serde_json::from_str(r#""myvalue""#).unwrap();
        assert_eq!(ScalarOrSeq::Scalar("myvalue".to_owned()), actual);

        let actual: ScalarOrSeq<String> = serde_json::from_str(r#"["v1", "v2"]"#).unwrap();
        assert_eq!(ScalarOrSeq::Seq(vec!["v1".to_owned(), "v2".to_owned()]), actual);
    }

    #[test]
    fn test_scalar_to_string() {
        let actual: Vec<Scalar> = serde_json::from_str(r#"["abc", true, 10, -2.5]"#).unwrap();
        let actual: Vec<String> = actual.into_iter().map(String::from).collect();
        assert_eq!(actual, vec!["abc", "true", "10", "-2.5"]);
    }

    #[test]
    fn test_block_json() {
        let jsp = r#"
        {
            "StringEquals": {
                "x-amz-acl": "private",
                "delimiter": ["/", "-"]
            },
            "NumericLessThanIfExists": {
                "max-keys": 10
            },
            "Bool": {
                "secure-transport": true
            }
        }
        "#;

        let actual = ConditionBlock::from_json(jsp).unwrap();
        let expected: ConditionBlock = vec![
            Condition::new(Operator::StringEquals, "x-amz-acl", vec!["private"]),
            Condition::new(Operator::StringEquals, "delimiter", vec!["/", "-"]),
            Condition::new(Operator::NumericLessThan, "max-keys", vec!["10"]).with_if_exists(),
            Condition::new(Operator::Bool, "secure-transport", vec!["true"]),
        ]
        .into();
        assert_eq!(expected, actual);

        let serialized = serde_json::to_string(&expected).unwrap();
        let expected = r#"{"StringEquals":{"x-amz-acl":"private","delimiter":["/","-"]},"NumericLessThanIfExists":{"max-keys":"10"},"Bool":{"secure-transport":"true"}}"#;
        assert_eq!(expected, serialized);
    }

    #[test]
    fn test_block_json_round_trip() {
        let block = ConditionBlock::from_clauses(vec![
            ("StringLike", "prefix", vec!["photos/*"]),
            ("NullIfExists", "x-amz-acl", vec!["false"]),
            ("StringLike", "delimiter", vec!["/"]),
        ])
        .unwrap();

        let serialized = serde_json::to_string(&block).unwrap();
        assert_eq!(
            serialized,
            r#"{"StringLike":{"prefix":"photos/*","delimiter":"/"},"NullIfExists":{"x-amz-acl":"false"}}"#
        );

        // clauses come back grouped by operator, keys in document order
        let actual = ConditionBlock::from_json(&serialized).unwrap();
        let names: Vec<&str> = actual.iter().map(Condition::key).collect();
        assert_eq!(names, vec!["prefix", "delimiter", "x-amz-acl"]);
    }

    #[test]
    fn test_deserialize_duplicate_key() {
        // a repeated key is two clauses, both have to hold
        let block = ConditionBlock::from_json(r#"{"StringNotEquals": {"k": "a", "k": "b"}}"#).unwrap();
        let expected: ConditionBlock = vec![
            Condition::new(Operator::StringNotEquals, "k", vec!["a"]),
            Condition::new(Operator::StringNotEquals, "k", vec!["b"]),
        ]
        .into();
        assert_eq!(expected, block);

        assert!(!block.evaluate(&ctx_of(&[("k", Some("a"))])));
        assert!(!block.evaluate(&ctx_of(&[("k", Some("b"))])));
        assert!(block.evaluate(&ctx_of(&[("k", Some("c"))])));

        // and they can't be folded back into one object
        assert!(serde_json::to_string(&block).is_err());

        // a single condition can't hide one either
        assert!(serde_json::from_str::<Condition>(r#"{"StringEquals": {"k": "a", "k": "b"}}"#).is_err());
    }

    #[test]
    fn test_serialize_duplicate_key() {
        let mut block = ConditionBlock::new();
        block.push(Condition::new(Operator::StringNotEquals, "k1", vec!["a"]));
        block.push(Condition::new(Operator::StringNotEquals, "k1", vec!["b"]));
        assert!(serde_json::to_string(&block).is_err());
    }

    #[test]
    fn test_single_condition_json() {
        let jsp = r#"{"StringEqualsIfExists": {"mykey": ["v1", "v2"]}}"#;
        let actual: Condition = serde_json::from_str(jsp).unwrap();
        let expected = Condition::new(Operator::StringEquals, "mykey", vec!["v1", "v2"]).with_if_exists();
        assert_eq!(expected, actual);

        let serialized = serde_json::to_string(&expected).unwrap();
        assert_eq!(r#"{"StringEqualsIfExists":{"mykey":["v1","v2"]}}"#, serialized);

        let jsp = r#"{"StringEquals": {"k1": "v1", "k2": "v2"}}"#;
        assert!(serde_json::from_str::<Condition>(jsp).is_err());
    }

    #[test]
    fn test_invalid_cond_json() {
        let jsp = r#"
            {
                "unknown": {
                    "mykey": "myvalue"
                }
            }
        "#;

        match ConditionBlock::from_json(jsp) {
            Err(PolicyError::Serde(e)) => assert!(e.to_string().contains("unknown condition operator 'unknown'")),
            other => panic!("unexpected result {:?}", other),
        }

        let jsp = r#"{"DateLessThan": {"aws:CurrentTime": "2019-07-22T00:00:00Z"}}"#;
        assert!(ConditionBlock::from_json(jsp).is_err());

        let jsp = r#"{"StringEquals": {"k1": {"nested": "object"}}}"#;
        assert!(ConditionBlock::from_json(jsp).is_err());
    }

    #[test]
    fn test_from_clauses_unknown_operator() {
        let actual = ConditionBlock::from_clauses(vec![
            ("StringEquals", "k1", vec!["v1"]),
            ("StringSortOfEquals", "k2", vec!["v2"]),
        ]);

        match actual {
            Err(PolicyError::UnknownOperator(name)) => assert_eq!(name, "StringSortOfEquals"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_conditions_satisfied() {
        let block = ConditionBlock::from_clauses(vec![
            ("StringEquals", "x-amz-acl", vec!["private"]),
            ("NumericLessThanEquals", "max-keys", vec!["100"]),
            ("Null", "x-amz-grant-full-control", vec!["true"]),
        ])
        .unwrap();

        let ctx = ctx_of(&[("x-amz-acl", Some("private")), ("max-keys", Some("100"))]);
        assert!(block.evaluate(&ctx));

        // every condition has to hold
        let ctx = ctx_of(&[("x-amz-acl", Some("public-read")), ("max-keys", Some("100"))]);
        assert!(!block.evaluate(&ctx));

        let ctx = ctx_of(&[
            ("x-amz-acl", Some("private")),
            ("max-keys", Some("100")),
            ("x-amz-grant-full-control", None),
        ]);
        assert!(!block.evaluate(&ctx));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Condition>();
        assert_send_sync::<ConditionBlock>();
        assert_send_sync::<Context>();
        assert_send_sync::<Operator>();
    }

    #[test]
    fn test_empty_block() {
        assert!(ConditionBlock::new().evaluate(&Context::new()));
        assert!(conditions_satisfied(&[], &Context::new()));

        let block = ConditionBlock::from_json("{}").unwrap();
        assert!(block.is_empty());
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::iter::FromIterator;

/// The state of a single request attribute as seen by a condition.
///
/// A key that was never supplied and a key supplied without a value are different things to the
/// `Null` operator, so the distinction is kept all the way down to the matchers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Attribute<'a> {
    /// The key was never supplied with the request
    Absent,

    /// The key was supplied but carries no value
    Null,

    /// The key was supplied with a value
    Value(&'a str),
}

impl<'a> Attribute<'a> {
    /// True if the key was supplied at all (with or without a value)
    pub fn is_present(&self) -> bool {
        *self != Attribute::Absent
    }

    /// The attribute value, if the key is present and not null
    pub fn value(&self) -> Option<&'a str> {
        match *self {
            Attribute::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Authorization request context. Consists of key/value pairs gathered from the incoming request
/// (headers, query parameters, etc) that conditions are tested against.
///
/// Serialized as a JSON object, a `null` value marks a key that is present without a value:
///
/// ```
/// # use policy_conditions::{Attribute, Context};
/// let ctx: Context = serde_json::from_str(r#"{"x-amz-acl": "private", "max-keys": null}"#).unwrap();
/// assert_eq!(ctx.get("x-amz-acl"), Attribute::Value("private"));
/// assert_eq!(ctx.get("max-keys"), Attribute::Null);
/// assert_eq!(ctx.get("prefix"), Attribute::Absent);
/// ```
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Clone)]
#[serde(transparent)]
pub struct Context(HashMap<String, Option<String>>);

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Context(HashMap::new())
    }

    /// Insert a key with a value. An existing entry for the key is replaced.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), Some(value.into()));
    }

    /// Insert a key that is present on the request but carries no value
    pub fn insert_null<K>(&mut self, key: K)
    where
        K: Into<String>,
    {
        self.0.insert(key.into(), None);
    }

    /// Remove a key entirely, making it absent
    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    /// Look up the state of an attribute
    pub fn get(&self, key: &str) -> Attribute<'_> {
        match self.0.get(key) {
            None => Attribute::Absent,
            Some(None) => Attribute::Null,
            Some(Some(v)) => Attribute::Value(v.as_str()),
        }
    }

    /// True if the key was supplied (possibly with a null value)
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys present in the context
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no keys are present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Context
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Context(iter.into_iter().map(|(k, v)| (k.into(), v.map(Into::into))).collect())
    }
}

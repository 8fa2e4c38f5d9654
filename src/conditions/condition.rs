use super::operator::IF_EXISTS_SUFFIX;
use super::{boolean, null, numeric, string, Operator};
use crate::{Attribute, Context, Result};
use log::{debug, trace};
use std::cmp::Ordering;

/// A type that is able to evaluate whether the incoming (auth request) context passes some test (condition).
pub trait Eval {
    /// Evaluate if a condition is met for given request context
    fn evaluate(&self, ctx: &Context) -> bool;
}

/// A single condition clause: an operator, the request key it tests, and the values the request
/// value is compared against.
///
/// The operator name is decoded once when the clause is built, so evaluating never re-parses it.
///
/// ```
/// # use policy_conditions::{Condition, Context, Eval};
/// let cond = Condition::parse("StringLikeIfExists", "prefix", vec!["photos/*"]).unwrap();
///
/// let mut ctx = Context::new();
/// assert!(cond.evaluate(&ctx));
///
/// ctx.insert("prefix", "photos/2019/");
/// assert!(cond.evaluate(&ctx));
///
/// ctx.insert("prefix", "videos/");
/// assert!(!cond.evaluate(&ctx));
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct Condition {
    operator: Operator,
    if_exists: bool,
    key: String,
    values: Vec<String>,
}

impl Condition {
    /// Create a new condition for the given operator, key, and allowed values
    pub fn new<K, I, V>(operator: Operator, key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Condition {
            operator,
            if_exists: false,
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a new condition from an operator name as it appears in a policy, e.g.
    /// `"NumericLessThanIfExists"`. Unknown or unsupported operator names are an error.
    pub fn parse<K, I, V>(name: &str, key: K, values: I) -> Result<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let (operator, if_exists) = Operator::parse_qualified(name)?;
        let mut cond = Condition::new(operator, key, values);
        cond.if_exists = if_exists;
        Ok(cond)
    }

    /// Set the "IfExists" modifier for this condition
    pub fn with_if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Add an additional allowed value
    pub fn push<V>(&mut self, value: V) -> &mut Self
    where
        V: Into<String>,
    {
        self.values.push(value.into());
        self
    }

    /// The base operator (without the `IfExists` modifier)
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// True if the operator carries the `IfExists` modifier
    pub fn if_exists(&self) -> bool {
        self.if_exists
    }

    /// The request key this condition tests
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The values the request value is compared against, in policy order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The operator name used to serialize this condition, e.g. `StringEqualsIfExists`
    pub fn serialized_name(&self) -> String {
        if self.if_exists {
            format!("{}{}", self.operator.name(), IF_EXISTS_SUFFIX)
        } else {
            self.operator.name().to_owned()
        }
    }

    // Dispatch to the value matcher for the operator
    fn matches(&self, actual: Attribute<'_>) -> bool {
        if self.if_exists {
            // NullIfExists never takes the bypass and never matches
            if self.operator == Operator::Null {
                debug!("NullIfExists condition on '{}' does not match", self.key);
                return false;
            }

            if actual == Attribute::Absent {
                debug!("'{}' is not present, {} is satisfied", self.key, self.serialized_name());
                return true;
            }
        }

        if self.values.is_empty() {
            debug!("{} condition on '{}' has no values", self.serialized_name(), self.key);
            return false;
        }

        let values = self.values.as_slice();
        let value = actual.value();
        match self.operator {
            Operator::StringEquals => string::equals(values, value),
            Operator::StringNotEquals => string::not_equals(values, value),
            Operator::StringEqualsIgnoreCase => string::equals_ignore_case(values, value),
            Operator::StringNotEqualsIgnoreCase => string::not_equals_ignore_case(values, value),
            Operator::StringLike => string::like(values, value),
            Operator::StringNotLike => string::not_like(values, value),
            Operator::NumericEquals => numeric::compare(values, value, &[Ordering::Equal]),
            Operator::NumericNotEquals => numeric::not_equals(values, value),
            Operator::NumericLessThan => numeric::compare(values, value, &[Ordering::Less]),
            Operator::NumericLessThanEquals => numeric::compare(values, value, &[Ordering::Less, Ordering::Equal]),
            Operator::NumericGreaterThan => numeric::compare(values, value, &[Ordering::Greater]),
            Operator::NumericGreaterThanEquals => {
                numeric::compare(values, value, &[Ordering::Greater, Ordering::Equal])
            }
            Operator::Bool => boolean::equals(values, value),
            Operator::Null => null::is_null(values, actual),
        }
    }
}

impl Eval for Condition {
    fn evaluate(&self, ctx: &Context) -> bool {
        let result = self.matches(ctx.get(&self.key));
        trace!("{} {:?} on '{}' => {}", self.serialized_name(), self.values, self.key, result);
        result
    }
}

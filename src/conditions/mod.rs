//! Policy Conditions
//!
//! The Condition element (or Condition block) lets you specify conditions for when a policy statement is in effect.
//! In the Condition element, you build expressions in which you use condition operators (equal, less than, etc.) to match the condition keys and values
//! in the policy against keys and values in the authorization request context. To learn more about the request context, see [Context](crate::Context).
//!
//!
//! # Evaluation of conditions with multiple keys and/or multiple values
//!
//! If your policy has multiple condition operators or multiple keys attached to a single condition operator, the conditions are evaluated using a logical AND.
//! If a single condition operator includes multiple values for one key, that condition operator is evaluated using a logical OR. All conditions must resolve
//! to true to trigger the desired Allow or Deny effect.
//!
//! The negated operators (`StringNotEquals`, `StringNotEqualsIgnoreCase`, `StringNotLike`, `NumericNotEquals`) are the negation of that OR: the request
//! value must match *none* of the values.
//!
//! ## Example:
//!
//! ```text
//!    "StringEquals": {
//!        "key1": "value1",
//!        "key2": ["value2", "value3"]
//!    },
//!    "NumericLessThanEquals": {
//!        "max-keys": "100"
//!    }
//! ```
//!
//! - The `StringEquals` and the `NumericLessThanEquals` conditions are AND'd together.
//! - The `StringEquals` `key1` and `key2` conditions are AND'd together (both key1 and key2 must be present and match their values)
//! - The `StringEquals` `key2` condition can be either `value2` or `value3`
//!
//!
//! # IfExists
//!
//! Any operator name can carry an `IfExists` suffix (e.g. `StringLikeIfExists`). If the key is not present on the request at all the condition
//! evaluates to true, otherwise it is evaluated as normal. A key that is present with a null value counts as present. `NullIfExists` is accepted
//! but never matches.
//!
//!
//! # String Operators
//!
//! String condition operators let you construct Condition elements that restrict access based on comparing a key to a string value. `StringLike`
//! and `StringNotLike` treat the values as glob patterns where `*` matches any run of characters and `?` matches exactly one.
//!
//! # Numeric Operators
//!
//! Request and condition values are parsed as decimal numbers. A value that isn't a number can never satisfy a condition.
//!
//! # Bool and Null
//!
//! `Bool` compares the request value to the tokens `"true"` or `"false"`. `Null` tests for the presence of a key: `"true"` requires it to be absent,
//! `"false"` requires it to be present with a value.
//!
//!
//! For example, the following condition block restricts uploads to private objects:
//!
//! ```
//! # use policy_conditions::{ConditionBlock, Context, Eval};
//! let block = ConditionBlock::from_json(r#"
//!     {"StringEquals": {"x-amz-acl": "private"}}
//! "#).unwrap();
//!
//! let mut ctx = Context::new();
//! ctx.insert("x-amz-acl", "private");
//! assert!(block.evaluate(&ctx));
//! ```

mod block;
mod boolean;
mod condition;
mod null;
mod numeric;
mod operator;
mod string;
mod util;

pub use block::{conditions_satisfied, ConditionBlock};
pub use condition::{Condition, Eval};
pub use operator::Operator;

#![deny(missing_docs)]
//! Evaluates the Condition block of IAM style bucket and object policies against the attributes
//! of an incoming request.
//!
//! The crate decides one thing: whether a statement's conditions hold for a request. Matching the
//! statement's actions, resources and principals, and merging Allow/Deny across statements, are
//! left to the caller.

#![cfg_attr(feature = "nightly", feature(test))]
#[cfg(all(test, feature = "nightly"))]
extern crate test;

pub mod conditions;
mod context;
mod error;
mod wildcard;

pub use conditions::{conditions_satisfied, Condition, ConditionBlock, Eval, Operator};
pub use context::{Attribute, Context};
pub use error::{PolicyError, Result};

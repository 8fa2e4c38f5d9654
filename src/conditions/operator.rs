use crate::{PolicyError, Result};
use log::warn;
use std::fmt;
use std::str::FromStr;

/// Suffix that turns any operator into its "IfExists" form, e.g. `StringEqualsIfExists`
pub(crate) const IF_EXISTS_SUFFIX: &str = "IfExists";

// IAM operators that are valid policy syntax but are never evaluated here. Rejecting them
// explicitly keeps a statement that relies on one from passing or failing silently.
const UNSUPPORTED: &[&str] = &[
    "DateEquals",
    "DateNotEquals",
    "DateLessThan",
    "DateLessThanEquals",
    "DateGreaterThan",
    "DateGreaterThanEquals",
    "IpAddress",
    "NotIpAddress",
    "ArnEquals",
    "ArnNotEquals",
    "ArnLike",
    "ArnNotLike",
    "BinaryEquals",
];

macro_rules! operators {
    ( $( $(#[$meta:meta])* $name:ident ),* $(,)? ) => {
        /// The closed set of condition operators this engine evaluates.
        ///
        /// The `IfExists` modifier is not part of the operator, see [`Condition::if_exists`](crate::Condition::if_exists).
        #[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
        pub enum Operator {
            $( $(#[$meta])* $name, )*
        }

        impl Operator {
            /// Every recognized operator
            pub const ALL: &'static [Operator] = &[ $( Operator::$name, )* ];

            /// The canonical policy name of the operator (e.g. `"StringEquals"`)
            pub fn name(self) -> &'static str {
                match self {
                    $( Operator::$name => stringify!($name), )*
                }
            }
        }
    };
}

operators! {
    /// Exact matching, case sensitive
    StringEquals,
    /// Negated matching, case sensitive
    StringNotEquals,
    /// Exact matching, ignoring case
    StringEqualsIgnoreCase,
    /// Negated matching, ignoring case
    StringNotEqualsIgnoreCase,
    /// Case sensitive glob matching (`*` and `?` wildcards)
    StringLike,
    /// Negated case sensitive glob matching
    StringNotLike,
    /// Numeric equality
    NumericEquals,
    /// Negated numeric equality
    NumericNotEquals,
    /// Less than (`<`)
    NumericLessThan,
    /// Less than or equal (`<=`)
    NumericLessThanEquals,
    /// Greater than (`>`)
    NumericGreaterThan,
    /// Greater than or equal (`>=`)
    NumericGreaterThanEquals,
    /// Compare against `"true"` / `"false"`
    Bool,
    /// Test whether the key is present on the request
    Null,
}

impl Operator {
    /// Decode an operator name that may carry the `IfExists` suffix.
    ///
    /// Returns the base operator and whether the suffix was present.
    ///
    /// ```
    /// # use policy_conditions::conditions::Operator;
    /// let (op, if_exists) = Operator::parse_qualified("NumericLessThanIfExists").unwrap();
    /// assert_eq!(op, Operator::NumericLessThan);
    /// assert!(if_exists);
    /// ```
    pub fn parse_qualified(name: &str) -> Result<(Operator, bool)> {
        // an operator named exactly "IfExists" has no base to strip down to
        match name.strip_suffix(IF_EXISTS_SUFFIX) {
            Some(base) if !base.is_empty() => {
                let op = base.parse::<Operator>().map_err(|e| match e {
                    // report the name as written in the policy
                    PolicyError::UnknownOperator(_) => PolicyError::UnknownOperator(name.to_owned()),
                    PolicyError::UnsupportedOperator(_) => PolicyError::UnsupportedOperator(name.to_owned()),
                    other => other,
                })?;
                Ok((op, true))
            }
            _ => name.parse::<Operator>().map(|op| (op, false)),
        }
    }
}

impl FromStr for Operator {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Operator> {
        if let Some(op) = Operator::ALL.iter().find(|op| op.name() == s) {
            return Ok(*op);
        }

        if UNSUPPORTED.contains(&s) {
            warn!("rejecting unsupported condition operator '{}'", s);
            return Err(PolicyError::UnsupportedOperator(s.to_owned()));
        }

        warn!("rejecting unknown condition operator '{}'", s);
        Err(PolicyError::UnknownOperator(s.to_owned()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use failure::Fail;

/// Error type for policy conditions
#[derive(Fail, Debug)]
pub enum PolicyError {
    /// The condition names an operator that is not part of the recognized set
    #[fail(display = "unknown condition operator '{}'", _0)]
    UnknownOperator(String),

    /// The operator is a valid IAM operator but this engine does not evaluate it (dates, IP
    /// addresses, ARNs, binary)
    #[fail(display = "condition operator '{}' is not supported", _0)]
    UnsupportedOperator(String),

    /// Serialization or deserialization error
    #[fail(display = "serde_json error: {}", _0)]
    Serde(#[cause] serde_json::Error),
}

impl From<serde_json::Error> for PolicyError {
    fn from(err: serde_json::Error) -> PolicyError {
        PolicyError::Serde(err)
    }
}

/// Result type for policy conditions
pub type Result<T> = std::result::Result<T, PolicyError>;

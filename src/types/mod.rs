#![forbid(unsafe_code)]

//! Crate-wide error and result types.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UmbraError>;

/// Structured errors raised by the strategy and traversal cores.
///
/// Every failure here is local and synchronous; errors terminate construction
/// rather than leaving partial state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UmbraError {
    /// An argument violated a construction invariant, e.g. wrapping an
    /// already-wrapped element.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A property value was read unconditionally while absent. Callers must
    /// check presence first.
    #[error("no value present for property '{0}'")]
    NoSuchValue(String),
    /// The declared precedence constraints among policies form a cycle.
    #[error("policy precedence cycle involving '{0}'")]
    PolicyCycle(String),
    /// A base-graph lookup failed.
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl UmbraError {
    /// Returns a machine-readable code for the error variant.
    pub fn code(&self) -> &'static str {
        match self {
            UmbraError::InvalidArgument(_) => "InvalidArgument",
            UmbraError::NoSuchValue(_) => "NoSuchValue",
            UmbraError::PolicyCycle(_) => "PolicyCycle",
            UmbraError::NotFound(_) => "NotFound",
        }
    }
}

//! Enforcement error types.

use mandate_core::MemberKind;
use std::fmt;
use thiserror::Error;

/// Result type for enforcement operations.
pub type EnforceResult<T> = Result<T, EnforceError>;

/// A required member that still carries its sentinel on the target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractViolation {
    /// Offending member name.
    pub member: String,
    /// Constant or field.
    pub kind: MemberKind,
    /// Type that failed to override the member.
    pub target_type: String,
}

impl ContractViolation {
    pub fn new(member: impl Into<String>, kind: MemberKind, target_type: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            kind,
            target_type: target_type.into(),
        }
    }

    pub fn constant(member: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self::new(member, MemberKind::Constant, target_type)
    }

    pub fn field(member: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self::new(member, MemberKind::Field, target_type)
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MemberKind::Constant => write!(
                f,
                "Constant {} must be overridden by {}",
                self.member, self.target_type
            ),
            MemberKind::Field => write!(
                f,
                "Property {} must be set by {}",
                self.member, self.target_type
            ),
        }
    }
}

impl std::error::Error for ContractViolation {}

/// Errors that can occur during an enforcement call.
#[derive(Debug, Error, PartialEq)]
pub enum EnforceError {
    #[error(transparent)]
    Violation(#[from] ContractViolation),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Type {target} does not derive from {base}")]
    NotDerived { base: String, target: String },

    #[error("Instance of {actual} cannot stand in for {expected}")]
    InstanceMismatch { expected: String, actual: String },
}

impl EnforceError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType(name.into())
    }

    /// The violation carried by this error, if it is one.
    pub fn as_violation(&self) -> Option<&ContractViolation> {
        match self {
            Self::Violation(violation) => Some(violation),
            _ => None,
        }
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, Self::Violation(_))
    }
}

/// Errors from loading or addressing sentinel configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown sentinel target: {0}")]
    UnknownTarget(String),

    #[error("Invalid sentinel configuration: {0}")]
    Json(#[from] serde_json::Error),
}

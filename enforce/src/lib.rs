//! Mandate Enforce
//!
//! Verify at construction time that a derived type replaced every
//! sentinel-valued constant and field its base declares.
//!
//! Responsibilities:
//! - Hold the sentinel configuration (process-wide or per enforcer)
//! - Build a call-local enforcement request per check
//! - Enumerate and resolve the base type's constants and fields
//! - Fail fast on the first member still carrying its sentinel

mod config;
mod enforcer;
mod error;
mod introspect;
mod request;
mod validate;
mod violation;

pub use config::{configure, shared_config, SentinelConfig, SentinelTarget, DEFAULT_SENTINEL};
pub use enforcer::{enforce, Enforcer};
pub use error::{ConfigError, ContractViolation, EnforceError, EnforceResult};
pub use introspect::{FieldPolicy, FieldValue, Introspector, ResolvedMember};
pub use request::EnforcementRequest;
pub use validate::check_member;
pub use violation::Violations;

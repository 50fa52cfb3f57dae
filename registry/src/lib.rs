//! Mandate Registry
//!
//! Runtime schema lookup for types that declare required members.
//! The registry is immutable after construction via RegistryBuilder.

mod builder;
mod registry;
mod types;

pub use builder::{RegistryBuilder, RegistryError, RegistryResult, TypeBuilder};
pub use registry::Registry;
pub use types::*;

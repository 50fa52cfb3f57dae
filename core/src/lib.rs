//! Mandate Core Types
//!
//! This crate provides the foundational types used throughout Mandate:
//! - Type identifiers (TypeId)
//! - Value types (the Value enum with loose and strict comparison)
//! - Member descriptors (MemberKind, Visibility)
//! - Field sources (the FieldSource trait and the Instance record)

mod id;
mod instance;
mod member;
mod value;

pub use id::*;
pub use instance::*;
pub use member::*;
pub use value::*;

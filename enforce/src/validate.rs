//! Sentinel comparison.

use crate::config::SentinelConfig;
use crate::error::ContractViolation;
use crate::introspect::{FieldValue, ResolvedMember};

/// Check one resolved member against the sentinels.
///
/// Constants match their sentinel strictly. Fields match loosely, and an
/// absent field counts as a match. Unresolvable fields never match.
pub fn check_member(
    member: &ResolvedMember<'_>,
    sentinels: &SentinelConfig,
    target_type: &str,
) -> Option<ContractViolation> {
    let violated = match member {
        ResolvedMember::Constant { effective, .. } => *effective == sentinels.constant_sentinel,
        ResolvedMember::Field { value, .. } => match value {
            FieldValue::Value(value) => value.loose_eq(&sentinels.field_sentinel),
            FieldValue::Absent => true,
            FieldValue::Unresolvable => false,
        },
    };
    if violated {
        Some(ContractViolation::new(member.name(), member.kind(), target_type))
    } else {
        None
    }
}

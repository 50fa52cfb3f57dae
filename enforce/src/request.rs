//! The call-scoped enforcement request.

use crate::error::{EnforceError, EnforceResult};
use mandate_core::FieldSource;
use mandate_registry::{Registry, TypeDef};
use std::fmt;

/// The base/target/instance triple being validated by one `enforce` call.
///
/// Built fresh for every call and passed by reference through the
/// introspector and validator, so concurrent or reentrant checks never see
/// each other's context.
#[derive(Clone, Copy)]
pub struct EnforcementRequest<'r, 'i> {
    /// Type declaring the required members.
    pub base_type: &'r TypeDef,
    /// Concrete type being checked.
    pub target_type: &'r TypeDef,
    /// Live object of the target type, when the caller has one.
    pub target_instance: Option<&'i dyn FieldSource>,
}

impl<'r, 'i> EnforcementRequest<'r, 'i> {
    /// Look up both types and check that the call makes sense.
    ///
    /// The target must be the base or one of its descendants, and a supplied
    /// instance must belong to the target type or a descendant of it.
    pub fn new(
        registry: &'r Registry,
        base: &str,
        target: &str,
        target_instance: Option<&'i dyn FieldSource>,
    ) -> EnforceResult<Self> {
        let base_type = registry
            .get_type_by_name(base)
            .ok_or_else(|| EnforceError::unknown_type(base))?;
        let target_type = registry
            .get_type_by_name(target)
            .ok_or_else(|| EnforceError::unknown_type(target))?;

        if !registry.is_subtype(target_type.id, base_type.id) {
            return Err(EnforceError::NotDerived {
                base: base_type.name.clone(),
                target: target_type.name.clone(),
            });
        }

        if let Some(instance) = target_instance {
            let actual = instance.type_name();
            let belongs = registry
                .get_type_id(actual)
                .is_some_and(|id| registry.is_subtype(id, target_type.id));
            if !belongs {
                return Err(EnforceError::InstanceMismatch {
                    expected: target_type.name.clone(),
                    actual: actual.to_string(),
                });
            }
        }

        Ok(Self {
            base_type,
            target_type,
            target_instance,
        })
    }

    pub fn has_instance(&self) -> bool {
        self.target_instance.is_some()
    }
}

impl fmt::Debug for EnforcementRequest<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnforcementRequest")
            .field("base_type", &self.base_type.name)
            .field("target_type", &self.target_type.name)
            .field(
                "target_instance",
                &self.target_instance.map(|instance| instance.type_name()),
            )
            .finish()
    }
}

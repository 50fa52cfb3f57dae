//! The enforcement entry points.

use crate::config::{shared_config, SentinelConfig};
use crate::error::EnforceResult;
use crate::introspect::{FieldValue, Introspector, ResolvedMember};
use crate::request::EnforcementRequest;
use crate::validate::check_member;
use crate::violation::Violations;
use mandate_core::{FieldSource, Value};
use mandate_registry::Registry;

/// Checks derived types against the required members of their base.
///
/// An `Enforcer` owns its sentinel configuration; nothing it does touches
/// process-wide state.
#[derive(Debug, Clone, Default)]
pub struct Enforcer {
    config: SentinelConfig,
}

impl Enforcer {
    /// Create an enforcer with the default `"abstract"` sentinels.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SentinelConfig) -> Self {
        Self { config }
    }

    /// Snapshot of the process-wide configuration set through [`crate::configure`].
    pub fn from_shared() -> Self {
        Self::with_config(shared_config())
    }

    pub fn config(&self) -> &SentinelConfig {
        &self.config
    }

    /// Set a sentinel by its configuration name. Returns false for unknown names.
    pub fn configure(&mut self, name: &str, value: impl Into<Value>) -> bool {
        self.config.configure(name, value)
    }

    /// Verify that `target` replaced every sentinel-valued member of `base`.
    ///
    /// Constants are checked before fields, and the first violation is
    /// returned. Fields with neither an instance nor a singleton accessor to
    /// read them from are skipped.
    pub fn enforce(
        &self,
        registry: &Registry,
        base: &str,
        target: &str,
        instance: Option<&dyn FieldSource>,
    ) -> EnforceResult<()> {
        let introspector = self.introspector(registry, base, target, instance)?;
        let target_name = introspector.request().target_type.name.as_str();

        for member in introspector.constants() {
            if let Some(violation) = check_member(&member, &self.config, target_name) {
                log_violation(&member, target_name);
                return Err(violation.into());
            }
        }
        for member in introspector.fields() {
            log_unresolvable(&member, target_name);
            if let Some(violation) = check_member(&member, &self.config, target_name) {
                log_violation(&member, target_name);
                return Err(violation.into());
            }
        }
        Ok(())
    }

    /// Like `enforce`, but reports every violation instead of stopping at
    /// the first one.
    ///
    /// Only a malformed call is an error; the violations are the `Ok` value.
    pub fn audit(
        &self,
        registry: &Registry,
        base: &str,
        target: &str,
        instance: Option<&dyn FieldSource>,
    ) -> EnforceResult<Violations> {
        let introspector = self.introspector(registry, base, target, instance)?;
        let target_name = introspector.request().target_type.name.as_str();

        let mut violations = Violations::new();
        let fields = introspector.fields();
        for member in introspector.constants().chain(fields) {
            log_unresolvable(&member, target_name);
            if let Some(violation) = check_member(&member, &self.config, target_name) {
                violations.push(violation);
            }
        }
        Ok(violations)
    }

    /// Enforce with `instance` as the target instance and hand it back.
    ///
    /// Meant as the last step of a constructor: a violation drops the
    /// half-built object.
    pub fn construct<I: FieldSource>(
        &self,
        registry: &Registry,
        base: &str,
        instance: I,
    ) -> EnforceResult<I> {
        let target = instance.type_name().to_string();
        self.enforce(registry, base, &target, Some(&instance))?;
        Ok(instance)
    }

    fn introspector<'r, 'i>(
        &self,
        registry: &'r Registry,
        base: &str,
        target: &str,
        instance: Option<&'i dyn FieldSource>,
    ) -> EnforceResult<Introspector<'r, 'i>> {
        let request = EnforcementRequest::new(registry, base, target, instance)?;
        tracing::debug!(
            target: "mandate::enforce",
            base = %request.base_type.name,
            target_type = %request.target_type.name,
            instance = request.has_instance(),
            "enforcing required members"
        );
        Ok(Introspector::new(registry, request))
    }
}

fn log_violation(member: &ResolvedMember<'_>, target: &str) {
    tracing::debug!(
        target: "mandate::enforce",
        member = member.name(),
        kind = %member.kind(),
        target_type = target,
        "required member not overridden"
    );
}

fn log_unresolvable(member: &ResolvedMember<'_>, target: &str) {
    if let ResolvedMember::Field {
        value: FieldValue::Unresolvable,
        ..
    } = member
    {
        tracing::debug!(
            target: "mandate::enforce",
            member = member.name(),
            target_type = target,
            "field has no instance or singleton accessor; left unchecked"
        );
    }
}

/// Enforce using the process-wide sentinel configuration.
///
/// The configuration is snapshotted when the call starts.
pub fn enforce(
    registry: &Registry,
    base: &str,
    target: &str,
    instance: Option<&dyn FieldSource>,
) -> EnforceResult<()> {
    Enforcer::from_shared().enforce(registry, base, target, instance)
}

//! Member enumeration and value resolution.

use crate::request::EnforcementRequest;
use mandate_core::{FieldSource, MemberKind, Value};
use mandate_registry::{ConstDef, FieldDef, Registry};

/// Which base-type fields get enumerated for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// An instance or singleton accessor is available to read non-public values.
    PublicAndProtected,
    /// Nothing can read non-public values, so only public fields are listed.
    PublicOnly,
}

impl FieldPolicy {
    pub fn admits(&self, field: &FieldDef) -> bool {
        match self {
            FieldPolicy::PublicAndProtected => field.visibility.is_inheritable(),
            FieldPolicy::PublicOnly => field.visibility.is_public(),
        }
    }
}

/// What a field resolved to on the target.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A concrete value was read.
    Value(Value),
    /// The object holds no value for the field (or holds `Null`).
    Absent,
    /// No instance and no singleton accessor: the field was never read.
    Unresolvable,
}

/// A base-type member paired with its effective value on the target.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedMember<'r> {
    Constant {
        /// Definition as declared on the base type.
        def: &'r ConstDef,
        /// Value seen through the target type.
        effective: Value,
    },
    Field {
        /// Definition as declared on the base type.
        def: &'r FieldDef,
        value: FieldValue,
    },
}

impl ResolvedMember<'_> {
    pub fn name(&self) -> &str {
        match self {
            ResolvedMember::Constant { def, .. } => &def.name,
            ResolvedMember::Field { def, .. } => &def.name,
        }
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            ResolvedMember::Constant { .. } => MemberKind::Constant,
            ResolvedMember::Field { .. } => MemberKind::Field,
        }
    }

    /// Value declared on the base type.
    pub fn declared_value(&self) -> &Value {
        match self {
            ResolvedMember::Constant { def, .. } => &def.value,
            ResolvedMember::Field { def, .. } => &def.default,
        }
    }
}

enum FieldReader<'i> {
    Instance(&'i dyn FieldSource),
    Singleton(Box<dyn FieldSource>),
    Unavailable,
}

impl FieldReader<'_> {
    fn source(&self) -> Option<&dyn FieldSource> {
        match self {
            FieldReader::Instance(instance) => Some(*instance),
            FieldReader::Singleton(instance) => Some(instance.as_ref()),
            FieldReader::Unavailable => None,
        }
    }
}

/// Enumerates a request's base-type members and resolves them against the target.
pub struct Introspector<'r, 'i> {
    registry: &'r Registry,
    request: EnforcementRequest<'r, 'i>,
}

impl<'r, 'i> Introspector<'r, 'i> {
    pub fn new(registry: &'r Registry, request: EnforcementRequest<'r, 'i>) -> Self {
        Self { registry, request }
    }

    pub fn request(&self) -> &EnforcementRequest<'r, 'i> {
        &self.request
    }

    /// Constants declared on the base, each resolved through the target type.
    pub fn constants(&self) -> impl Iterator<Item = ResolvedMember<'r>> {
        let registry = self.registry;
        let target_id = self.request.target_type.id;
        registry
            .get_all_constants(self.request.base_type.id)
            .into_iter()
            .map(move |def| {
                let effective = registry
                    .resolve_constant(target_id, &def.name)
                    .map(|winner| winner.value.clone())
                    .unwrap_or_else(|| def.value.clone());
                ResolvedMember::Constant { def, effective }
            })
    }

    /// Field enumeration policy for this request.
    pub fn field_policy(&self) -> FieldPolicy {
        if self.request.has_instance() || self.target_has_singleton() {
            FieldPolicy::PublicAndProtected
        } else {
            FieldPolicy::PublicOnly
        }
    }

    fn target_has_singleton(&self) -> bool {
        self.registry
            .singleton_accessor(self.request.target_type.id)
            .is_some()
    }

    /// Fields declared on the base that the policy admits, each resolved
    /// through the instance, else the singleton accessor, else not at all.
    ///
    /// The singleton accessor is invoked at most once per call.
    pub fn fields(&self) -> Vec<ResolvedMember<'r>> {
        let policy = self.field_policy();
        let candidates: Vec<&'r FieldDef> = self
            .registry
            .get_all_fields(self.request.base_type.id)
            .into_iter()
            .filter(|def| policy.admits(def))
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }

        let reader = self.reader();
        candidates
            .into_iter()
            .map(|def| {
                let value = match reader.source() {
                    Some(source) => self.read_field(source, def),
                    None => FieldValue::Unresolvable,
                };
                ResolvedMember::Field { def, value }
            })
            .collect()
    }

    fn reader(&self) -> FieldReader<'i> {
        if let Some(instance) = self.request.target_instance {
            return FieldReader::Instance(instance);
        }
        match self.registry.singleton_accessor(self.request.target_type.id) {
            Some(accessor) => FieldReader::Singleton(accessor.instance()),
            None => FieldReader::Unavailable,
        }
    }

    /// An object that never assigned the field carries its own type's
    /// declared default for it. Unregistered object types fall back to the
    /// target type.
    fn read_field(&self, source: &dyn FieldSource, def: &FieldDef) -> FieldValue {
        let value = source.field(&def.name).or_else(|| {
            let owner = self
                .registry
                .get_type_id(source.type_name())
                .unwrap_or(self.request.target_type.id);
            self.registry
                .resolve_field(owner, &def.name)
                .map(|declared| declared.default.clone())
        });
        match value {
            Some(Value::Null) | None => FieldValue::Absent,
            Some(value) => FieldValue::Value(value),
        }
    }
}

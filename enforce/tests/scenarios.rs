//! End-to-end enforcement scenarios: a base type declares sentinel members,
//! descendants do or do not override them.

use mandate_core::{fields, FieldSource, Instance, MemberKind, Value};
use mandate_enforce::{ContractViolation, EnforceError, Enforcer, SentinelConfig, SentinelTarget};
use mandate_registry::{FieldDef, Registry, RegistryBuilder};
use pretty_assertions::assert_eq;

fn registry() -> Registry {
    let mut builder = RegistryBuilder::new();
    builder
        .add_type("Base")
        .constant("FIELDCONST", "abstract")
        .field(FieldDef::new("public_var", "abstract"))
        .field(FieldDef::new("protected_var", "abstract").protected())
        .field(FieldDef::new("private_var", "abstract").private())
        .done()
        .unwrap();
    builder
        .add_type("Complete")
        .extends("Base")
        .constant("FIELDCONST", "text")
        .done()
        .unwrap();
    builder
        .add_type("Forgetful")
        .extends("Base")
        .done()
        .unwrap();
    builder
        .add_type("Shared")
        .extends("Base")
        .constant("FIELDCONST", "text")
        .singleton(|| {
            Instance::with_fields(
                "Shared",
                fields! { "public_var" => "set", "protected_var" => "abstract" },
            )
        })
        .done()
        .unwrap();
    builder
        .add_type("Settled")
        .extends("Complete")
        .field(FieldDef::new("public_var", "ok"))
        .field(FieldDef::new("protected_var", "ok").protected())
        .done()
        .unwrap();
    builder
        .add_type("Lazy")
        .extends("Base")
        .constant("FIELDCONST", "text")
        .singleton(|| Instance::new("LazyImpl"))
        .done()
        .unwrap();
    builder
        .add_type("LazyImpl")
        .extends("Lazy")
        .field(FieldDef::new("public_var", "ok"))
        .field(FieldDef::new("protected_var", "ok").protected())
        .done()
        .unwrap();
    builder
        .add_type("Counter")
        .constant("LIMIT", "abstract")
        .field(FieldDef::new("count", 0i64))
        .done()
        .unwrap();
    builder
        .add_type("ZeroCounter")
        .extends("Counter")
        .constant("LIMIT", 10i64)
        .done()
        .unwrap();
    builder.build().unwrap()
}

fn violation(err: EnforceError) -> ContractViolation {
    match err {
        EnforceError::Violation(violation) => violation,
        other => panic!("expected a contract violation, got {other:?}"),
    }
}

#[test]
fn overridden_constant_passes() {
    // GIVEN Complete redeclares FIELDCONST = "text"
    let registry = registry();

    // WHEN enforcing without an instance
    let result = Enforcer::new().enforce(&registry, "Base", "Complete", None);

    // THEN constants pass and the unreadable public field is skipped
    assert_eq!(result, Ok(()));
}

#[test]
fn inherited_constant_is_reported() {
    let registry = registry();

    let err = Enforcer::new()
        .enforce(&registry, "Base", "Forgetful", None)
        .unwrap_err();

    assert_eq!(violation(err), ContractViolation::constant("FIELDCONST", "Forgetful"));
}

#[test]
fn untouched_public_field_on_instance_is_reported() {
    // GIVEN an instance that keeps public_var = "abstract"
    let registry = registry();
    let instance = Instance::with_fields(
        "Complete",
        fields! { "public_var" => "abstract", "protected_var" => "set" },
    );

    // WHEN
    let err = Enforcer::new()
        .enforce(&registry, "Base", "Complete", Some(&instance))
        .unwrap_err();

    // THEN
    let violation = violation(err);
    assert_eq!(violation.member, "public_var");
    assert_eq!(violation.kind, MemberKind::Field);
    assert_eq!(violation.to_string(), "Property public_var must be set by Complete");
}

#[test]
fn protected_field_without_read_path_is_not_enumerated() {
    // GIVEN protected_var keeps its sentinel, but there is no instance or accessor
    let registry = registry();

    // WHEN
    let violations = Enforcer::new()
        .audit(&registry, "Base", "Complete", None)
        .unwrap();

    // THEN nothing is reported for it
    assert!(violations.is_empty());
}

#[test]
fn protected_field_on_instance_is_checked() {
    let registry = registry();
    let instance = Instance::with_fields("Complete", fields! { "public_var" => "set" });

    let err = Enforcer::new()
        .enforce(&registry, "Base", "Complete", Some(&instance))
        .unwrap_err();

    assert_eq!(violation(err), ContractViolation::field("protected_var", "Complete"));
}

#[test]
fn private_fields_are_never_checked() {
    let registry = registry();
    let instance = Instance::with_fields(
        "Complete",
        fields! { "public_var" => "set", "protected_var" => "set" },
    );

    let result = Enforcer::new().enforce(&registry, "Base", "Complete", Some(&instance));

    assert_eq!(result, Ok(()));
}

#[test]
fn singleton_accessor_stands_in_for_instance() {
    // GIVEN Shared's singleton leaves protected_var = "abstract"
    let registry = registry();

    // WHEN enforcing without an instance
    let err = Enforcer::new()
        .enforce(&registry, "Base", "Shared", None)
        .unwrap_err();

    // THEN the accessor was used to read it
    assert_eq!(violation(err), ContractViolation::field("protected_var", "Shared"));
}

#[test]
fn descendant_instance_defaults_come_from_its_own_type() {
    // GIVEN an object built as Settled, which redeclares both fields
    let registry = registry();
    let instance = Instance::new("Settled");

    // WHEN an intermediate constructor enforces against Complete
    let as_intermediate = Enforcer::new().enforce(&registry, "Base", "Complete", Some(&instance));
    let as_concrete = Enforcer::new().enforce(&registry, "Base", "Settled", Some(&instance));

    // THEN the object's own defaults decide, whichever target is named
    assert_eq!(as_intermediate, Ok(()));
    assert_eq!(as_concrete, Ok(()));
}

#[test]
fn singleton_of_descendant_type_uses_its_own_defaults() {
    // GIVEN Lazy's accessor hands out a LazyImpl with no fields assigned
    let registry = registry();

    // WHEN
    let result = Enforcer::new().enforce(&registry, "Base", "Lazy", None);

    // THEN LazyImpl's redeclared defaults are read
    assert_eq!(result, Ok(()));
}

#[test]
fn null_field_counts_as_absent() {
    let registry = registry();
    let instance = Instance::with_fields(
        "Complete",
        fields! { "public_var" => Value::Null, "protected_var" => "set" },
    );

    let err = Enforcer::new()
        .enforce(&registry, "Base", "Complete", Some(&instance))
        .unwrap_err();

    assert_eq!(violation(err), ContractViolation::field("public_var", "Complete"));
}

#[test]
fn zero_field_matches_zero_sentinel() {
    // GIVEN the field sentinel is configured to 0
    let registry = registry();
    let mut enforcer = Enforcer::new();
    assert!(enforcer.configure("field", 0i64));
    let instance = Instance::with_fields("ZeroCounter", fields! { "count" => 0i64 });

    // WHEN a legitimate-looking 0 is stored
    let err = enforcer
        .enforce(&registry, "Counter", "ZeroCounter", Some(&instance))
        .unwrap_err();

    // THEN it is still read as the sentinel
    assert_eq!(violation(err), ContractViolation::field("count", "ZeroCounter"));
}

#[test]
fn loose_field_match_crosses_types() {
    let registry = registry();
    let enforcer = Enforcer::with_config(SentinelConfig::default().with(SentinelTarget::Field, 0i64));
    let instance = Instance::with_fields("ZeroCounter", fields! { "count" => false });

    let err = enforcer
        .enforce(&registry, "Counter", "ZeroCounter", Some(&instance))
        .unwrap_err();

    assert_eq!(violation(err).member, "count");
}

#[test]
fn configured_constant_sentinel_changes_outcome() {
    // GIVEN LIMIT = 10 on ZeroCounter
    let registry = registry();
    let instance = Instance::with_fields("ZeroCounter", fields! { "count" => 3i64 });

    // THEN the default sentinel does not match
    assert_eq!(
        Enforcer::new().enforce(&registry, "Counter", "ZeroCounter", Some(&instance)),
        Ok(())
    );

    // WHEN 10 becomes the constant sentinel
    let mut enforcer = Enforcer::new();
    assert!(enforcer.configure("default_constant_value", 10i64));

    // THEN LIMIT is reported
    let err = enforcer
        .enforce(&registry, "Counter", "ZeroCounter", Some(&instance))
        .unwrap_err();
    assert_eq!(violation(err), ContractViolation::constant("LIMIT", "ZeroCounter"));
}

#[test]
fn unrecognized_configure_name_changes_nothing() {
    let mut enforcer = Enforcer::new();
    let before = enforcer.config().clone();

    assert!(!enforcer.configure("default-method", 0i64));

    assert_eq!(enforcer.config(), &before);
}

#[test]
fn malformed_calls_are_not_violations() {
    let registry = registry();
    let enforcer = Enforcer::new();

    assert_eq!(
        enforcer.enforce(&registry, "Missing", "Complete", None),
        Err(EnforceError::UnknownType("Missing".into()))
    );
    assert_eq!(
        enforcer.enforce(&registry, "Counter", "Complete", None),
        Err(EnforceError::NotDerived {
            base: "Counter".into(),
            target: "Complete".into()
        })
    );
}

/// A host type that checks itself at the end of its constructor.
struct Widget {
    label: String,
    size: i64,
}

impl FieldSource for Widget {
    fn type_name(&self) -> &str {
        "Widget"
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "label" => Some(Value::from(self.label.as_str())),
            "size" => Some(Value::from(self.size)),
            _ => None,
        }
    }
}

impl Widget {
    fn new(registry: &Registry, label: &str, size: i64) -> Result<Self, EnforceError> {
        let widget = Self {
            label: label.to_string(),
            size,
        };
        Enforcer::new().construct(registry, "Component", widget)
    }
}

#[test]
fn host_struct_checks_itself_in_constructor() {
    let mut builder = RegistryBuilder::new();
    builder
        .add_type("Component")
        .field(FieldDef::new("label", "abstract"))
        .field(FieldDef::new("size", "abstract").protected())
        .done()
        .unwrap();
    builder.add_type("Widget").extends("Component").done().unwrap();
    let registry = builder.build().unwrap();

    let widget = Widget::new(&registry, "ok", 3).unwrap();
    assert_eq!(widget.label, "ok");

    let err = Widget::new(&registry, "abstract", 3).err().unwrap();
    assert_eq!(violation(err), ContractViolation::field("label", "Widget"));
}

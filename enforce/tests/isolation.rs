//! Each enforce call works on its own request: nested calls made while a
//! field is being read, and calls on other threads, never leak into it.

use mandate_core::{fields, FieldSource, Instance, Value};
use mandate_enforce::{ContractViolation, EnforceError, EnforceResult, Enforcer};
use mandate_registry::{FieldDef, Registry, RegistryBuilder};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::thread;

fn registry() -> Registry {
    let mut builder = RegistryBuilder::new();
    builder
        .add_type("Outer")
        .field(FieldDef::new("public_var", "abstract"))
        .done()
        .unwrap();
    builder.add_type("OuterChild").extends("Outer").done().unwrap();
    builder
        .add_type("Inner")
        .constant("KIND", "abstract")
        .done()
        .unwrap();
    builder.add_type("InnerChild").extends("Inner").done().unwrap();
    builder
        .add_type("Counter")
        .field(FieldDef::new("count", "abstract"))
        .done()
        .unwrap();
    builder.add_type("Tally").extends("Counter").done().unwrap();
    builder.build().unwrap()
}

/// Builds another object while one of its own fields is being read.
struct Nested<'r> {
    registry: &'r Registry,
    inner: RefCell<Option<EnforceResult<()>>>,
}

impl FieldSource for Nested<'_> {
    fn type_name(&self) -> &str {
        "OuterChild"
    }

    fn field(&self, name: &str) -> Option<Value> {
        let result = Enforcer::new().enforce(self.registry, "Inner", "InnerChild", None);
        *self.inner.borrow_mut() = Some(result);
        match name {
            "public_var" => Some(Value::from("abstract")),
            _ => None,
        }
    }
}

fn violation(result: EnforceResult<()>) -> ContractViolation {
    match result {
        Err(EnforceError::Violation(violation)) => violation,
        other => panic!("expected a contract violation, got {other:?}"),
    }
}

#[test]
fn nested_enforce_during_field_read_keeps_outer_target() {
    // GIVEN an object whose field read runs a second, failing enforce call
    let registry = registry();
    let nested = Nested {
        registry: &registry,
        inner: RefCell::new(None),
    };

    // WHEN the outer call reads that field
    let outer = Enforcer::new().enforce(&registry, "Outer", "OuterChild", Some(&nested));

    // THEN each call reports its own member and target
    assert_eq!(violation(outer), ContractViolation::field("public_var", "OuterChild"));
    let inner = nested.inner.borrow_mut().take().expect("field was read");
    assert_eq!(violation(inner), ContractViolation::constant("KIND", "InnerChild"));
}

#[test]
fn concurrent_enforce_calls_share_a_registry() {
    // GIVEN one registry shared by two workers checking different pairs
    let registry = registry();

    // WHEN both run many checks at once
    let (inner, counter) = thread::scope(|scope| {
        let inner = scope.spawn(|| {
            (0..200)
                .map(|_| violation(Enforcer::new().enforce(&registry, "Inner", "InnerChild", None)))
                .collect::<Vec<_>>()
        });
        let counter = scope.spawn(|| {
            (0..200i64)
                .map(|i| {
                    let instance = Instance::with_fields("Tally", fields! { "count" => i % 2 });
                    Enforcer::new().enforce(&registry, "Counter", "Tally", Some(&instance))
                })
                .collect::<Vec<_>>()
        });
        (inner.join().unwrap(), counter.join().unwrap())
    });

    // THEN no worker ever sees the other's target or member
    assert!(inner
        .iter()
        .all(|v| *v == ContractViolation::constant("KIND", "InnerChild")));
    assert!(counter.iter().all(|result| result.is_ok()));
}

//! Live objects whose fields can be read during enforcement.

use crate::{Fields, Value};

/// Anything the enforcer can read field values from.
///
/// Implemented by `Instance` and by any host struct that wants to be checked
/// directly. `field` ignores visibility: holding the object is proof enough.
pub trait FieldSource {
    /// Name of the concrete type this object was built as.
    fn type_name(&self) -> &str;

    /// Current value of a field, or `None` if the object never set it.
    fn field(&self, name: &str) -> Option<Value>;
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }
}

impl<T: FieldSource + ?Sized> FieldSource for Box<T> {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }
}

/// A dynamically typed object: a type name plus its field values.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Concrete type name.
    pub type_name: String,
    /// Field values.
    pub fields: Fields,
}

impl Instance {
    /// Create an instance with no fields set.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Fields::new(),
        }
    }

    /// Create an instance with the given field values.
    pub fn with_fields(type_name: impl Into<String>, fields: Fields) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }
}

impl FieldSource for Instance {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}

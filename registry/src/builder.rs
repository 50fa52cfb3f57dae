//! RegistryBuilder for constructing an immutable Registry.

use crate::{ConstDef, FieldDef, Registry, SingletonAccessor, SubtypeIndex, TypeDef};
use mandate_core::{FieldSource, TypeId, Value};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors that can occur during registry construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Unknown parent type: {0}")]
    UnknownParentType(String),

    #[error("Duplicate {kind} {member} on type {type_name}")]
    DuplicateMember {
        type_name: String,
        kind: &'static str,
        member: String,
    },
}

/// Result type for registry construction.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Next type ID to allocate.
    next_type_id: u32,
    /// Types being built.
    types: HashMap<TypeId, TypeDef>,
    /// Type name to ID mapping.
    type_names: HashMap<String, TypeId>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type definition.
    ///
    /// Parents named with `extends` must already have been added.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeBuilder<'_> {
        TypeBuilder {
            builder: self,
            name: name.into(),
            parent_names: Vec::new(),
            constants: Vec::new(),
            fields: Vec::new(),
            singleton: None,
        }
    }

    /// Build the immutable Registry.
    pub fn build(self) -> RegistryResult<Registry> {
        let subtype_index = SubtypeIndex::build(&self.types);
        Ok(Registry::new(self.types, self.type_names, subtype_index))
    }
}

/// Builder for a type definition.
pub struct TypeBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    name: String,
    parent_names: Vec<String>,
    constants: Vec<ConstDef>,
    fields: Vec<FieldDef>,
    singleton: Option<SingletonAccessor>,
}

impl<'a> TypeBuilder<'a> {
    /// Add a parent type by name.
    pub fn extends(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_names.push(parent_name.into());
        self
    }

    /// Declare a constant.
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constants.push(ConstDef::new(name, value));
        self
    }

    /// Declare a field.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Expose a shared-instance accessor for this type.
    pub fn singleton<F, S>(mut self, accessor: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: FieldSource + 'static,
    {
        self.singleton = Some(SingletonAccessor::new(accessor));
        self
    }

    /// Finish building this type.
    pub fn done(self) -> RegistryResult<TypeId> {
        // Check for duplicate name
        if self.builder.type_names.contains_key(&self.name) {
            return Err(RegistryError::DuplicateTypeName(self.name));
        }

        check_unique(&self.name, "constant", self.constants.iter().map(|c| &c.name))?;
        check_unique(&self.name, "field", self.fields.iter().map(|f| &f.name))?;

        // Resolve parent IDs
        let mut parent_ids = Vec::new();
        for parent_name in &self.parent_names {
            match self.builder.type_names.get(parent_name) {
                Some(&parent_id) => parent_ids.push(parent_id),
                None => return Err(RegistryError::UnknownParentType(parent_name.clone())),
            }
        }

        let id = TypeId::new(self.builder.next_type_id);
        self.builder.next_type_id += 1;

        let type_def = TypeDef {
            id,
            name: self.name.clone(),
            parent_ids,
            constants: self.constants,
            fields: self.fields,
            singleton: self.singleton,
        };

        self.builder.type_names.insert(self.name, id);
        self.builder.types.insert(id, type_def);

        Ok(id)
    }
}

fn check_unique<'n>(
    type_name: &str,
    kind: &'static str,
    names: impl Iterator<Item = &'n String>,
) -> RegistryResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(RegistryError::DuplicateMember {
                type_name: type_name.to_string(),
                kind,
                member: name.clone(),
            });
        }
    }
    Ok(())
}

//! Schema definition types.

use mandate_core::{FieldSource, TypeId, Value, Visibility};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Constant definition within a type.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDef {
    /// Constant name.
    pub name: String,
    /// Declared value.
    pub value: Value,
}

impl ConstDef {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Field definition within a type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Who may read the field without holding an instance.
    pub visibility: Visibility,
    /// Declared default value.
    pub default: Value,
}

impl FieldDef {
    /// A public field.
    pub fn new(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            default: default.into(),
        }
    }

    pub fn protected(mut self) -> Self {
        self.visibility = Visibility::Protected;
        self
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }
}

/// A registered "get the shared instance" operation for a type.
#[derive(Clone)]
pub struct SingletonAccessor(Arc<dyn Fn() -> Box<dyn FieldSource> + Send + Sync>);

impl SingletonAccessor {
    pub fn new<F, S>(accessor: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: FieldSource + 'static,
    {
        Self(Arc::new(move || Box::new(accessor()) as Box<dyn FieldSource>))
    }

    /// Obtain the shared instance.
    pub fn instance(&self) -> Box<dyn FieldSource> {
        (self.0)()
    }
}

impl fmt::Debug for SingletonAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SingletonAccessor(..)")
    }
}

/// Type definition.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Unique identifier.
    pub id: TypeId,
    /// Type name.
    pub name: String,
    /// Parent type IDs (for inheritance), in declaration order.
    pub parent_ids: Vec<TypeId>,
    /// Constants declared on this type, in declaration order.
    pub constants: Vec<ConstDef>,
    /// Fields declared on this type, in declaration order.
    pub fields: Vec<FieldDef>,
    /// Shared-instance accessor, if the type exposes one.
    pub singleton: Option<SingletonAccessor>,
}

impl TypeDef {
    pub fn new(id: TypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_ids: Vec::new(),
            constants: Vec::new(),
            fields: Vec::new(),
            singleton: None,
        }
    }

    /// Get a constant declared directly on this type.
    pub fn get_constant(&self, name: &str) -> Option<&ConstDef> {
        self.constants.iter().find(|c| c.name == name)
    }

    /// Get a field declared directly on this type.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Precomputed subtype relationships.
#[derive(Debug, Default)]
pub struct SubtypeIndex {
    /// For each type, the set of all its subtypes (transitive).
    subtypes: HashMap<TypeId, HashSet<TypeId>>,
    /// For each type, the set of all its supertypes (transitive).
    supertypes: HashMap<TypeId, HashSet<TypeId>>,
}

impl SubtypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the subtype index from type definitions.
    ///
    /// Parents always carry a lower ID than their children, so a single pass
    /// in ID order sees every parent's closure before it is needed.
    pub fn build(types: &HashMap<TypeId, TypeDef>) -> Self {
        let mut index = Self::new();
        let mut ids: Vec<TypeId> = types.keys().copied().collect();
        ids.sort();

        for type_id in ids {
            index.subtypes.entry(type_id).or_default();
            let mut supers = HashSet::new();
            for &parent_id in &types[&type_id].parent_ids {
                supers.insert(parent_id);
                if let Some(inherited) = index.supertypes.get(&parent_id) {
                    supers.extend(inherited.iter().copied());
                }
            }
            for &super_id in &supers {
                index.subtypes.entry(super_id).or_default().insert(type_id);
            }
            index.supertypes.insert(type_id, supers);
        }

        index
    }

    /// Check if `sub` is `super_type` or one of its descendants.
    pub fn is_subtype(&self, sub: TypeId, super_type: TypeId) -> bool {
        if sub == super_type {
            return true;
        }
        self.supertypes
            .get(&sub)
            .map(|set| set.contains(&super_type))
            .unwrap_or(false)
    }

    /// Get all subtypes of a type (not including the type itself).
    pub fn get_subtypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtypes
            .get(&type_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get all supertypes of a type (not including the type itself).
    pub fn get_supertypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.supertypes
            .get(&type_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}

//! The Registry - immutable schema lookup.

use crate::{ConstDef, FieldDef, SingletonAccessor, SubtypeIndex, TypeDef};
use mandate_core::TypeId;
use std::collections::{HashMap, HashSet};

/// The Registry provides runtime lookup of type definitions.
/// It is immutable after construction.
#[derive(Debug)]
pub struct Registry {
    /// Type definitions by ID.
    types: HashMap<TypeId, TypeDef>,
    /// Type ID lookup by name.
    type_names: HashMap<String, TypeId>,
    /// Precomputed subtype relationships.
    subtype_index: SubtypeIndex,
}

impl Registry {
    pub(crate) fn new(
        types: HashMap<TypeId, TypeDef>,
        type_names: HashMap<String, TypeId>,
        subtype_index: SubtypeIndex,
    ) -> Self {
        Self {
            types,
            type_names,
            subtype_index,
        }
    }

    // ==================== Type Lookups ====================

    /// Get a type definition by name.
    pub fn get_type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.type_names.get(name).and_then(|id| self.types.get(id))
    }

    /// Get a type definition by ID.
    pub fn get_type(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(&id)
    }

    /// Get a type ID by name.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Get the number of types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ==================== Member Resolution ====================

    /// Resolve a constant as seen from `type_id`.
    ///
    /// The type's own declaration shadows its parents; parents are searched
    /// depth-first in declaration order.
    pub fn resolve_constant(&self, type_id: TypeId, name: &str) -> Option<&ConstDef> {
        let type_def = self.types.get(&type_id)?;
        if let Some(constant) = type_def.get_constant(name) {
            return Some(constant);
        }
        type_def
            .parent_ids
            .iter()
            .find_map(|&parent_id| self.resolve_constant(parent_id, name))
    }

    /// Resolve a field definition as seen from `type_id`, same order as constants.
    pub fn resolve_field(&self, type_id: TypeId, name: &str) -> Option<&FieldDef> {
        let type_def = self.types.get(&type_id)?;
        if let Some(field) = type_def.get_field(name) {
            return Some(field);
        }
        type_def
            .parent_ids
            .iter()
            .find_map(|&parent_id| self.resolve_field(parent_id, name))
    }

    /// All constants visible on a type, inherited ones first.
    ///
    /// Each name appears once, carrying the definition that wins for `type_id`.
    pub fn get_all_constants(&self, type_id: TypeId) -> Vec<&ConstDef> {
        let mut names = Vec::new();
        self.collect_member_names(type_id, &mut names, &mut HashSet::new(), |t| {
            t.constants.iter().map(|c| c.name.as_str()).collect()
        });
        names
            .into_iter()
            .filter_map(|name| self.resolve_constant(type_id, name))
            .collect()
    }

    /// All fields visible on a type, inherited ones first.
    pub fn get_all_fields(&self, type_id: TypeId) -> Vec<&FieldDef> {
        let mut names = Vec::new();
        self.collect_member_names(type_id, &mut names, &mut HashSet::new(), |t| {
            t.fields.iter().map(|f| f.name.as_str()).collect()
        });
        names
            .into_iter()
            .filter_map(|name| self.resolve_field(type_id, name))
            .collect()
    }

    /// Helper to collect member names from a type and its parents.
    fn collect_member_names<'a>(
        &'a self,
        type_id: TypeId,
        result: &mut Vec<&'a str>,
        seen: &mut HashSet<&'a str>,
        members: fn(&'a TypeDef) -> Vec<&'a str>,
    ) {
        if let Some(type_def) = self.types.get(&type_id) {
            for &parent_id in &type_def.parent_ids {
                self.collect_member_names(parent_id, result, seen, members);
            }
            for name in members(type_def) {
                if seen.insert(name) {
                    result.push(name);
                }
            }
        }
    }

    /// Singleton accessor for a type, falling back to the nearest ancestor
    /// that exposes one.
    pub fn singleton_accessor(&self, type_id: TypeId) -> Option<&SingletonAccessor> {
        let type_def = self.types.get(&type_id)?;
        if let Some(accessor) = &type_def.singleton {
            return Some(accessor);
        }
        type_def
            .parent_ids
            .iter()
            .find_map(|&parent_id| self.singleton_accessor(parent_id))
    }

    // ==================== Subtype Queries ====================

    /// Check if `sub` is `super_type` or one of its descendants.
    pub fn is_subtype(&self, sub: TypeId, super_type: TypeId) -> bool {
        self.subtype_index.is_subtype(sub, super_type)
    }

    /// Get all subtypes of a type (not including the type itself).
    pub fn get_subtypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtype_index.get_subtypes(type_id)
    }

    /// Get all supertypes of a type (not including the type itself).
    pub fn get_supertypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtype_index.get_supertypes(type_id)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            types: HashMap::new(),
            type_names: HashMap::new(),
            subtype_index: SubtypeIndex::new(),
        }
    }
}

//! Type registry: the universe of known types.
//!
//! Slot-based arena with name canonicalization. A type name, once
//! registered, maps to exactly one id for the registry's lifetime; every
//! creation path funnels through the name-deduplication gate in
//! [`TypeRegistry::add_scalar_or_named`]. Accessors are total and answer
//! with a defined empty value for unknown ids instead of failing.
//!
//! Not designed for concurrent mutation; a registry belongs to exactly one
//! run at a time (see [`Session`](super::session::Session)).

use hashbrown::HashMap;
use log::debug;

use super::scope::{Scope, Symbol};
use super::types::{base_size, Type, TypeId, FIRST_ARRAY_SLOT, FIRST_STRUCT_SLOT, PRIMITIVE_SIZE};

pub struct TypeRegistry {
    // Slots 0..=2 are the primitives, [4, 8) arrays, [8, ..) structs and
    // opaque named placeholders. Unused slots stay None.
    slots: Vec<Option<Type>>,
    name_index: HashMap<String, TypeId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry seeded with the reserved primitive slots.
    pub fn new() -> Self {
        let mut registry = TypeRegistry {
            slots: Vec::new(),
            name_index: HashMap::new(),
        };
        registry.seed_primitives();
        registry
    }

    fn seed_primitives(&mut self) {
        self.slots.resize_with(FIRST_STRUCT_SLOT, || None);

        self.place(TypeId::INT, scalar("int", PRIMITIVE_SIZE));
        self.place(TypeId::FLOAT, scalar("float", PRIMITIVE_SIZE));
        self.place(TypeId::VOID, scalar("void", 0));
    }

    fn place(&mut self, id: TypeId, ty: Type) {
        self.name_index.insert(ty.name.clone(), id);
        self.slots[id.index()] = Some(ty);
    }

    /// First unoccupied slot at or after `start`, growing the slot vector
    /// when the reserved ranges are full.
    fn first_free_slot(&mut self, start: usize) -> usize {
        let mut index = start;
        loop {
            if index >= self.slots.len() {
                self.slots.resize_with(index + 1, || None);
                return index;
            }
            if self.slots[index].is_none() {
                return index;
            }
            index += 1;
        }
    }

    /// Single canonicalization gate: returns the existing id when `name` is
    /// already registered, otherwise records a new type and indexes it.
    ///
    /// The size is `item_count` times the base type's size when a base id is
    /// given (the array path), or times the primitive base size of `name`
    /// otherwise — 0 for unrecognized names used as opaque placeholders.
    /// Degenerate item counts are passed through, yielding zero- or
    /// negative-sized types; the multiplication wraps silently rather than
    /// rejecting oversized declarations.
    pub fn add_scalar_or_named(
        &mut self,
        name: &str,
        item_count: i32,
        base_type: Option<TypeId>,
    ) -> TypeId {
        if let Some(&id) = self.name_index.get(name) {
            return id;
        }

        let unit = match base_type {
            Some(base) => self.size_of(base),
            None => base_size(name),
        };
        let size = unit.wrapping_mul(item_count);
        let range_start = if base_type.is_some() {
            FIRST_ARRAY_SLOT
        } else {
            FIRST_STRUCT_SLOT
        };
        let slot = self.first_free_slot(range_start);
        let id = TypeId::new(slot);

        debug!(
            "registry: type '{}' -> id {} (items {}, size {})",
            name, id, item_count, size
        );
        self.place(id, Type {
            name: name.to_string(),
            item_count,
            size_bytes: size,
            base_type,
            member_scope: None,
        });
        id
    }

    /// Registers a struct-shaped type owning `member_scope`, with size 0
    /// until the struct-construction path fills it in. Idempotent by name.
    pub fn add_struct_named(&mut self, name: &str, member_scope: Scope) -> TypeId {
        if let Some(&id) = self.name_index.get(name) {
            return id;
        }

        let slot = self.first_free_slot(FIRST_STRUCT_SLOT);
        let id = TypeId::new(slot);
        debug!("registry: struct type '{}' -> id {}", name, id);
        self.place(id, Type {
            name: name.to_string(),
            item_count: 1,
            size_bytes: 0,
            base_type: None,
            member_scope: Some(member_scope),
        });
        id
    }

    /// Exact-match name lookup. The index map is the fast path; a linear
    /// scan over the slots backs it up and lazily caches any hit, so ids
    /// registered without an index update are still found.
    pub fn find_by_name(&mut self, name: &str) -> Option<TypeId> {
        if let Some(&id) = self.name_index.get(name) {
            return Some(id);
        }

        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(ty) = slot {
                if ty.name == name {
                    let id = TypeId::new(index);
                    self.name_index.insert(name.to_string(), id);
                    return Some(id);
                }
            }
        }
        None
    }

    /// Resolves or lazily creates the base type, composes the canonical
    /// bracketed name (`float[2][3]`), and registers the array through the
    /// canonicalization gate. Dimensions are not validated here; zero or
    /// negative values produce a degenerate type, and the element count
    /// wraps silently when the dimensions overflow it.
    pub fn create_array(&mut self, base_type_name: &str, dimensions: &[i32]) -> TypeId {
        let base_id = match self.find_by_name(base_type_name) {
            Some(id) => id,
            None => self.add_scalar_or_named(base_type_name, 1, None),
        };

        let mut name = String::from(base_type_name);
        let mut item_count: i32 = 1;
        for dim in dimensions {
            item_count = item_count.wrapping_mul(*dim);
            name.push('[');
            name.push_str(&dim.to_string());
            name.push(']');
        }

        self.add_scalar_or_named(&name, item_count, Some(base_id))
    }

    /// Builds a struct type from its ordered fields. Re-declaring an
    /// existing name returns the first definition's id and ignores the new
    /// field set. Field offsets accumulate in declaration order and the
    /// struct's size is the final cumulative offset.
    pub fn create_struct(&mut self, name: &str, fields: &[(String, TypeId)]) -> TypeId {
        if let Some(&id) = self.name_index.get(name) {
            debug!("registry: struct '{}' re-declared, keeping id {}", name, id);
            return id;
        }

        let mut members = Scope::new();
        for (field_name, field_type) in fields {
            let symbol = Symbol::member(members.current_offset(), *field_type);
            members.insert(field_name.clone(), symbol, self);
        }
        let size = members.current_offset();

        let id = self.add_struct_named(name, members);
        if let Some(Some(ty)) = self.slots.get_mut(id.index()) {
            ty.size_bytes = size;
        }
        id
    }

    pub fn lookup_type(&self, id: TypeId) -> Option<&Type> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Size in bytes, 0 for unknown ids.
    pub fn size_of(&self, id: TypeId) -> i32 {
        self.lookup_type(id).map_or(0, |ty| ty.size_bytes)
    }

    /// Element count, 0 for unknown ids.
    pub fn item_count_of(&self, id: TypeId) -> i32 {
        self.lookup_type(id).map_or(0, |ty| ty.item_count)
    }

    /// Canonical name, empty for unknown ids.
    pub fn name_of(&self, id: TypeId) -> &str {
        self.lookup_type(id).map_or("", |ty| ty.name.as_str())
    }

    /// Element type for arrays, absent otherwise.
    pub fn base_type_of(&self, id: TypeId) -> Option<TypeId> {
        self.lookup_type(id).and_then(|ty| ty.base_type)
    }

    /// Member scope for struct types, absent otherwise.
    pub fn member_scope_of(&self, id: TypeId) -> Option<&Scope> {
        self.lookup_type(id).and_then(|ty| ty.member_scope.as_ref())
    }

    /// Registered types in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|ty| (TypeId::new(index), ty)))
    }

    /// Clears every registered type and re-seeds the reserved primitive
    /// slots, guaranteeing no type-id leakage between runs.
    pub fn reset(&mut self) {
        debug!("registry: reset");
        self.slots.clear();
        self.name_index.clear();
        self.seed_primitives();
    }
}

fn scalar(name: &str, size: i32) -> Type {
    Type {
        name: name.to_string(),
        item_count: 1,
        size_bytes: size,
        base_type: None,
        member_scope: None,
    }
}

//! Core type records and reserved-id layout.
//!
//! Ids are stable for the lifetime of a registry: `int`, `float` and `void`
//! occupy slots 0..=2, array types are placed from slot 4 and struct types
//! from slot 8. Everything else about a type lives in [`Type`].

use std::fmt;

use super::scope::Scope;

/// Stable integer identity of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub const INT: TypeId = TypeId(0);
    pub const FLOAT: TypeId = TypeId(1);
    pub const VOID: TypeId = TypeId(2);

    pub fn new(index: usize) -> Self {
        TypeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First slot reserved for array types.
pub const FIRST_ARRAY_SLOT: usize = 4;
/// First slot reserved for struct types (and opaque named placeholders).
pub const FIRST_STRUCT_SLOT: usize = 8;

/// Size in bytes of the recognized primitives.
pub const PRIMITIVE_SIZE: i32 = 4;
/// Size a function symbol occupies in its declaring scope.
pub const POINTER_SIZE: i32 = 4;

/// Base size of a type name: 4 for recognized primitives, 0 for names used
/// as opaque placeholders. `void` has no meaningful size.
pub fn base_size(name: &str) -> i32 {
    match name {
        "int" | "float" => PRIMITIVE_SIZE,
        _ => 0,
    }
}

/// A named, sized classification registered in the type table.
#[derive(Debug)]
pub struct Type {
    /// Canonical textual form; arrays carry bracketed dimensions
    /// (e.g. `int[3][4]`), structs their declared name.
    pub name: String,
    /// 1 for scalars and structs, total element count for arrays.
    pub item_count: i32,
    /// `item_count * base_size` for scalars/arrays, sum of member sizes
    /// for structs.
    pub size_bytes: i32,
    /// Element type for arrays, absent otherwise.
    pub base_type: Option<TypeId>,
    /// Member symbols, present only for struct types.
    pub member_scope: Option<Scope>,
}

impl Type {
    pub fn is_struct(&self) -> bool {
        self.member_scope.is_some()
    }

    pub fn is_array(&self) -> bool {
        self.base_type.is_some()
    }
}

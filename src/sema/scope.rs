//! Symbols and lexical binding environments.
//!
//! A [`Scope`] is one binding environment: an insertion-ordered name to
//! [`Symbol`] mapping plus a monotonically growing storage-offset counter.
//! No operation here ever fails; duplicate insertions overwrite the previous
//! binding and callers add stricter validation above this layer if they
//! need it.

use std::fmt;

use indexmap::IndexMap;
use log::debug;

use super::type_registry::TypeRegistry;
use super::types::{TypeId, POINTER_SIZE};

/// Closed set of symbol categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolCategory {
    Variable,
    Function,
    Struct,
    Member,
}

impl fmt::Display for SymbolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SymbolCategory::Variable => "variable",
            SymbolCategory::Function => "function",
            SymbolCategory::Struct => "struct",
            SymbolCategory::Member => "member",
        };
        f.write_str(text)
    }
}

/// A declared identifier's semantic record.
///
/// `param_type_ids` is non-empty only for `Function` symbols.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Storage offset within the owning scope at insertion time.
    pub offset: i32,
    /// Reference into the type registry, never ownership.
    pub type_id: TypeId,
    pub category: SymbolCategory,
    /// Parameter types, in declaration order, for function symbols.
    pub param_type_ids: Vec<TypeId>,
}

impl Symbol {
    pub fn variable(offset: i32, type_id: TypeId) -> Self {
        Symbol {
            offset,
            type_id,
            category: SymbolCategory::Variable,
            param_type_ids: Vec::new(),
        }
    }

    pub fn member(offset: i32, type_id: TypeId) -> Self {
        Symbol {
            offset,
            type_id,
            category: SymbolCategory::Member,
            param_type_ids: Vec::new(),
        }
    }

    pub fn function(offset: i32, return_type: TypeId, param_type_ids: Vec<TypeId>) -> Self {
        Symbol {
            offset,
            type_id: return_type,
            category: SymbolCategory::Function,
            param_type_ids,
        }
    }

    pub fn is_function(&self) -> bool {
        self.category == SymbolCategory::Function
    }
}

/// One lexical binding environment.
///
/// The optional parent is used only by the nested member scope a struct type
/// owns; the global and local scopes of the two-level model are parentless.
/// Two-level name resolution is a separate policy on
/// [`ScopeStack`](super::scope_stack::ScopeStack) and never walks this chain.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: IndexMap<String, Symbol>,
    current_offset: i32,
    parent: Option<Box<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: Scope) -> Self {
        Scope {
            parent: Some(Box::new(parent)),
            ..Scope::default()
        }
    }

    /// Overload key for a function binding: the base name mangled with each
    /// parameter type id, so differing signatures coexist under one name.
    pub fn overload_key(name: &str, param_type_ids: &[TypeId]) -> String {
        let mut key = String::from(name);
        for id in param_type_ids {
            key.push('_');
            key.push_str(&id.to_string());
        }
        key
    }

    /// Stores `symbol` under `name`, last write wins, then advances the
    /// offset counter by the symbol's size: one pointer-sized unit for
    /// functions, the referenced type's size otherwise.
    pub fn insert(&mut self, name: impl Into<String>, symbol: Symbol, types: &TypeRegistry) {
        let name = name.into();
        let size = if symbol.is_function() {
            POINTER_SIZE
        } else {
            types.size_of(symbol.type_id)
        };
        debug!(
            "scope: insert '{}' ({}) at offset {}, size {}",
            name, symbol.category, symbol.offset, size
        );
        self.bindings.insert(name, symbol);
        self.current_offset += size;
    }

    /// Exact-name lookup, delegating to the parent chain when present.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        match self.bindings.get(name) {
            Some(sym) => Some(sym),
            None => self.parent.as_deref().and_then(|p| p.lookup(name)),
        }
    }

    /// Lookup restricted to this scope's own bindings.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.bindings.get(name)
    }

    /// Registers a function symbol at the current offset under its overload
    /// key. Overloads with different parameter lists produce distinct
    /// bindings; an identical signature overwrites the previous one.
    pub fn insert_function(
        &mut self,
        name: &str,
        return_type: TypeId,
        param_type_ids: Vec<TypeId>,
        types: &TypeRegistry,
    ) {
        let key = Scope::overload_key(name, &param_type_ids);
        let symbol = Symbol::function(self.current_offset, return_type, param_type_ids);
        self.insert(key, symbol, types);
    }

    /// Records a struct declaration as a single slot at the current offset.
    /// Struct declarations consume no storage in the declaring scope, so the
    /// offset counter stays put.
    pub fn insert_struct(&mut self, name: impl Into<String>, type_id: TypeId) {
        let name = name.into();
        debug!("scope: insert struct '{}' (type {})", name, type_id);
        self.bindings
            .insert(name, Symbol {
                offset: self.current_offset,
                type_id,
                category: SymbolCategory::Struct,
                param_type_ids: Vec::new(),
            });
    }

    /// Next free storage offset. Strictly non-decreasing; offsets are never
    /// reclaimed.
    pub fn current_offset(&self) -> i32 {
        self.current_offset
    }

    /// Bindings in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.bindings.iter().map(|(name, sym)| (name.as_str(), sym))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

//! One compilation run.
//!
//! A [`Session`] owns the type registry and the scope stack for exactly one
//! processed source unit. Run isolation is a matter of ownership: building a
//! fresh session for the next file guarantees no type ids or bindings leak
//! between runs, without anyone having to remember a reset call.

use log::debug;

use super::scope::{Scope, Symbol};
use super::scope_stack::ScopeStack;
use super::type_registry::TypeRegistry;
use super::types::TypeId;

/// Registry + scope stack for a single run, plus the declaration-event
/// surface the front end drives.
///
/// Single-writer, single-threaded: the session is a plain owned value and
/// must be confined to one run context at a time.
pub struct Session {
    types: TypeRegistry,
    scopes: ScopeStack,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh registry and a scope stack seeded with the global frame.
    pub fn new() -> Self {
        let mut scopes = ScopeStack::new();
        scopes.push(Scope::new());
        Session {
            types: TypeRegistry::new(),
            scopes,
        }
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    fn global_mut(&mut self) -> &mut Scope {
        self.scopes
            .base_mut()
            .expect("session always holds the global frame")
    }

    /// Resolves a type name, lazily registering unknown names as opaque
    /// placeholder types.
    pub fn type_id_for(&mut self, type_name: &str) -> TypeId {
        match self.types.find_by_name(type_name) {
            Some(id) => id,
            None => self.types.add_scalar_or_named(type_name, 1, None),
        }
    }

    pub fn declare_global_variable(&mut self, name: &str, type_name: &str) {
        let type_id = self.type_id_for(type_name);
        let offset = self.global_mut().current_offset();
        let symbol = Symbol::variable(offset, type_id);
        let Session { types, scopes } = self;
        if let Some(global) = scopes.base_mut() {
            global.insert(name, symbol, types);
        }
    }

    pub fn declare_global_array(&mut self, name: &str, base_type_name: &str, dimensions: &[i32]) {
        let type_id = self.types.create_array(base_type_name, dimensions);
        let offset = self.global_mut().current_offset();
        let symbol = Symbol::variable(offset, type_id);
        let Session { types, scopes } = self;
        if let Some(global) = scopes.base_mut() {
            global.insert(name, symbol, types);
        }
    }

    /// Registers a struct type from `(field name, field type name)` pairs
    /// and binds the struct's name in the global scope. Field type names are
    /// resolved (or lazily created) before the struct itself is built.
    pub fn declare_struct(&mut self, name: &str, fields: &[(String, String)]) {
        let resolved: Vec<(String, TypeId)> = fields
            .iter()
            .map(|(field_name, type_name)| (field_name.clone(), self.type_id_for(type_name)))
            .collect();

        let type_id = self.types.create_struct(name, &resolved);
        debug!("session: struct '{}' registered as type {}", name, type_id);
        self.global_mut().insert_struct(name, type_id);
    }

    /// Registers a function signature in the global scope. Parameter and
    /// return types go through the registry first, so a signature can
    /// mention types nothing else declared yet.
    pub fn declare_function(&mut self, name: &str, return_type: &str, param_types: &[String]) {
        let return_id = self.type_id_for(return_type);
        let param_ids: Vec<TypeId> = param_types.iter().map(|p| self.type_id_for(p)).collect();

        debug!("session: function '{}' ({} params)", name, param_ids.len());
        let Session { types, scopes } = self;
        if let Some(global) = scopes.base_mut() {
            global.insert_function(name, return_id, param_ids, types);
        }
    }

    /// A fresh, parentless local scope. The caller fills it with locals and
    /// hands it back via [`Session::push_local_scope`].
    pub fn new_local_scope(&self) -> Scope {
        Scope::new()
    }

    pub fn declare_local_variable(&mut self, scope: &mut Scope, name: &str, type_name: &str) {
        let type_id = self.type_id_for(type_name);
        let symbol = Symbol::variable(scope.current_offset(), type_id);
        scope.insert(name, symbol, &self.types);
    }

    pub fn declare_local_array(
        &mut self,
        scope: &mut Scope,
        name: &str,
        base_type_name: &str,
        dimensions: &[i32],
    ) {
        let type_id = self.types.create_array(base_type_name, dimensions);
        let symbol = Symbol::variable(scope.current_offset(), type_id);
        scope.insert(name, symbol, &self.types);
    }

    pub fn push_local_scope(&mut self, scope: Scope) {
        debug!("session: local scope pushed ({} symbols)", scope.len());
        self.scopes.push(scope);
    }

    /// Pops the active local scope. The global frame stays put: popping with
    /// nothing above it is a no-op.
    pub fn pop_local_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() <= 1 {
            debug!("session: attempted to pop the global scope, no change");
            return None;
        }
        self.scopes.pop()
    }
}

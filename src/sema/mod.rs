//! Semantic bookkeeping core: type registry, scopes and the run session.

pub mod scope;
pub mod scope_stack;
pub mod session;
pub mod type_registry;
pub mod types;

pub use scope::{Scope, Symbol, SymbolCategory};
pub use scope_stack::{ScopeLevel, ScopeStack};
pub use session::Session;
pub use type_registry::TypeRegistry;
pub use types::{Type, TypeId};

#[cfg(test)]
mod tests_scope;
#[cfg(test)]
mod tests_session;

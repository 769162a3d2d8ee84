//! Frame stack and the two-level name-resolution policy.
//!
//! The stack holds the global scope at the bottom and whatever local scopes
//! have been pushed above it. Resolution is deliberately not a parent-chain
//! walk: only the top frame's own bindings and the bottom frame's own
//! bindings are ever consulted, no matter how many frames are on the stack.

use super::scope::Scope;

/// Which of the two consulted frames held a resolved name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeLevel {
    Global,
    Local,
}

#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::default()
    }

    pub fn push(&mut self, scope: Scope) {
        self.frames.push(scope);
    }

    /// Pops the top frame; an empty stack yields `None` rather than failing.
    pub fn pop(&mut self) -> Option<Scope> {
        self.frames.pop()
    }

    /// The active (top) frame.
    pub fn peek(&self) -> Option<&Scope> {
        self.frames.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut Scope> {
        self.frames.last_mut()
    }

    /// The global (bottom) frame.
    pub fn base(&self) -> Option<&Scope> {
        self.frames.first()
    }

    pub fn base_mut(&mut self) -> Option<&mut Scope> {
        self.frames.first_mut()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Two-level resolution: a name bound in the active scope shadows any
    /// same-named global binding; a name absent locally falls back to the
    /// global frame; nothing in between is consulted.
    pub fn resolve(&self, name: &str) -> Option<(ScopeLevel, &Scope)> {
        let top_index = self.frames.len().checked_sub(1)?;

        if self.frames[top_index].lookup_local(name).is_some() {
            let level = if top_index == 0 {
                ScopeLevel::Global
            } else {
                ScopeLevel::Local
            };
            return Some((level, &self.frames[top_index]));
        }

        if self.frames[0].lookup_local(name).is_some() {
            return Some((ScopeLevel::Global, &self.frames[0]));
        }

        None
    }
}

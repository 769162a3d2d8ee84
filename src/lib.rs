//! Symbol and type table explorer for a toy C-like language.
//!
//! The core is the semantic bookkeeping in [`sema`]: a type registry with
//! canonical integer ids, symbol scopes with storage-offset bookkeeping, and
//! a two-level (local-shadows-global) resolution policy. The [`frontend`]
//! scanner turns declaration lines into events on a [`sema::Session`], and
//! [`display`] renders the resulting tables.

/// Command-line interface definition.
pub mod cli;
/// Table rendering for the registry and scopes.
pub mod display;
/// Contains the error types for the application.
pub mod error;
/// Line-oriented declaration scanner.
pub mod frontend;
/// The semantic bookkeeping core.
pub mod sema;

//! opalc-util - Foundation Types for the Opal Compiler
//!
//! This crate holds the data structures the front end is built on:
//!
//! - [`HashTable`] - an open-addressing map from 64-bit key to 64-bit value
//!   with a bounded probe distance, used as the generic associative
//!   primitive. Values are often pointer-sized handles into other storage.
//! - [`AtomTable`] / [`Atom`] - content-addressed string interning. Every
//!   identifier and string literal the lexer sees is deduplicated into an
//!   arena-resident record; handle equality is content equality, so
//!   downstream phases compare names in O(1).
//! - [`Loc`] / [`Span`] - source positions attached to tokens and
//!   diagnostics.
//! - [`Handler`] / [`Diagnostic`] - the sink for recoverable front-end
//!   problems (malformed literals, unterminated strings, ...).
//!
//! All owning structures take an [`opalc_mem::Allocator`] explicitly; the
//! atom table carries its own fixed virtual-memory arena so that interned
//! records never move.

pub mod atom;
pub mod diagnostic;
pub mod hash;
pub mod span;

pub use atom::{Atom, AtomError, AtomTable};
pub use diagnostic::{Diagnostic, Handler, Level};
pub use hash::{HashError, HashTable};
pub use span::{Loc, Span};

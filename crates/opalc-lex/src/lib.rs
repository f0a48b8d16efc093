//! opalc-lex - Lexical Analyzer for the Opal Programming Language
//!
//! This crate turns raw source bytes into a stream of classified tokens.
//! Identifier and string text is deduplicated through an
//! [`opalc_util::AtomTable`], so every downstream phase compares names with
//! a single integer comparison.
//!
//! # Example Usage
//!
//! ```
//! use opalc_lex::{tokenize, TokenKind};
//! use opalc_util::{AtomTable, Handler};
//!
//! let mut atoms = AtomTable::new();
//! let mut tokens = Vec::new();
//! let handler = Handler::new();
//!
//! tokenize(b"x += 10;", &mut tokens, &mut atoms, &handler).unwrap();
//!
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(tokens[1].kind, TokenKind::PlusEq);
//! ```
//!
//! # Module Structure
//!
//! - [`token`] - token and keyword definitions
//! - [`lexer`] - the scanner itself
//! - [`cursor`] - byte cursor with line/column tracking
//!
//! # Behavior Notes
//!
//! - Lexing is a single pass with no backtracking. There is no end-of-file
//!   token; the token array simply ends.
//! - Recoverable problems (malformed literals, unterminated strings and
//!   block comments) are reported to the [`Handler`] and scanning
//!   continues. Only an unreadable input file or an exhausted atom arena
//!   aborts, through [`LexError`].
//! - Positions are 0-based line/column pairs; each token records its start
//!   (before scanning) and end (after scanning).

#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use opalc_util::{AtomError, AtomTable, Handler};
use thiserror::Error;

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Keyword, Token, TokenKind};

/// Error type for a lexing run.
///
/// Everything recoverable goes through the [`Handler`] instead; these are
/// the conditions that abort the run for one file.
#[derive(Debug, Error)]
pub enum LexError {
    /// The input file could not be read. Fatal for this file only.
    #[error("unable to read file '{}'", path.display())]
    Unreadable {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The atom table could not intern identifier or string text.
    #[error(transparent)]
    Intern(#[from] AtomError),
}

/// Lexes `source` into `tokens`.
///
/// The token array is caller-owned: it is cleared, refilled in source
/// order, and left for the caller between invocations. Identifier and
/// string text lands in `atoms`; recoverable problems land in `handler`.
pub fn tokenize(
    source: &[u8],
    tokens: &mut Vec<Token>,
    atoms: &mut AtomTable,
    handler: &Handler,
) -> Result<(), LexError> {
    let mut lexer = Lexer::new(source, tokens, atoms, handler);
    lexer.run()
}

/// Reads the file at `path` and lexes its contents into `tokens`.
///
/// An unreadable file aborts lexing for that file with zero tokens
/// produced; it is not fatal to the caller.
pub fn tokenize_file(
    path: impl AsRef<Path>,
    tokens: &mut Vec<Token>,
    atoms: &mut AtomTable,
    handler: &Handler,
) -> Result<(), LexError> {
    let path = path.as_ref();
    tokens.clear();

    let source = std::fs::read(path).map_err(|source| LexError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    tokenize(&source, tokens, atoms, handler)
}

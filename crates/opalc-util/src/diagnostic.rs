//! Diagnostic reporting infrastructure.
//!
//! The front end never aborts on a malformed token; it records a
//! [`Diagnostic`] against a [`Handler`] and keeps scanning. The handler is
//! an interior-mutable sink so components that only read source state can
//! still report.
//!
//! # Examples
//!
//! ```
//! use opalc_util::{Handler, Span};
//!
//! let handler = Handler::new();
//! handler.error("unterminated string literal", Span::DUMMY);
//!
//! assert!(handler.has_errors());
//! assert_eq!(handler.diagnostics().len(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;

use crate::span::Span;

/// Diagnostic severity level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// A problem that invalidates the compilation unit.
    Error,
    /// A problem the front end recovered from.
    Warning,
    /// Additional context for another diagnostic.
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with severity and location
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Severity level.
    pub level: Level,
    /// Main message text.
    pub message: String,
    /// Source region the message refers to.
    pub span: Span,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.level, self.message, self.span)
    }
}

/// Collects diagnostics emitted during a front-end pass.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Creates an empty handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn emit(&self, level: Level, message: impl Into<String>, span: Span) {
        self.diagnostics.borrow_mut().push(Diagnostic {
            level,
            message: message.into(),
            span,
        });
    }

    /// Records an error diagnostic.
    pub fn error(&self, message: impl Into<String>, span: Span) {
        self.emit(Level::Error, message, span);
    }

    /// Records a warning diagnostic.
    pub fn warning(&self, message: impl Into<String>, span: Span) {
        self.emit(Level::Warning, message, span);
    }

    /// Returns true if any error-level diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Number of error-level diagnostics recorded.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// A snapshot of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Drains all recorded diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }
}

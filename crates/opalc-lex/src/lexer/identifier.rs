//! Identifier and keyword scanning.

use crate::token::{Keyword, TokenKind};
use crate::{LexError, Lexer};

impl<'a> Lexer<'a> {
    /// Scans a maximal run of letters, digits and underscores.
    ///
    /// The text is classified against the keyword set by exact match;
    /// anything else is interned and becomes an identifier token.
    pub(crate) fn read_identifier(&mut self) -> Result<(), LexError> {
        self.scratch.clear();
        while let Some(b) = self.cursor.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.scratch.push(b);
                self.cursor.advance();
            } else {
                break;
            }
        }

        let kind = match Keyword::from_ident(&self.scratch) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(self.atoms.intern(&self.scratch)?),
        };
        self.push_token(kind);
        Ok(())
    }
}

//! Core lexer implementation.

use opalc_util::{AtomTable, Handler, Loc, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use crate::LexError;

/// Single-pass scanner turning a source buffer into a token stream.
///
/// The lexer dispatches on the byte under the cursor, scans one maximal
/// token, appends it to the caller-owned token array, and re-enters the
/// dispatch. There is no backtracking and no end-of-file token; scanning
/// halts when the cursor reaches the end of the buffer.
///
/// Identifier and string text is deduplicated through the shared
/// [`AtomTable`], so downstream phases compare names by handle.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,

    /// Caller-owned token storage, cleared and refilled by [`Lexer::run`].
    pub(crate) tokens: &'a mut Vec<Token>,

    /// Interning table for identifier and string text.
    pub(crate) atoms: &'a mut AtomTable,

    /// Sink for recoverable lexical problems.
    pub(crate) handler: &'a Handler,

    /// Reusable accumulator for the text of the token being scanned.
    pub(crate) scratch: Vec<u8>,

    /// Position of the first byte of the current token.
    pub(crate) token_start: Loc,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`.
    pub fn new(
        source: &'a [u8],
        tokens: &'a mut Vec<Token>,
        atoms: &'a mut AtomTable,
        handler: &'a Handler,
    ) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens,
            atoms,
            handler,
            scratch: Vec::new(),
            token_start: Loc::START,
        }
    }

    /// Scans the whole buffer into the token array.
    ///
    /// The array is cleared first; afterwards it holds every token of the
    /// buffer in source order. Recoverable problems (malformed literals,
    /// unterminated strings or comments) become handler diagnostics and
    /// scanning continues; only interning failure aborts.
    pub fn run(&mut self) -> Result<(), LexError> {
        self.tokens.clear();
        self.tokens.reserve(256);

        while let Some(b) = self.cursor.peek() {
            self.token_start = self.cursor.loc();

            match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.read_identifier()?,
                b'0'..=b'9' => self.read_number(),
                b'/' if matches!(self.cursor.peek_at(1), Some(b'/' | b'*')) => {
                    self.read_comment();
                }
                b'\'' | b'"' => self.read_string()?,
                _ if b.is_ascii_graphic() => self.read_symbol(),
                // Whitespace, control bytes and non-ASCII bytes outside
                // string literals produce no token.
                _ => self.cursor.advance(),
            }
        }

        Ok(())
    }

    /// Appends a token spanning from `token_start` to the cursor.
    pub(crate) fn push_token(&mut self, kind: TokenKind) {
        let span = Span::new(self.token_start, self.cursor.loc());
        self.tokens.push(Token::new(kind, span));
    }

    /// The region scanned so far for the current token.
    pub(crate) fn current_span(&self) -> Span {
        Span::new(self.token_start, self.cursor.loc())
    }
}

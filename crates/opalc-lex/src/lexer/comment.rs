//! Comment discarding.

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Discards a comment. The cursor is on a `/` known to be followed by
    /// `/` or `*`.
    ///
    /// Line comments run through the end of the line; block comments run
    /// through the matching `*/` with no nesting. A block comment that
    /// reaches the end of the buffer produces a diagnostic.
    pub(crate) fn read_comment(&mut self) {
        self.cursor.advance();
        let multi_line = self.cursor.peek() == Some(b'*');
        self.cursor.advance();

        if multi_line {
            loop {
                match self.cursor.peek() {
                    None => {
                        self.handler
                            .error("unterminated block comment", self.current_span());
                        break;
                    }
                    Some(b'*') if self.cursor.peek_at(1) == Some(b'/') => {
                        self.cursor.advance();
                        self.cursor.advance();
                        break;
                    }
                    Some(_) => self.cursor.advance(),
                }
            }
        } else {
            while let Some(b) = self.cursor.bump() {
                if b == b'\n' {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::{Token, TokenKind};
    use crate::Lexer;
    use opalc_util::{AtomTable, Handler};

    fn lex(source: &str) -> (Vec<Token>, Handler) {
        let mut atoms = AtomTable::new();
        let mut tokens = Vec::new();
        let handler = Handler::new();
        let mut lexer = Lexer::new(source.as_bytes(), &mut tokens, &mut atoms, &handler);
        lexer.run().unwrap();
        (tokens, handler)
    }

    #[test]
    fn test_line_comment_produces_no_token() {
        let (tokens, handler) = lex("// just a note\n");
        assert!(tokens.is_empty());
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_block_comment_produces_no_token() {
        let (tokens, _) = lex("/* spanning\n two lines */");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        let (tokens, _) = lex("/* a /* b */ c");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        // The first `*/` closes the comment; `c` is real code again.
        assert_eq!(kinds.len(), 1);
        assert!(matches!(kinds[0], TokenKind::Ident(_)));
    }

    #[test]
    fn test_unterminated_block_comment_reports() {
        let (tokens, handler) = lex("/* never closed");
        assert!(tokens.is_empty());
        assert!(handler.has_errors());
    }

    #[test]
    fn test_line_comment_ends_at_newline() {
        let (tokens, _) = lex("// note\nx");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].span.start.line, 1);
    }
}

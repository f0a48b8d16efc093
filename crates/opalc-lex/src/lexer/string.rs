//! String literal scanning.

use crate::token::TokenKind;
use crate::{LexError, Lexer};

impl<'a> Lexer<'a> {
    /// Scans a string literal delimited by `'` or `"`.
    ///
    /// Scanning runs to the matching quote. A quote preceded by an odd
    /// number of backslashes is an escaped literal quote: the escaping
    /// backslash is dropped and the quote kept. All other bytes, including
    /// other backslash sequences, are accumulated verbatim. The accumulated
    /// text is interned.
    ///
    /// A buffer that ends before the closing quote produces a diagnostic;
    /// the partial text still becomes a token.
    pub(crate) fn read_string(&mut self) -> Result<(), LexError> {
        let Some(quote) = self.cursor.bump() else {
            return Ok(());
        };

        self.scratch.clear();
        let mut backslashes = 0usize;
        let mut terminated = false;

        while let Some(b) = self.cursor.bump() {
            if b == quote {
                if backslashes % 2 == 1 {
                    // Escaped quote: replace the escaping backslash.
                    self.scratch.pop();
                    self.scratch.push(b);
                    backslashes = 0;
                    continue;
                }
                terminated = true;
                break;
            }

            if b == b'\\' {
                backslashes += 1;
            } else {
                backslashes = 0;
            }
            self.scratch.push(b);
        }

        if !terminated {
            self.handler
                .error("unterminated string literal", self.current_span());
        }

        let atom = self.atoms.intern(&self.scratch)?;
        self.push_token(TokenKind::Str(atom));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use opalc_util::{AtomTable, Handler};

    fn lex_strings(source: &str) -> (Vec<Token>, AtomTable, Handler) {
        let mut atoms = AtomTable::new();
        let mut tokens = Vec::new();
        let handler = Handler::new();
        let mut lexer = Lexer::new(source.as_bytes(), &mut tokens, &mut atoms, &handler);
        lexer.run().unwrap();
        (tokens, atoms, handler)
    }

    fn text_of(token: Token, atoms: &AtomTable) -> Vec<u8> {
        match token.kind {
            TokenKind::Str(atom) => atoms.bytes(atom).to_vec(),
            other => panic!("expected string token, got {other:?}"),
        }
    }

    #[test]
    fn test_double_quoted() {
        let (tokens, atoms, handler) = lex_strings(r#""hello""#);
        assert_eq!(text_of(tokens[0], &atoms), b"hello");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_single_quoted() {
        let (tokens, atoms, _) = lex_strings("'world'");
        assert_eq!(text_of(tokens[0], &atoms), b"world");
    }

    #[test]
    fn test_escaped_quote_is_literal() {
        let (tokens, atoms, handler) = lex_strings(r#""a\"b""#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(text_of(tokens[0], &atoms), b"a\"b");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_even_backslashes_terminate() {
        // `"a\\"` - the quote follows two backslashes, so it closes.
        let (tokens, atoms, handler) = lex_strings(r#""a\\""#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(text_of(tokens[0], &atoms), b"a\\\\");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_other_escapes_kept_verbatim() {
        let (tokens, atoms, _) = lex_strings(r#""line\nnext""#);
        assert_eq!(text_of(tokens[0], &atoms), b"line\\nnext");
    }

    #[test]
    fn test_other_quote_kind_is_plain_text() {
        let (tokens, atoms, _) = lex_strings(r#""it's fine""#);
        assert_eq!(text_of(tokens[0], &atoms), b"it's fine");
    }

    #[test]
    fn test_empty_string() {
        let (tokens, atoms, _) = lex_strings(r#""""#);
        assert_eq!(text_of(tokens[0], &atoms), b"");
    }

    #[test]
    fn test_unterminated_reports() {
        let (tokens, atoms, handler) = lex_strings(r#""abc"#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(text_of(tokens[0], &atoms), b"abc");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_same_content_same_atom() {
        let (tokens, _, _) = lex_strings(r#""ab" 'ab'"#);
        let (a, b) = (tokens[0].kind, tokens[1].kind);
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_ascii_bytes_preserved() {
        let (tokens, atoms, _) = lex_strings("\"héllo\"");
        assert_eq!(text_of(tokens[0], &atoms), "héllo".as_bytes());
    }
}

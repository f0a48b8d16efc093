//! Number literal scanning.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Scans an integer or floating-point literal.
    ///
    /// `0x` starts a hexadecimal run and `0b` a binary run, both unsigned
    /// integers. Anything else is a decimal run that may contain a single
    /// `.`; with the dot it parses as a float, without as an integer.
    ///
    /// Malformed literals (no digits after a prefix, out-of-range values)
    /// produce a diagnostic and a zero-valued token; scanning continues.
    pub(crate) fn read_number(&mut self) {
        self.scratch.clear();

        let kind = if self.cursor.peek() == Some(b'0') && self.cursor.peek_at(1) == Some(b'x') {
            self.cursor.advance();
            self.cursor.advance();
            while let Some(b) = self.cursor.peek() {
                if b.is_ascii_hexdigit() {
                    self.scratch.push(b);
                    self.cursor.advance();
                } else {
                    break;
                }
            }
            TokenKind::Number(self.parse_int(16))
        } else if self.cursor.peek() == Some(b'0') && self.cursor.peek_at(1) == Some(b'b') {
            self.cursor.advance();
            self.cursor.advance();
            while let Some(b @ (b'0' | b'1')) = self.cursor.peek() {
                self.scratch.push(b);
                self.cursor.advance();
            }
            TokenKind::Number(self.parse_int(2))
        } else {
            let mut seen_dot = false;
            while let Some(b) = self.cursor.peek() {
                if b.is_ascii_digit() {
                    self.scratch.push(b);
                    self.cursor.advance();
                } else if b == b'.' && !seen_dot {
                    seen_dot = true;
                    self.scratch.push(b);
                    self.cursor.advance();
                } else {
                    break;
                }
            }

            if seen_dot {
                TokenKind::Float(self.parse_float())
            } else {
                TokenKind::Number(self.parse_int(10))
            }
        };

        self.push_token(kind);
    }

    fn parse_int(&self, base: u32) -> u64 {
        if self.scratch.is_empty() {
            self.handler.error(
                format!("no digits after base-{base} prefix"),
                self.current_span(),
            );
            return 0;
        }

        let text = std::str::from_utf8(&self.scratch).unwrap_or_default();
        match u64::from_str_radix(text, base) {
            Ok(value) => value,
            Err(e) => {
                self.handler.error(
                    format!("integer literal out of range: {e}"),
                    self.current_span(),
                );
                0
            }
        }
    }

    fn parse_float(&self) -> f64 {
        let text = std::str::from_utf8(&self.scratch).unwrap_or_default();
        match text.parse::<f64>() {
            Ok(value) => value,
            Err(e) => {
                self.handler.error(
                    format!("invalid floating point literal '{text}': {e}"),
                    self.current_span(),
                );
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use opalc_util::{AtomTable, Handler};

    fn lex_nums(source: &str) -> (Vec<Token>, Handler) {
        let mut atoms = AtomTable::new();
        let mut tokens = Vec::new();
        let handler = Handler::new();
        let mut lexer = Lexer::new(source.as_bytes(), &mut tokens, &mut atoms, &handler);
        lexer.run().unwrap();
        (tokens, handler)
    }

    #[test]
    fn test_decimal_integers() {
        let (tokens, handler) = lex_nums("0 42 123456");
        assert_eq!(tokens[0].kind, TokenKind::Number(0));
        assert_eq!(tokens[1].kind, TokenKind::Number(42));
        assert_eq!(tokens[2].kind, TokenKind::Number(123456));
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_hex_integers() {
        let (tokens, _) = lex_nums("0x1F 0xff 0x0");
        assert_eq!(tokens[0].kind, TokenKind::Number(31));
        assert_eq!(tokens[1].kind, TokenKind::Number(255));
        assert_eq!(tokens[2].kind, TokenKind::Number(0));
    }

    #[test]
    fn test_binary_integers() {
        let (tokens, _) = lex_nums("0b1010 0b0");
        assert_eq!(tokens[0].kind, TokenKind::Number(10));
        assert_eq!(tokens[1].kind, TokenKind::Number(0));
    }

    #[test]
    fn test_floats() {
        let (tokens, handler) = lex_nums("3.14 0.5 7.");
        assert!(matches!(tokens[0].kind, TokenKind::Float(f) if (f - 3.14).abs() < 1e-9));
        assert!(matches!(tokens[1].kind, TokenKind::Float(f) if (f - 0.5).abs() < 1e-9));
        assert!(matches!(tokens[2].kind, TokenKind::Float(f) if (f - 7.0).abs() < 1e-9));
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_second_dot_ends_the_literal() {
        let (tokens, _) = lex_nums("1.2.3");
        assert!(matches!(tokens[0].kind, TokenKind::Float(f) if (f - 1.2).abs() < 1e-9));
        assert_eq!(tokens[1].kind, TokenKind::Punct(b'.'));
        assert_eq!(tokens[2].kind, TokenKind::Number(3));
    }

    #[test]
    fn test_empty_hex_run_reports() {
        let (tokens, handler) = lex_nums("0x");
        assert_eq!(tokens[0].kind, TokenKind::Number(0));
        assert!(handler.has_errors());
    }

    #[test]
    fn test_out_of_range_reports() {
        let (tokens, handler) = lex_nums("99999999999999999999999999");
        assert_eq!(tokens[0].kind, TokenKind::Number(0));
        assert!(handler.has_errors());
    }

    #[test]
    fn test_max_u64() {
        let (tokens, handler) = lex_nums("18446744073709551615 0xFFFFFFFFFFFFFFFF");
        assert_eq!(tokens[0].kind, TokenKind::Number(u64::MAX));
        assert_eq!(tokens[1].kind, TokenKind::Number(u64::MAX));
        assert!(!handler.has_errors());
    }
}

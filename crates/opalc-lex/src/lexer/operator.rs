//! Operator and punctuation scanning.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Scans a printable character that starts neither an identifier, a
    /// number, a comment nor a string.
    ///
    /// The character and its successor are checked against the fixed
    /// two-character operator table; on a match both are consumed and the
    /// composite token is emitted. Otherwise the single character becomes a
    /// [`TokenKind::Punct`] carrying its byte value.
    pub(crate) fn read_symbol(&mut self) {
        let Some(lhs) = self.cursor.bump() else {
            return;
        };
        let rhs = self.cursor.peek();

        let composite = match (lhs, rhs) {
            (b'+', Some(b'=')) => Some(TokenKind::PlusEq),
            (b'-', Some(b'>')) => Some(TokenKind::Arrow),
            (b'-', Some(b'=')) => Some(TokenKind::MinusEq),
            (b'*', Some(b'=')) => Some(TokenKind::StarEq),
            (b'/', Some(b'=')) => Some(TokenKind::SlashEq),
            (b'%', Some(b'=')) => Some(TokenKind::PercentEq),
            (b'=', Some(b'=')) => Some(TokenKind::EqEq),
            (b'!', Some(b'=')) => Some(TokenKind::NotEq),
            (b'&', Some(b'&')) => Some(TokenKind::AndAnd),
            (b'&', Some(b'=')) => Some(TokenKind::AmpEq),
            (b'|', Some(b'|')) => Some(TokenKind::OrOr),
            (b'|', Some(b'=')) => Some(TokenKind::PipeEq),
            (b'^', Some(b'=')) => Some(TokenKind::CaretEq),
            (b'<', Some(b'=')) => Some(TokenKind::LtEq),
            (b'<', Some(b'<')) => Some(TokenKind::Shl),
            (b'>', Some(b'=')) => Some(TokenKind::GtEq),
            (b'>', Some(b'>')) => Some(TokenKind::Shr),
            _ => None,
        };

        match composite {
            Some(kind) => {
                self.cursor.advance();
                self.push_token(kind);
            }
            None => self.push_token(TokenKind::Punct(lhs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use opalc_util::{AtomTable, Handler};

    fn lex_ops(source: &str) -> Vec<Token> {
        let mut atoms = AtomTable::new();
        let mut tokens = Vec::new();
        let handler = Handler::new();
        let mut lexer = Lexer::new(source.as_bytes(), &mut tokens, &mut atoms, &handler);
        lexer.run().unwrap();
        tokens
    }

    #[test]
    fn test_every_two_char_operator() {
        let tokens = lex_ops("+= -= -> == != && || <= >= << >> &= |= ^= *= /= %=");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::Arrow,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::AmpEq,
                TokenKind::PipeEq,
                TokenKind::CaretEq,
                TokenKind::StarEq,
                TokenKind::SlashEq,
                TokenKind::PercentEq,
            ]
        );
    }

    #[test]
    fn test_single_characters_fall_through() {
        let tokens = lex_ops("+ - ; ( ) { } . ,");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Punct(b'+'),
                TokenKind::Punct(b'-'),
                TokenKind::Punct(b';'),
                TokenKind::Punct(b'('),
                TokenKind::Punct(b')'),
                TokenKind::Punct(b'{'),
                TokenKind::Punct(b'}'),
                TokenKind::Punct(b'.'),
                TokenKind::Punct(b','),
            ]
        );
    }

    #[test]
    fn test_adjacent_operators_split_greedily() {
        // `===` is `==` then `=`; `<<<` is `<<` then `<`.
        let tokens = lex_ops("=== <<<");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::EqEq,
                TokenKind::Punct(b'='),
                TokenKind::Shl,
                TokenKind::Punct(b'<'),
            ]
        );
    }

    #[test]
    fn test_equals_before_greater_is_two_tokens() {
        // No `=>` in the operator table.
        let tokens = lex_ops("=>");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Punct(b'='), TokenKind::Punct(b'>')]);
    }
}

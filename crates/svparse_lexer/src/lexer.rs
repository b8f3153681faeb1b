//! The lexer proper.
//!
//! Scans the whole input into a token vector ending in an `EndOfFile` token.
//! Identifier and literal text is interned; punctuation and keywords carry
//! no text since their spelling is fixed by their kind.

use crate::keywords::keyword_kind;
use memchr::{memchr, memmem};
use svparse_ast::{Token, TokenFlags, TokenKind};
use svparse_core::intern::StringInterner;
use svparse_core::text::TextSpan;
use svparse_diagnostics::{messages, Diagnostic, DiagnosticCollection};

/// Tokenize a full source string.
pub fn tokenize(
    src: &str,
    interner: &StringInterner,
    diagnostics: &mut DiagnosticCollection,
) -> Vec<Token> {
    Lexer::new(src, interner, diagnostics).run()
}

pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    interner: &'a StringInterner,
    diagnostics: &'a mut DiagnosticCollection,
    saw_line_break: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(
        src: &'a str,
        interner: &'a StringInterner,
        diagnostics: &'a mut DiagnosticCollection,
    ) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            interner,
            diagnostics,
            saw_line_break: false,
        }
    }

    pub fn run(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            let start = self.pos;
            if self.pos >= self.bytes.len() {
                tokens.push(self.finish_token(TokenKind::EndOfFile, start));
                break;
            }
            let token = self.next_token(start);
            let is_base = token.kind == TokenKind::IntegerBase;
            tokens.push(token);
            // Based vector digits have their own alphabet (hex digits would
            // otherwise lex as an identifier), so scan them right here.
            if is_base {
                if let Some(value) = self.scan_vector_value() {
                    tokens.push(value);
                }
            }
        }
        tokens
    }

    fn finish_token(&mut self, kind: TokenKind, start: usize) -> Token {
        let mut token = Token::new(kind, start as u32, self.pos as u32);
        if self.saw_line_break {
            token = token.with_flags(TokenFlags::PRECEDING_LINE_BREAK);
            self.saw_line_break = false;
        }
        token
    }

    fn finish_text_token(&mut self, kind: TokenKind, start: usize) -> Token {
        let text = self.interner.intern(&self.src[start..self.pos]);
        self.finish_token(kind, start).with_text(text)
    }

    fn peek(&self) -> u8 {
        self.bytes.get(self.pos).copied().unwrap_or(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                b'\n' => {
                    self.saw_line_break = true;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'/' if self.peek_at(1) == b'/' => {
                    match memchr(b'\n', &self.bytes[self.pos..]) {
                        Some(offset) => self.pos += offset,
                        None => self.pos = self.bytes.len(),
                    }
                }
                b'/' if self.peek_at(1) == b'*' => {
                    let start = self.pos;
                    match memmem::find(&self.bytes[self.pos + 2..], b"*/") {
                        Some(offset) => {
                            let body = &self.bytes[self.pos + 2..self.pos + 2 + offset];
                            if memchr(b'\n', body).is_some() {
                                self.saw_line_break = true;
                            }
                            self.pos += 2 + offset + 2;
                        }
                        None => {
                            self.diagnostics.add(Diagnostic::with_span(
                                TextSpan::from_bounds(start as u32, self.bytes.len() as u32),
                                &messages::UNTERMINATED_BLOCK_COMMENT,
                                &[],
                            ));
                            self.pos = self.bytes.len();
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self, start: usize) -> Token {
        let c = self.peek();
        match c {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_identifier_or_keyword(start),
            b'0'..=b'9' => self.scan_number(start),
            b'"' => self.scan_string(start),
            b'\\' => self.scan_escaped_identifier(start),
            b'$' => self.scan_system_identifier(start),
            b'\'' => self.scan_apostrophe(start),
            _ => self.scan_punctuation(start),
        }
    }

    fn scan_identifier_or_keyword(&mut self, start: usize) -> Token {
        while matches!(self.peek(), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'$') {
            self.pos += 1;
        }
        let text = &self.src[start..self.pos];
        match keyword_kind(text) {
            Some(kind) => self.finish_token(kind, start),
            None => self.finish_text_token(TokenKind::Identifier, start),
        }
    }

    fn scan_number(&mut self, start: usize) -> Token {
        while matches!(self.peek(), b'0'..=b'9' | b'_') {
            self.pos += 1;
        }

        // `1step` is its own keyword token.
        if &self.src[start..self.pos] == "1" && self.src[self.pos..].starts_with("step") {
            self.pos += 4;
            return self.finish_token(TokenKind::OneStep, start);
        }

        let mut is_real = false;
        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            is_real = true;
            self.pos += 1;
            while matches!(self.peek(), b'0'..=b'9' | b'_') {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), b'e' | b'E') {
            let mut lookahead = 1;
            if matches!(self.peek_at(1), b'+' | b'-') {
                lookahead = 2;
            }
            if self.peek_at(lookahead).is_ascii_digit() {
                is_real = true;
                self.pos += lookahead;
                while matches!(self.peek(), b'0'..=b'9' | b'_') {
                    self.pos += 1;
                }
            }
        }

        if let Some(unit_len) = self.time_unit_length() {
            self.pos += unit_len;
            return self.finish_text_token(TokenKind::TimeLiteral, start);
        }

        let kind = if is_real {
            TokenKind::RealLiteral
        } else {
            TokenKind::IntegerLiteral
        };
        self.finish_text_token(kind, start)
    }

    /// Length of a time unit suffix (s, ms, us, ns, ps, fs) at the current
    /// position, not followed by more identifier characters.
    fn time_unit_length(&self) -> Option<usize> {
        let rest = &self.bytes[self.pos..];
        let len = match rest {
            [b'm' | b'u' | b'n' | b'p' | b'f', b's', ..] => 2,
            [b's', ..] => 1,
            _ => return None,
        };
        match rest.get(len) {
            Some(c) if c.is_ascii_alphanumeric() || *c == b'_' || *c == b'$' => None,
            _ => Some(len),
        }
    }

    fn scan_string(&mut self, start: usize) -> Token {
        self.pos += 1;
        loop {
            match self.peek() {
                0 if self.pos >= self.bytes.len() => {
                    self.diagnostics.add(Diagnostic::with_span(
                        TextSpan::from_bounds(start as u32, self.pos as u32),
                        &messages::UNTERMINATED_STRING_LITERAL,
                        &[],
                    ));
                    break;
                }
                b'\n' => {
                    self.diagnostics.add(Diagnostic::with_span(
                        TextSpan::from_bounds(start as u32, self.pos as u32),
                        &messages::UNTERMINATED_STRING_LITERAL,
                        &[],
                    ));
                    break;
                }
                b'"' => {
                    self.pos += 1;
                    break;
                }
                b'\\' => {
                    self.pos += 1;
                    if self.pos < self.bytes.len() {
                        self.pos += 1;
                    }
                }
                _ => self.pos += 1,
            }
        }
        self.finish_text_token(TokenKind::StringLiteral, start)
    }

    fn scan_escaped_identifier(&mut self, start: usize) -> Token {
        self.pos += 1;
        while self.pos < self.bytes.len() && !self.peek().is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos == start + 1 {
            self.diagnostics.add(Diagnostic::with_span(
                TextSpan::from_bounds(start as u32, self.pos as u32),
                &messages::ESCAPED_IDENTIFIER_EMPTY,
                &[],
            ));
        }
        self.finish_text_token(TokenKind::Identifier, start)
    }

    fn scan_system_identifier(&mut self, start: usize) -> Token {
        self.pos += 1;
        while matches!(self.peek(), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'$') {
            self.pos += 1;
        }
        match &self.src[start..self.pos] {
            "$" => self.finish_token(TokenKind::Dollar, start),
            "$root" => self.finish_token(TokenKind::RootSystemName, start),
            "$unit" => self.finish_token(TokenKind::UnitSystemName, start),
            _ => self.finish_text_token(TokenKind::SystemIdentifier, start),
        }
    }

    fn scan_apostrophe(&mut self, start: usize) -> Token {
        self.pos += 1;
        match self.peek() {
            b'{' => {
                self.pos += 1;
                self.finish_token(TokenKind::ApostropheOpenBrace, start)
            }
            b'0' | b'1' | b'x' | b'X' | b'z' | b'Z'
                if !matches!(self.peek_at(1), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') =>
            {
                self.pos += 1;
                self.finish_text_token(TokenKind::UnbasedUnsizedLiteral, start)
            }
            b's' | b'S' if Self::base_char(self.peek_at(1)).is_some() => {
                self.pos += 2;
                self.finish_text_token(TokenKind::IntegerBase, start)
            }
            c if Self::base_char(c).is_some() => {
                self.pos += 1;
                self.finish_text_token(TokenKind::IntegerBase, start)
            }
            _ => self.finish_token(TokenKind::Apostrophe, start),
        }
    }

    fn base_char(c: u8) -> Option<u8> {
        match c {
            b'b' | b'B' => Some(b'b'),
            b'o' | b'O' => Some(b'o'),
            b'd' | b'D' => Some(b'd'),
            b'h' | b'H' => Some(b'h'),
            _ => None,
        }
    }

    /// Scan the digits of a based vector literal, right after its base token.
    fn scan_vector_value(&mut self) -> Option<Token> {
        let base = self.bytes[self.pos - 1];
        self.skip_trivia();
        let start = self.pos;
        let mut any = false;
        loop {
            let c = self.peek();
            let is_digit = match c {
                b'_' => true,
                b'x' | b'X' | b'z' | b'Z' | b'?' => Self::base_char(base) != Some(b'd') || !any,
                b'0'..=b'9' | b'a'..=b'f' | b'A'..=b'F' => {
                    let valid = match Self::base_char(base) {
                        Some(b'b') => matches!(c, b'0' | b'1'),
                        Some(b'o') => matches!(c, b'0'..=b'7'),
                        Some(b'd') => c.is_ascii_digit(),
                        _ => true,
                    };
                    if !valid && c.is_ascii_digit() {
                        // A decimal digit out of range for the base is a
                        // user error; consume it so we don't loop.
                        self.diagnostics.add(Diagnostic::with_span(
                            TextSpan::from_bounds(self.pos as u32, self.pos as u32 + 1),
                            &messages::INVALID_BASE_DIGIT,
                            &[&(c as char).to_string()],
                        ));
                        true
                    } else {
                        valid
                    }
                }
                _ => false,
            };
            if !is_digit {
                break;
            }
            any = true;
            self.pos += 1;
        }
        if !any {
            self.diagnostics.add(Diagnostic::with_span(
                TextSpan::empty(start as u32),
                &messages::MISSING_VECTOR_DIGITS,
                &[],
            ));
            return None;
        }
        Some(self.finish_text_token(TokenKind::IntegerLiteral, start))
    }

    fn scan_punctuation(&mut self, start: usize) -> Token {
        use TokenKind::*;
        let rest = &self.bytes[self.pos..];
        // Maximal munch: longest operators first within each leading byte.
        let (kind, len) = match rest {
            [b'<', b'<', b'<', b'=', ..] => (TripleLeftShiftEqual, 4),
            [b'>', b'>', b'>', b'=', ..] => (TripleRightShiftEqual, 4),
            [b'<', b'<', b'<', ..] => (TripleLeftShift, 3),
            [b'>', b'>', b'>', ..] => (TripleRightShift, 3),
            [b'<', b'<', b'=', ..] => (LeftShiftEqual, 3),
            [b'>', b'>', b'=', ..] => (RightShiftEqual, 3),
            [b'<', b'-', b'>', ..] => (LessThanMinusArrow, 3),
            [b'=', b'=', b'?', ..] => (DoubleEqualsQuestion, 3),
            [b'=', b'=', b'=', ..] => (TripleEquals, 3),
            [b'!', b'=', b'?', ..] => (ExclamationEqualsQuestion, 3),
            [b'!', b'=', b'=', ..] => (ExclamationDoubleEquals, 3),
            [b'&', b'&', b'&', ..] => (TripleAnd, 3),
            [b'|', b'-', b'>', ..] => (OrMinusArrow, 3),
            [b'|', b'=', b'>', ..] => (OrEqualsArrow, 3),
            [b'#', b'-', b'#', ..] => (HashMinusHash, 3),
            [b'#', b'=', b'#', ..] => (HashEqualsHash, 3),
            [b'<', b'<', ..] => (LeftShift, 2),
            [b'>', b'>', ..] => (RightShift, 2),
            [b'<', b'=', ..] => (LessThanEquals, 2),
            [b'>', b'=', ..] => (GreaterThanEquals, 2),
            [b'=', b'=', ..] => (DoubleEquals, 2),
            [b'!', b'=', ..] => (ExclamationEquals, 2),
            [b'&', b'&', ..] => (DoubleAnd, 2),
            [b'|', b'|', ..] => (DoubleOr, 2),
            [b'&', b'=', ..] => (AndEqual, 2),
            [b'|', b'=', ..] => (OrEqual, 2),
            [b'^', b'=', ..] => (XorEqual, 2),
            [b'^', b'~', ..] => (XorTilde, 2),
            [b'~', b'&', ..] => (TildeAnd, 2),
            [b'~', b'|', ..] => (TildeOr, 2),
            [b'~', b'^', ..] => (TildeXor, 2),
            [b'+', b'+', ..] => (DoublePlus, 2),
            [b'-', b'-', ..] => (DoubleMinus, 2),
            [b'+', b'=', ..] => (PlusEqual, 2),
            [b'-', b'=', ..] => (MinusEqual, 2),
            [b'*', b'=', ..] => (StarEqual, 2),
            [b'/', b'=', ..] => (SlashEqual, 2),
            [b'%', b'=', ..] => (PercentEqual, 2),
            [b'+', b':', ..] => (PlusColon, 2),
            [b'-', b':', ..] => (MinusColon, 2),
            [b'-', b'>', ..] => (MinusArrow, 2),
            [b'*', b'*', ..] => (DoubleStar, 2),
            [b'*', b')', ..] => (StarCloseParenthesis, 2),
            [b'(', b'*', ..] => (OpenParenthesisStar, 2),
            [b':', b':', ..] => (DoubleColon, 2),
            [b':', b'=', ..] => (ColonEquals, 2),
            [b':', b'/', ..] => (ColonSlash, 2),
            [b'.', b'*', ..] => (DotStar, 2),
            [b'#', b'#', ..] => (DoubleHash, 2),
            [b'{', ..] => (OpenBrace, 1),
            [b'}', ..] => (CloseBrace, 1),
            [b'[', ..] => (OpenBracket, 1),
            [b']', ..] => (CloseBracket, 1),
            [b'(', ..] => (OpenParenthesis, 1),
            [b')', ..] => (CloseParenthesis, 1),
            [b';', ..] => (Semicolon, 1),
            [b':', ..] => (Colon, 1),
            [b',', ..] => (Comma, 1),
            [b'.', ..] => (Dot, 1),
            [b'/', ..] => (Slash, 1),
            [b'*', ..] => (Star, 1),
            [b'+', ..] => (Plus, 1),
            [b'-', ..] => (Minus, 1),
            [b'=', ..] => (Equals, 1),
            [b'!', ..] => (Exclamation, 1),
            [b'<', ..] => (LessThan, 1),
            [b'>', ..] => (GreaterThan, 1),
            [b'&', ..] => (And, 1),
            [b'|', ..] => (Or, 1),
            [b'^', ..] => (Xor, 1),
            [b'~', ..] => (Tilde, 1),
            [b'%', ..] => (Percent, 1),
            [b'#', ..] => (Hash, 1),
            [b'?', ..] => (Question, 1),
            [b'@', ..] => (At, 1),
            _ => {
                let c = self.src[self.pos..].chars().next().unwrap_or('\0');
                self.diagnostics.add(Diagnostic::with_span(
                    TextSpan::from_bounds(start as u32, (start + c.len_utf8()) as u32),
                    &messages::UNEXPECTED_CHARACTER,
                    &[&c.to_string()],
                ));
                self.pos += c.len_utf8();
                return self.finish_token(Unknown, start);
            }
        };
        self.pos += len;
        self.finish_token(kind, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> (Vec<Token>, DiagnosticCollection) {
        let interner = StringInterner::new();
        let mut diagnostics = DiagnosticCollection::new();
        let tokens = tokenize(src, &interner, &mut diagnostics);
        (tokens, diagnostics)
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).0.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_identifiers_and_keywords() {
        use TokenKind::*;
        assert_eq!(
            kinds("foo inside bar"),
            vec![Identifier, InsideKeyword, Identifier, EndOfFile]
        );
    }

    #[test]
    fn test_maximal_munch() {
        use TokenKind::*;
        assert_eq!(kinds("<<<="), vec![TripleLeftShiftEqual, EndOfFile]);
        assert_eq!(kinds("|->"), vec![OrMinusArrow, EndOfFile]);
        assert_eq!(kinds("|=>"), vec![OrEqualsArrow, EndOfFile]);
        assert_eq!(kinds("#-#"), vec![HashMinusHash, EndOfFile]);
        assert_eq!(kinds("&&&"), vec![TripleAnd, EndOfFile]);
        assert_eq!(kinds("a<->b"), vec![Identifier, LessThanMinusArrow, Identifier, EndOfFile]);
    }

    #[test]
    fn test_vector_literals() {
        use TokenKind::*;
        assert_eq!(
            kinds("4'b1010"),
            vec![IntegerLiteral, IntegerBase, IntegerLiteral, EndOfFile]
        );
        assert_eq!(kinds("'hFF"), vec![IntegerBase, IntegerLiteral, EndOfFile]);
        assert_eq!(
            kinds("8'shA5"),
            vec![IntegerLiteral, IntegerBase, IntegerLiteral, EndOfFile]
        );
        assert_eq!(kinds("'bx1z0"), vec![IntegerBase, IntegerLiteral, EndOfFile]);
    }

    #[test]
    fn test_missing_vector_digits() {
        let (tokens, diagnostics) = lex("'b ;");
        assert_eq!(tokens[0].kind, TokenKind::IntegerBase);
        assert_eq!(tokens[1].kind, TokenKind::Semicolon);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_unbased_unsized() {
        use TokenKind::*;
        assert_eq!(kinds("'0"), vec![UnbasedUnsizedLiteral, EndOfFile]);
        assert_eq!(kinds("'z"), vec![UnbasedUnsizedLiteral, EndOfFile]);
        assert_eq!(kinds("'{"), vec![ApostropheOpenBrace, EndOfFile]);
    }

    #[test]
    fn test_real_and_time_literals() {
        use TokenKind::*;
        assert_eq!(kinds("3.14"), vec![RealLiteral, EndOfFile]);
        assert_eq!(kinds("2.5e-3"), vec![RealLiteral, EndOfFile]);
        assert_eq!(kinds("10ns"), vec![TimeLiteral, EndOfFile]);
        assert_eq!(kinds("1step"), vec![OneStep, EndOfFile]);
        assert_eq!(kinds("100"), vec![IntegerLiteral, EndOfFile]);
    }

    #[test]
    fn test_system_names() {
        use TokenKind::*;
        assert_eq!(kinds("$root"), vec![RootSystemName, EndOfFile]);
        assert_eq!(kinds("$unit"), vec![UnitSystemName, EndOfFile]);
        assert_eq!(kinds("$countones"), vec![SystemIdentifier, EndOfFile]);
        assert_eq!(kinds("$"), vec![Dollar, EndOfFile]);
    }

    #[test]
    fn test_comments_and_line_break_flag() {
        let (tokens, diagnostics) = lex("a // comment\nb /* block */ c");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens.len(), 4);
        assert!(!tokens[0].flags.contains(TokenFlags::PRECEDING_LINE_BREAK));
        assert!(tokens[1].flags.contains(TokenFlags::PRECEDING_LINE_BREAK));
        assert!(!tokens[2].flags.contains(TokenFlags::PRECEDING_LINE_BREAK));
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, diagnostics) = lex("\"abc");
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_escaped_identifier() {
        let interner = StringInterner::new();
        let mut diagnostics = DiagnosticCollection::new();
        let tokens = tokenize("\\bus+index ", &interner, &mut diagnostics);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(interner.resolve(tokens[0].text), "\\bus+index");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_attribute_parens() {
        use TokenKind::*;
        assert_eq!(
            kinds("(* full_case *)"),
            vec![OpenParenthesisStar, Identifier, StarCloseParenthesis, EndOfFile]
        );
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The scanner that produces tokens from source text.
//!
//! The scanner is a plain byte cursor over the source and is cheap to
//! clone, which is how the parser looks ahead more than one token.
//! Two tokens depend on parser context and are re-scanned on request:
//! a `/` in operand position starts a regular expression, and a `}`
//! that closes a template substitution continues the template.

use super::{Span, Token, TokenKind};

/// A scanner that tokenizes JavaScript source code.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given source code.
    ///
    /// A leading `#!` line is skipped.
    pub fn new(source: &'a str) -> Self {
        let mut scanner = Self { source, pos: 0 };
        if source.starts_with("#!") {
            while let Some(ch) = scanner.peek() {
                if is_line_terminator(ch) {
                    break;
                }
                scanner.advance();
            }
        }
        scanner
    }

    /// Returns the source text this scanner reads.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        let newline_before = self.skip_whitespace_and_comments();
        let start = self.pos;

        let Some(ch) = self.advance() else {
            return self.finish(TokenKind::Eof, start, newline_before);
        };

        let kind = match ch {
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '~' => TokenKind::Tilde,

            '.' => self.scan_dot(),
            '+' => self.scan_plus(),
            '-' => self.scan_minus(),
            '*' => self.scan_star(),
            '/' => self.scan_slash(),
            '%' => self.scan_percent(),
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '=' => self.scan_equal(),
            '!' => self.scan_bang(),
            '&' => self.scan_ampersand(),
            '|' => self.scan_pipe(),
            '^' => self.scan_caret(),
            '?' => self.scan_question(),

            '"' | '\'' => self.scan_string(ch),
            '`' => self.scan_template_chunk(),
            '0'..='9' => self.scan_number(ch, start),
            '#' => self.scan_private_identifier(),
            _ if is_id_start(ch) => self.scan_identifier(start),

            _ => TokenKind::Invalid("unexpected character"),
        };

        self.finish(kind, start, newline_before)
    }

    /// Re-scans a `/` or `/=` token starting at `start` as a regular
    /// expression literal.
    pub fn rescan_regexp(&mut self, start: usize, newline_before: bool) -> Token {
        self.pos = start + 1;
        let mut in_class = false;

        loop {
            match self.advance() {
                None => {
                    return self.finish(
                        TokenKind::Invalid("unterminated regular expression"),
                        start,
                        newline_before,
                    );
                }
                Some(ch) if is_line_terminator(ch) => {
                    return self.finish(
                        TokenKind::Invalid("unterminated regular expression"),
                        start,
                        newline_before,
                    );
                }
                Some('\\') => {
                    if matches!(self.peek(), Some(ch) if !is_line_terminator(ch)) {
                        self.advance();
                    }
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some(_) => {}
            }
        }

        let pattern = self.source[start + 1..self.pos - 1].to_string();
        let flags_start = self.pos;
        while matches!(self.peek(), Some(ch) if is_id_continue(ch)) {
            self.advance();
        }
        let flags = self.source[flags_start..self.pos].to_string();

        self.finish(TokenKind::RegExp { pattern, flags }, start, newline_before)
    }

    /// Continues a template literal after the `}` at `start` that closed a
    /// substitution.
    pub fn scan_template_continuation(&mut self, start: usize) -> Token {
        self.pos = start + 1;
        let kind = self.scan_template_chunk();
        self.finish(kind, start, false)
    }

    fn finish(&self, kind: TokenKind, start: usize, newline_before: bool) -> Token {
        Token {
            kind,
            span: Span::new(start, self.pos),
            newline_before,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.source[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips whitespace and comments, returning whether a line terminator
    /// was crossed.
    fn skip_whitespace_and_comments(&mut self) -> bool {
        let mut newline = false;
        loop {
            match self.peek() {
                Some(ch) if is_line_terminator(ch) => {
                    newline = true;
                    self.advance();
                }
                Some(ch) if ch.is_whitespace() || ch == '\u{feff}' => {
                    self.advance();
                }
                Some('/') => match self.peek_next() {
                    Some('/') => {
                        while let Some(ch) = self.peek() {
                            if is_line_terminator(ch) {
                                break;
                            }
                            self.advance();
                        }
                    }
                    Some('*') => {
                        self.advance();
                        self.advance();
                        let mut prev = ' ';
                        while let Some(ch) = self.advance() {
                            if is_line_terminator(ch) {
                                newline = true;
                            }
                            if prev == '*' && ch == '/' {
                                break;
                            }
                            prev = ch;
                        }
                    }
                    _ => break,
                },
                _ => break,
            }
        }
        newline
    }

    fn scan_dot(&mut self) -> TokenKind {
        match self.peek() {
            Some('0'..='9') => {
                let start = self.pos - 1;
                self.skip_digits();
                self.scan_decimal_tail(start)
            }
            Some('.') if self.peek_next() == Some('.') => {
                self.advance();
                self.advance();
                TokenKind::Ellipsis
            }
            _ => TokenKind::Dot,
        }
    }

    fn scan_plus(&mut self) -> TokenKind {
        if self.eat('+') {
            TokenKind::PlusPlus
        } else if self.eat('=') {
            TokenKind::PlusEqual
        } else {
            TokenKind::Plus
        }
    }

    fn scan_minus(&mut self) -> TokenKind {
        if self.eat('-') {
            TokenKind::MinusMinus
        } else if self.eat('=') {
            TokenKind::MinusEqual
        } else {
            TokenKind::Minus
        }
    }

    fn scan_star(&mut self) -> TokenKind {
        if self.eat('*') {
            if self.eat('=') {
                TokenKind::StarStarEqual
            } else {
                TokenKind::StarStar
            }
        } else if self.eat('=') {
            TokenKind::StarEqual
        } else {
            TokenKind::Star
        }
    }

    fn scan_slash(&mut self) -> TokenKind {
        if self.eat('=') {
            TokenKind::SlashEqual
        } else {
            TokenKind::Slash
        }
    }

    fn scan_percent(&mut self) -> TokenKind {
        if self.eat('=') {
            TokenKind::PercentEqual
        } else {
            TokenKind::Percent
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        if self.eat('<') {
            if self.eat('=') {
                TokenKind::LeftShiftEqual
            } else {
                TokenKind::LeftShift
            }
        } else if self.eat('=') {
            TokenKind::LessThanEqual
        } else {
            TokenKind::LessThan
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        if self.eat('>') {
            if self.eat('>') {
                if self.eat('=') {
                    TokenKind::UnsignedRightShiftEqual
                } else {
                    TokenKind::UnsignedRightShift
                }
            } else if self.eat('=') {
                TokenKind::RightShiftEqual
            } else {
                TokenKind::RightShift
            }
        } else if self.eat('=') {
            TokenKind::GreaterThanEqual
        } else {
            TokenKind::GreaterThan
        }
    }

    fn scan_equal(&mut self) -> TokenKind {
        if self.eat('=') {
            if self.eat('=') {
                TokenKind::StrictEqual
            } else {
                TokenKind::EqualEqual
            }
        } else if self.eat('>') {
            TokenKind::Arrow
        } else {
            TokenKind::Equal
        }
    }

    fn scan_bang(&mut self) -> TokenKind {
        if self.eat('=') {
            if self.eat('=') {
                TokenKind::StrictNotEqual
            } else {
                TokenKind::NotEqual
            }
        } else {
            TokenKind::Bang
        }
    }

    fn scan_ampersand(&mut self) -> TokenKind {
        if self.eat('&') {
            if self.eat('=') {
                TokenKind::AmpersandAmpersandEqual
            } else {
                TokenKind::AmpersandAmpersand
            }
        } else if self.eat('=') {
            TokenKind::AmpersandEqual
        } else {
            TokenKind::Ampersand
        }
    }

    fn scan_pipe(&mut self) -> TokenKind {
        if self.eat('|') {
            if self.eat('=') {
                TokenKind::PipePipeEqual
            } else {
                TokenKind::PipePipe
            }
        } else if self.eat('=') {
            TokenKind::PipeEqual
        } else {
            TokenKind::Pipe
        }
    }

    fn scan_caret(&mut self) -> TokenKind {
        if self.eat('=') {
            TokenKind::CaretEqual
        } else {
            TokenKind::Caret
        }
    }

    fn scan_question(&mut self) -> TokenKind {
        if self.eat('?') {
            if self.eat('=') {
                TokenKind::QuestionQuestionEqual
            } else {
                TokenKind::QuestionQuestion
            }
        } else if self.peek() == Some('.') && !matches!(self.peek_next(), Some('0'..='9')) {
            // `a?.5:b` is a conditional, not an optional chain
            self.advance();
            TokenKind::QuestionDot
        } else {
            TokenKind::Question
        }
    }

    fn scan_string(&mut self, quote: char) -> TokenKind {
        let mut value = String::new();

        loop {
            match self.advance() {
                None => return TokenKind::Invalid("unterminated string literal"),
                Some(ch) if ch == quote => break,
                Some('\n' | '\r') => return TokenKind::Invalid("unterminated string literal"),
                Some('\\') => match self.scan_escape() {
                    Ok(Some(ch)) => value.push(ch),
                    Ok(None) => {}
                    Err(reason) => return TokenKind::Invalid(reason),
                },
                Some(ch) => value.push(ch),
            }
        }

        TokenKind::String(value)
    }

    /// Scans one template chunk, starting just after the opening backtick
    /// or the `}` of a substitution.
    fn scan_template_chunk(&mut self) -> TokenKind {
        let start = self.pos;
        let mut cooked = Some(String::new());

        let (end, tail) = loop {
            let here = self.pos;
            match self.advance() {
                None => return TokenKind::Invalid("unterminated template literal"),
                Some('`') => break (here, true),
                Some('$') if self.peek() == Some('{') => {
                    self.advance();
                    break (here, false);
                }
                Some('\\') => match self.scan_escape() {
                    Ok(Some(ch)) => {
                        if let Some(text) = cooked.as_mut() {
                            text.push(ch);
                        }
                    }
                    Ok(None) => {}
                    Err(_) => cooked = None,
                },
                Some('\r') => {
                    self.eat('\n');
                    if let Some(text) = cooked.as_mut() {
                        text.push('\n');
                    }
                }
                Some(ch) => {
                    if let Some(text) = cooked.as_mut() {
                        text.push(ch);
                    }
                }
            }
        };

        let raw = self.source[start..end].replace("\r\n", "\n").replace('\r', "\n");
        TokenKind::Template { cooked, raw, tail }
    }

    /// Decodes the escape sequence after a backslash. `Ok(None)` is a line
    /// continuation.
    fn scan_escape(&mut self) -> Result<Option<char>, &'static str> {
        let Some(escaped) = self.advance() else {
            return Err("unterminated escape sequence");
        };
        let ch = match escaped {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' if !matches!(self.peek(), Some('0'..='9')) => '\0',
            '1'..='9' => return Err("octal escape sequences are not allowed"),
            'x' => {
                let code = self.scan_hex_digits(2).ok_or("invalid hexadecimal escape")?;
                char::from_u32(code).ok_or("invalid hexadecimal escape")?
            }
            'u' => self.scan_unicode_escape()?,
            '\r' => {
                self.eat('\n');
                return Ok(None);
            }
            '\n' | '\u{2028}' | '\u{2029}' => return Ok(None),
            other => other,
        };
        Ok(Some(ch))
    }

    fn scan_unicode_escape(&mut self) -> Result<char, &'static str> {
        const INVALID: &str = "invalid unicode escape";

        if self.eat('{') {
            let start = self.pos;
            while matches!(self.peek(), Some(ch) if ch.is_ascii_hexdigit()) {
                self.advance();
            }
            let digits = &self.source[start..self.pos];
            if digits.is_empty() || !self.eat('}') {
                return Err(INVALID);
            }
            let code = u32::from_str_radix(digits, 16).map_err(|_| INVALID)?;
            return char::from_u32(code).ok_or(INVALID);
        }

        let high = self.scan_hex_digits(4).ok_or(INVALID)?;
        if (0xD800..0xDC00).contains(&high) {
            // A surrogate pair written as two escapes decodes to one scalar.
            let mut lookahead = self.clone();
            if lookahead.eat('\\') && lookahead.eat('u') {
                if let Some(low) = lookahead.scan_hex_digits(4) {
                    if (0xDC00..0xE000).contains(&low) {
                        *self = lookahead;
                        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                        return char::from_u32(code).ok_or(INVALID);
                    }
                }
            }
            return Ok(char::REPLACEMENT_CHARACTER);
        }
        if (0xDC00..0xE000).contains(&high) {
            return Ok(char::REPLACEMENT_CHARACTER);
        }
        char::from_u32(high).ok_or(INVALID)
    }

    fn scan_hex_digits(&mut self, count: usize) -> Option<u32> {
        let end = self.pos.checked_add(count)?;
        let digits = self.source.get(self.pos..end)?;
        if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return None;
        }
        self.pos = end;
        u32::from_str_radix(digits, 16).ok()
    }

    fn scan_number(&mut self, first: char, start: usize) -> TokenKind {
        if first == '0' {
            match self.peek() {
                Some('x' | 'X') => return self.scan_radix_number(16, "0x"),
                Some('o' | 'O') => return self.scan_radix_number(8, "0o"),
                Some('b' | 'B') => return self.scan_radix_number(2, "0b"),
                _ => {}
            }
        }

        self.skip_digits();
        if self.peek() == Some('n') {
            let digits = self.source[start..self.pos].replace('_', "");
            self.advance();
            return TokenKind::BigInt(digits);
        }
        if self.eat('.') {
            self.skip_digits();
        }
        self.scan_decimal_tail(start)
    }

    /// Finishes a decimal literal once its integer and fraction digits are
    /// consumed.
    fn scan_decimal_tail(&mut self, start: usize) -> TokenKind {
        if matches!(self.peek(), Some('e' | 'E')) {
            let checkpoint = self.pos;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if !matches!(self.peek(), Some('0'..='9')) {
                self.pos = checkpoint;
                return TokenKind::Invalid("missing exponent digits");
            }
            self.skip_digits();
        }
        if matches!(self.peek(), Some(ch) if is_id_start(ch)) {
            return TokenKind::Invalid("identifier directly after number");
        }

        let text = self.source[start..self.pos].replace('_', "");
        match text.parse::<f64>() {
            Ok(n) => TokenKind::Number(n),
            Err(_) => TokenKind::Invalid("invalid number literal"),
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some('0'..='9' | '_')) {
            self.advance();
        }
    }

    fn scan_radix_number(&mut self, radix: u32, prefix: &str) -> TokenKind {
        self.advance();
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_digit(radix) || ch == '_') {
            self.advance();
        }
        let digits = self.source[start..self.pos].replace('_', "");
        if digits.is_empty() {
            return TokenKind::Invalid("missing digits after radix prefix");
        }

        if self.eat('n') {
            return TokenKind::BigInt(format!("{prefix}{digits}"));
        }

        let value = digits.chars().fold(0f64, |acc, ch| {
            acc * f64::from(radix) + f64::from(ch.to_digit(radix).unwrap_or(0))
        });
        TokenKind::Number(value)
    }

    fn scan_identifier(&mut self, start: usize) -> TokenKind {
        while matches!(self.peek(), Some(ch) if is_id_continue(ch)) {
            self.advance();
        }

        let name = &self.source[start..self.pos];
        keyword(name).unwrap_or_else(|| TokenKind::Identifier(name.to_string()))
    }

    fn scan_private_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        if !matches!(self.peek(), Some(ch) if is_id_start(ch)) {
            return TokenKind::Invalid("expected a name after '#'");
        }
        while matches!(self.peek(), Some(ch) if is_id_continue(ch)) {
            self.advance();
        }
        TokenKind::PrivateIdentifier(self.source[start..self.pos].to_string())
    }
}

/// Maps reserved and contextual words to their token kinds.
fn keyword(name: &str) -> Option<TokenKind> {
    let kind = match name {
        "await" => TokenKind::Await,
        "break" => TokenKind::Break,
        "case" => TokenKind::Case,
        "catch" => TokenKind::Catch,
        "class" => TokenKind::Class,
        "const" => TokenKind::Const,
        "continue" => TokenKind::Continue,
        "debugger" => TokenKind::Debugger,
        "default" => TokenKind::Default,
        "delete" => TokenKind::Delete,
        "do" => TokenKind::Do,
        "else" => TokenKind::Else,
        "enum" => TokenKind::Enum,
        "export" => TokenKind::Export,
        "extends" => TokenKind::Extends,
        "false" => TokenKind::False,
        "finally" => TokenKind::Finally,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "if" => TokenKind::If,
        "import" => TokenKind::Import,
        "in" => TokenKind::In,
        "instanceof" => TokenKind::Instanceof,
        "let" => TokenKind::Let,
        "new" => TokenKind::New,
        "null" => TokenKind::Null,
        "return" => TokenKind::Return,
        "static" => TokenKind::Static,
        "super" => TokenKind::Super,
        "switch" => TokenKind::Switch,
        "this" => TokenKind::This,
        "throw" => TokenKind::Throw,
        "true" => TokenKind::True,
        "try" => TokenKind::Try,
        "typeof" => TokenKind::Typeof,
        "var" => TokenKind::Var,
        "void" => TokenKind::Void,
        "while" => TokenKind::While,
        "with" => TokenKind::With,
        "yield" => TokenKind::Yield,
        "async" => TokenKind::Async,
        _ => return None,
    };
    Some(kind)
}

/// Returns the source spelling of a keyword token, used wherever a
/// keyword is allowed as a plain name (`obj.default`, `{ class: 1 }`).
pub fn keyword_text(kind: &TokenKind) -> Option<&'static str> {
    let text = match kind {
        TokenKind::Await => "await",
        TokenKind::Break => "break",
        TokenKind::Case => "case",
        TokenKind::Catch => "catch",
        TokenKind::Class => "class",
        TokenKind::Const => "const",
        TokenKind::Continue => "continue",
        TokenKind::Debugger => "debugger",
        TokenKind::Default => "default",
        TokenKind::Delete => "delete",
        TokenKind::Do => "do",
        TokenKind::Else => "else",
        TokenKind::Enum => "enum",
        TokenKind::Export => "export",
        TokenKind::Extends => "extends",
        TokenKind::False => "false",
        TokenKind::Finally => "finally",
        TokenKind::For => "for",
        TokenKind::Function => "function",
        TokenKind::If => "if",
        TokenKind::Import => "import",
        TokenKind::In => "in",
        TokenKind::Instanceof => "instanceof",
        TokenKind::Let => "let",
        TokenKind::New => "new",
        TokenKind::Null => "null",
        TokenKind::Return => "return",
        TokenKind::Static => "static",
        TokenKind::Super => "super",
        TokenKind::Switch => "switch",
        TokenKind::This => "this",
        TokenKind::Throw => "throw",
        TokenKind::True => "true",
        TokenKind::Try => "try",
        TokenKind::Typeof => "typeof",
        TokenKind::Var => "var",
        TokenKind::Void => "void",
        TokenKind::While => "while",
        TokenKind::With => "with",
        TokenKind::Yield => "yield",
        TokenKind::Async => "async",
        _ => return None,
    };
    Some(text)
}

/// Checks if a character can start an identifier.
pub fn is_id_start(ch: char) -> bool {
    ch == '_' || ch == '$' || unicode_xid::UnicodeXID::is_xid_start(ch)
}

/// Checks if a character can continue an identifier.
pub fn is_id_continue(ch: char) -> bool {
    ch == '_'
        || ch == '$'
        || ch == '\u{200c}'
        || ch == '\u{200d}'
        || unicode_xid::UnicodeXID::is_xid_continue(ch)
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

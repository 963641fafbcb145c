//! Source lexer for Ayla.
//!
//! Turns raw text into a flat token vector. Every token records the line and
//! column of the cursor right after it was consumed, plus whether a line break
//! preceded it; the parser uses the latter to find statement boundaries since
//! the language has no mandatory terminators.

use crate::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: u32,
    column: u32,
    saw_newline: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            column: 1,
            saw_newline: false,
        }
    }

    /// Lex the whole input. The returned vector always ends with `Eof`.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let Some(&(start, ch)) = self.chars.peek() else {
            return self.make(TokenKind::Eof, self.source.len(), self.source.len());
        };

        if is_ident_start(ch) {
            return self.lex_word(start);
        }
        if ch.is_ascii_digit() {
            return self.lex_number(start);
        }
        if ch == '"' {
            return self.lex_string(start);
        }
        self.lex_symbol(start, ch)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
            self.saw_newline = true;
        } else {
            self.column += ch.len_utf16() as u32;
        }
        Some(ch)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(i, _)| i)
            .unwrap_or(self.source.len())
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.bump();
            } else if ch == '/' && self.at_line_comment() {
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn at_line_comment(&mut self) -> bool {
        let rest = self.offset();
        self.source[rest..].starts_with("//")
    }

    fn make(&mut self, kind: TokenKind, start: usize, end: usize) -> Token {
        let token = Token {
            kind,
            literal: self.source[start..end].to_string(),
            line: self.line,
            column: self.column,
            newline_before: self.saw_newline,
        };
        self.saw_newline = false;
        token
    }

    fn lex_word(&mut self, start: usize) -> Token {
        while let Some(c) = self.peek_char() {
            if !is_ident_continue(c) {
                break;
            }
            self.bump();
        }
        let end = self.offset();
        let kind = TokenKind::keyword(&self.source[start..end]).unwrap_or(TokenKind::Ident);
        self.make(kind, start, end)
    }

    fn lex_number(&mut self, start: usize) -> Token {
        let mut is_float = false;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() || c == '_' {
                self.bump();
            } else if c == '.' && !is_float && self.next_is_digit() {
                is_float = true;
                self.bump();
            } else {
                break;
            }
        }
        let end = self.offset();
        let text: String = self.source[start..end].chars().filter(|&c| c != '_').collect();
        let kind = if is_float {
            text.parse::<f64>()
                .map(TokenKind::Float)
                .unwrap_or_else(|_| TokenKind::Illegal(text.clone()))
        } else {
            text.parse::<i64>()
                .map(TokenKind::Int)
                .unwrap_or_else(|_| TokenKind::Illegal(text.clone()))
        };
        self.make(kind, start, end)
    }

    fn peek_in_line(&mut self) -> Option<char> {
        self.peek_char().filter(|&c| c != '\n')
    }

    fn next_is_digit(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        matches!(ahead.peek(), Some(&(_, c)) if c.is_ascii_digit())
    }

    /// The line break ending an unterminated string is left for the next
    /// token, so the error stays on the line of the opening quote.
    fn lex_string(&mut self, start: usize) -> Token {
        self.bump();
        let mut value = String::new();
        loop {
            let Some(c) = self.peek_in_line() else {
                let end = self.offset();
                return self.make(
                    TokenKind::Illegal("unterminated string literal".into()),
                    start,
                    end,
                );
            };
            self.bump();
            match c {
                '"' => break,
                '\\' => {
                    if let Some(escaped) = self.peek_in_line() {
                        self.bump();
                        match escaped {
                            'n' => value.push('\n'),
                            't' => value.push('\t'),
                            '"' => value.push('"'),
                            '\\' => value.push('\\'),
                            other => {
                                value.push('\\');
                                value.push(other);
                            }
                        }
                    }
                }
                c => value.push(c),
            }
        }
        let end = self.offset();
        self.make(TokenKind::Str(value), start, end)
    }

    fn lex_symbol(&mut self, start: usize, ch: char) -> Token {
        self.bump();
        let next = self.peek_char();
        let (kind, extra) = match (ch, next) {
            (':', Some('=')) => (TokenKind::Walrus, true),
            ('=', Some('=')) => (TokenKind::EqEq, true),
            ('!', Some('=')) => (TokenKind::NotEq, true),
            ('<', Some('=')) => (TokenKind::LtEq, true),
            ('>', Some('=')) => (TokenKind::GtEq, true),
            ('&', Some('&')) => (TokenKind::AndAnd, true),
            ('|', Some('|')) => (TokenKind::OrOr, true),
            ('=', _) => (TokenKind::Assign, false),
            ('+', _) => (TokenKind::Plus, false),
            ('-', _) => (TokenKind::Minus, false),
            ('*', _) => (TokenKind::Star, false),
            ('/', _) => (TokenKind::Slash, false),
            ('%', _) => (TokenKind::Percent, false),
            ('!', _) => (TokenKind::Bang, false),
            ('<', _) => (TokenKind::Lt, false),
            ('>', _) => (TokenKind::Gt, false),
            (',', _) => (TokenKind::Comma, false),
            (':', _) => (TokenKind::Colon, false),
            (';', _) => (TokenKind::Semicolon, false),
            ('.', _) => (TokenKind::Dot, false),
            ('(', _) => (TokenKind::LParen, false),
            (')', _) => (TokenKind::RParen, false),
            ('{', _) => (TokenKind::LBrace, false),
            ('}', _) => (TokenKind::RBrace, false),
            ('[', _) => (TokenKind::LBracket, false),
            (']', _) => (TokenKind::RBracket, false),
            (other, _) => (TokenKind::Illegal(format!("unexpected character `{other}`")), false),
        };
        if extra {
            self.bump();
        }
        let end = self.offset();
        self.make(kind, start, end)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convenience wrapper around [`Lexer::tokenize`].
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

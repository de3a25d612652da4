use crate::error::{QuillError, Span};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // Keywords
    Var,
    Print,
    True,
    False,

    // Literals
    Identifier,
    Number,
    String,

    // Single-character tokens
    Equal,
    Plus,
    Minus,
    Multiply,
    Divide,
    Semicolon,

    // Special
    EndOfInput,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    /// Source text of the token; for strings, the text between the quotes.
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}('{}')", self.token_type, self.lexeme)
    }
}

pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    keywords: HashMap<&'static str, TokenType>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("print", TokenType::Print);
        keywords.insert("var", TokenType::Var);
        keywords.insert("true", TokenType::True);
        keywords.insert("false", TokenType::False);

        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            keywords,
        }
    }

    /// Scans the whole source. The result always ends with an `EndOfInput` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, QuillError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenType::EndOfInput,
            String::new(),
            Span::at_end(self.current),
        ));

        Ok(self.tokens)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) -> Result<(), QuillError> {
        let c = self.advance();

        match c {
            '=' => self.add_token(TokenType::Equal),
            '+' => self.add_token(TokenType::Plus),
            '-' => self.add_token(TokenType::Minus),
            '*' => self.add_token(TokenType::Multiply),
            '/' => self.add_token(TokenType::Divide),
            ';' => self.add_token(TokenType::Semicolon),
            ' ' | '\r' | '\t' | '\n' => {}
            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),
            _ => return Err(QuillError::lex_error(c, self.start)),
        }

        Ok(())
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        self.source.get(self.current).copied().unwrap_or('\0')
    }

    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            self.advance();
        }

        let content: String = self.source[self.start + 1..self.current].iter().collect();

        if self.is_at_end() {
            // The literal simply ends with the input.
            warn!(start = self.start, "unterminated string literal runs to end of input");
        } else {
            self.advance();
        }

        self.add_token_with_content(TokenType::String, content);
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        self.add_token(TokenType::Number);
    }

    fn identifier(&mut self) {
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text = self.text();
        let token_type = self
            .keywords
            .get(text.as_str())
            .cloned()
            .unwrap_or(TokenType::Identifier);

        self.add_token_with_content(token_type, text);
    }

    fn text(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn add_token(&mut self, token_type: TokenType) {
        let text = self.text();
        self.add_token_with_content(token_type, text);
    }

    fn add_token_with_content(&mut self, token_type: TokenType, lexeme: String) {
        self.tokens.push(Token::new(
            token_type,
            lexeme,
            Span::new(self.start, self.current),
        ));
    }
}

use crate::ast::{BinaryOp, Node, Program};
use crate::error::{QuillError, Span};
use crate::lexer::{Token, TokenType};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| &token.token_type) != Some(&TokenType::EndOfInput) {
            let end = tokens.last().map_or(0, |token| token.span.end);
            tokens.push(Token::new(TokenType::EndOfInput, String::new(), Span::at_end(end)));
        }

        Self { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> Result<Program, QuillError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.statement()?);
        }

        Ok(Program { statements })
    }

    fn statement(&mut self) -> Result<Node, QuillError> {
        if self.match_types(&[TokenType::Var]) {
            self.var_declaration()
        } else if self.check(&TokenType::Identifier) && self.check_next(&TokenType::Equal) {
            self.assignment()
        } else if self.match_types(&[TokenType::Print]) {
            self.print_statement()
        } else {
            Err(self
                .error_at_current("Unknown statement", "'var', 'print' or an assignment")
                .with_help("Statements start with `var name = ...;`, `name = ...;` or `print ...;`."))
        }
    }

    fn var_declaration(&mut self) -> Result<Node, QuillError> {
        let start = self.previous().span.start;
        let name = self
            .consume(TokenType::Identifier, "Expected variable name after 'var'")?
            .lexeme
            .clone();
        self.consume(TokenType::Equal, "Expected '=' after variable name")?;
        let expr = self.expression()?;
        let end = self
            .consume(TokenType::Semicolon, "Expected ';' after variable declaration")?
            .span
            .end;

        Ok(Node::Assign {
            name,
            expr: Box::new(expr),
            span: Span::new(start, end),
        })
    }

    fn assignment(&mut self) -> Result<Node, QuillError> {
        let name_token = self
            .consume(TokenType::Identifier, "Expected variable name in assignment")?
            .clone();
        self.consume(TokenType::Equal, "Expected '=' after variable name")?;
        let expr = self.expression()?;
        let end = self
            .consume(TokenType::Semicolon, "Expected ';' after assignment")?
            .span
            .end;

        Ok(Node::Assign {
            name: name_token.lexeme,
            expr: Box::new(expr),
            span: Span::new(name_token.span.start, end),
        })
    }

    fn print_statement(&mut self) -> Result<Node, QuillError> {
        let start = self.previous().span.start;
        let expr = self.expression()?;
        let end = self
            .consume(TokenType::Semicolon, "Expected ';' after print value")?
            .span
            .end;

        Ok(Node::Print {
            expr: Box::new(expr),
            span: Span::new(start, end),
        })
    }

    fn expression(&mut self) -> Result<Node, QuillError> {
        let mut expr = self.term()?;

        while self.match_types(&[TokenType::Plus, TokenType::Minus]) {
            let operator = match self.previous().token_type {
                TokenType::Plus => BinaryOp::Add,
                TokenType::Minus => BinaryOp::Subtract,
                _ => unreachable!(),
            };
            let right = self.term()?;
            expr = Self::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Node, QuillError> {
        let mut expr = self.primary()?;

        while self.match_types(&[TokenType::Multiply, TokenType::Divide]) {
            let operator = match self.previous().token_type {
                TokenType::Multiply => BinaryOp::Multiply,
                TokenType::Divide => BinaryOp::Divide,
                _ => unreachable!(),
            };
            let right = self.primary()?;
            expr = Self::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn primary(&mut self) -> Result<Node, QuillError> {
        if self.match_types(&[TokenType::Number]) {
            let token = self.previous();
            let value = token.lexeme.parse::<f64>().map_err(|_| {
                QuillError::parse_error(
                    token.span.clone(),
                    "Invalid number literal",
                    "digits",
                    &token.token_type,
                    &token.lexeme,
                )
            })?;
            return Ok(Node::Number {
                value,
                span: token.span.clone(),
            });
        }

        if self.match_types(&[TokenType::String]) {
            let token = self.previous();
            return Ok(Node::String {
                value: token.lexeme.clone(),
                span: token.span.clone(),
            });
        }

        if self.match_types(&[TokenType::Identifier]) {
            let token = self.previous();
            return Ok(Node::Variable {
                name: token.lexeme.clone(),
                span: token.span.clone(),
            });
        }

        Err(self.error_at_current(
            "Expected number, string, or identifier",
            "number, string, or identifier",
        ))
    }

    fn binary(left: Node, operator: BinaryOp, right: Node) -> Node {
        let span = Span::new(left.span().start, right.span().end);
        Node::BinaryOp {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        }
    }

    fn match_types(&mut self, types: &[TokenType]) -> bool {
        for token_type in types {
            if self.check(token_type) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: &TokenType) -> bool {
        &self.peek().token_type == token_type
    }

    fn check_next(&self, token_type: &TokenType) -> bool {
        self.tokens
            .get(self.current + 1)
            .is_some_and(|token| &token.token_type == token_type)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::EndOfInput
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> Result<&Token, QuillError> {
        if self.check(&token_type) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(message, format!("{}", token_type)))
        }
    }

    fn error_at_current(&self, message: &str, expected: impl Into<String>) -> QuillError {
        let found = self.peek();

        // At end of input, point at the tail of the last real token
        let span = if self.is_at_end() && self.current > 0 {
            Span::at_end(self.tokens[self.current - 1].span.end)
        } else {
            found.span.clone()
        };

        QuillError::parse_error(span, message, expected, &found.token_type, &found.lexeme)
    }
}

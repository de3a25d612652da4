use crate::ast::BinaryOp;
use crate::lexer::TokenType;
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;

/// Character range in the source text, end exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Last character before `end`, so end-of-input labels stay inside the source.
    pub fn at_end(end: usize) -> Self {
        Self {
            start: end.saturating_sub(1),
            end,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    Lex { symbol: char, position: usize },
    Parse { expected: String, found: TokenType },
    UndefinedVariable { name: String },
    InvalidOperation { operator: BinaryOp },
    DivisionByZero,
    NotAnExpression,
    Output,
}

impl ErrorKind {
    fn stage(&self) -> &'static str {
        match self {
            ErrorKind::Lex { .. } => "Lexical Error",
            ErrorKind::Parse { .. } => "Parse Error",
            _ => "Runtime Error",
        }
    }

    fn color(&self) -> Color {
        match self {
            ErrorKind::Lex { .. } => Color::Red,
            ErrorKind::Parse { .. } => Color::Yellow,
            _ => Color::Magenta,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuillError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl QuillError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn lex_error(symbol: char, position: usize) -> Self {
        Self::new(
            ErrorKind::Lex { symbol, position },
            Span::single(position),
            format!("Unexpected character '{}' at position {}", symbol, position),
        )
    }

    pub fn parse_error(span: Span, message: &str, expected: impl Into<String>, found: &TokenType, lexeme: &str) -> Self {
        let found_text = if *found == TokenType::EndOfInput {
            "end of input".to_string()
        } else {
            format!("{} '{}'", found, lexeme)
        };

        Self::new(
            ErrorKind::Parse {
                expected: expected.into(),
                found: found.clone(),
            },
            span,
            format!("{}, found {}", message, found_text),
        )
    }

    pub fn undefined_variable(span: Span, name: &str) -> Self {
        Self::new(
            ErrorKind::UndefinedVariable {
                name: name.to_string(),
            },
            span,
            format!("Undefined variable '{}'", name),
        )
        .with_help("Declare it first, e.g. `var name = value;`")
    }

    pub fn invalid_operation(span: Span, operator: BinaryOp, left: &str, right: &str) -> Self {
        Self::new(
            ErrorKind::InvalidOperation { operator },
            span,
            format!("Invalid operation '{}' for {} and {}", operator, left, right),
        )
    }

    pub fn division_by_zero(span: Span) -> Self {
        Self::new(ErrorKind::DivisionByZero, span, "Division by zero".to_string())
    }

    pub fn not_an_expression(span: Span) -> Self {
        Self::new(
            ErrorKind::NotAnExpression,
            span,
            "Statement used where an expression was expected".to_string(),
        )
    }

    pub fn output_error(span: Span, error: std::io::Error) -> Self {
        Self::new(
            ErrorKind::Output,
            span,
            format!("Failed to write program output: {}", error),
        )
    }

    /// Renders a labelled diagnostic for this error to stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");
        let color = self.kind.color();

        let mut report_builder = Report::build(ReportKind::Error, filename, self.span.start)
            .with_message(format!("{}: {}", self.kind.stage().fg(color), self.message))
            .with_label(
                Label::new((filename, self.span.start..self.span.end))
                    .with_message(&self.message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder = report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        if let Err(error) = report_builder
            .finish()
            .eprint((filename, Source::from(source)))
        {
            eprintln!("{}: {} ({})", self.kind.stage(), self.message, error);
        }
    }
}

impl fmt::Display for QuillError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for QuillError {}

// Quill Language Interpreter Library
//
// Core of the quill interpreter: a lexer, a recursive-descent parser and a
// tree-walking evaluator for a tiny language of variables, numeric and
// string literals, arithmetic and print.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{BinaryOp, Node, Program};
pub use error::{ErrorKind, QuillError, Span};
pub use evaluator::{Environment, Evaluator};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::Parser;
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{run, run_with_output, RunOptions};

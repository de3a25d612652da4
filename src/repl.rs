use crate::error::QuillError;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Interactive loop on a fresh evaluator.
pub fn start() {
    start_with(Evaluator::new());
}

/// Interactive loop; bindings already in `evaluator` and those made here
/// persist across lines until exit.
pub fn start_with(mut evaluator: Evaluator) {
    println!("Quill Interpreter v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print!("> ");
        if let Err(error) = io::stdout().flush() {
            warn!(%error, "failed to flush prompt");
        }

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    println!("Goodbye!");
                    break;
                }

                if let Err(error) = run_line(line, &mut evaluator) {
                    error.report(line, None);
                }
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}

/// Runs one line as a complete program against a long-lived evaluator.
pub fn run_line<W: Write>(source: &str, evaluator: &mut Evaluator<W>) -> Result<(), QuillError> {
    let tokens = Lexer::new(source).tokenize()?;
    let program = Parser::new(tokens).parse()?;
    debug!(statements = program.statements.len(), "parsed repl line");
    evaluator.interpret(&program.statements)
}

use crate::error::{QuillError, Span};
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::io::{self, Write};
use tracing::debug;

/// Which intermediate stages to dump before running.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub dump_tokens: bool,
    pub dump_ast: bool,
}

/// Runs a whole program against stdout, reporting any error as a diagnostic.
pub fn run(source: &str, filename: Option<&str>, options: &RunOptions) -> Result<(), QuillError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run_with_output(source, options, &mut out).inspect_err(|error| {
        // Flush program output so it precedes the diagnostic
        let _ = out.flush();
        error.report(source, filename);
    })
}

/// Lexes, parses and interprets `source` with a fresh evaluator writing to `out`.
pub fn run_with_output<W: Write>(source: &str, options: &RunOptions, out: &mut W) -> Result<(), QuillError> {
    let tokens = Lexer::new(source).tokenize()?;
    debug!(tokens = tokens.len(), "lexed source");

    if options.dump_tokens {
        write_section(out, "--- Tokens ---", tokens.iter())?;
    }

    let program = Parser::new(tokens).parse()?;
    debug!(statements = program.statements.len(), "parsed program");

    if options.dump_ast {
        write_section(out, "--- AST ---", program.statements.iter())?;
    }

    if options.dump_tokens || options.dump_ast {
        writeln!(out, "--- Output ---").map_err(|error| QuillError::output_error(Span::single(0), error))?;
    }

    let mut evaluator = Evaluator::with_output(out);
    evaluator.interpret(&program.statements)?;
    debug!(bindings = evaluator.environment().len(), "program finished");

    Ok(())
}

fn write_section<W: Write, T: std::fmt::Display>(
    out: &mut W,
    header: &str,
    items: impl Iterator<Item = T>,
) -> Result<(), QuillError> {
    let write = |out: &mut W| -> io::Result<()> {
        writeln!(out, "{}", header)?;
        for item in items {
            writeln!(out, "{}", item)?;
        }
        Ok(())
    };

    write(out).map_err(|error| QuillError::output_error(Span::single(0), error))
}

use clap::{Arg, ArgAction, Command};
use quill::{repl, runner, Evaluator, RunOptions};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{info, Level};

fn main() -> ExitCode {
    let matches = Command::new("quill")
        .about("A tiny interpreter for variables, arithmetic and print")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start the REPL, after running FILE if one is given")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the token stream before running")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print the parsed statements before running")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let options = RunOptions {
        dump_tokens: matches.get_flag("tokens"),
        dump_ast: matches.get_flag("ast"),
    };

    let file = matches.get_one::<String>("file");

    if matches.get_flag("interactive") {
        let mut evaluator = Evaluator::new();
        if let Some(file_path) = file {
            let Some(source) = read_source(Path::new(file_path)) else {
                return ExitCode::FAILURE;
            };
            // Errors are reported and the session starts with whatever was bound
            if let Err(error) = repl::run_line(&source, &mut evaluator) {
                error.report(&source, Some(file_path));
            }
        }
        repl::start_with(evaluator);
        ExitCode::SUCCESS
    } else if let Some(file_path) = file {
        run_file(file_path, &options)
    } else {
        repl::start();
        ExitCode::SUCCESS
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(source) => {
            info!(file = %path.display(), bytes = source.len(), "loaded script");
            Some(source)
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            None
        }
    }
}

fn run_file(path: &str, options: &RunOptions) -> ExitCode {
    let path = Path::new(path);
    let Some(source) = read_source(path) else {
        return ExitCode::FAILURE;
    };

    let filename = path.to_string_lossy();
    match runner::run(&source, Some(&*filename), options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

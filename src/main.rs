mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod parser;
mod value;

use clap::Parser;
use config::{PROMPT, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use env::Environment;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Lispy: a small Lisp-like REPL and script runner
#[derive(Parser, Debug)]
#[command(name = "lispy")]
#[command(version = config::VERSION)]
#[command(about = "A small Lisp-like REPL, built along the lines of Build Your Own Lisp")]
struct CliArgs {
    /// Script file to execute (optional; starts the REPL if omitted)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Override the history file location
    #[arg(long = "history-file", value_name = "PATH")]
    history_file: Option<PathBuf>,

    /// Suppress the startup banner
    #[arg(short = 'q', long = "quiet", alias = "no-banner")]
    no_banner: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lispy=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn default_history_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".lispy_history"))
        .unwrap_or_else(|| PathBuf::from(".lispy_history"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = CliArgs::parse();

    let root = Environment::new_root();
    builtins::register_all(&root);

    if let Some(script_path) = args.script {
        return run_script(&script_path, &root);
    }

    run_repl(&root, args.history_file, args.no_banner)
}

/// Runs the interactive REPL (spec 6.2): reads one line at a time,
/// parses it as zero or more top-level expressions, evaluates each in
/// turn, and prints each result on its own line.
fn run_repl(
    root: &Rc<Environment>,
    history_file: Option<PathBuf>,
    no_banner: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let history_path = history_file.unwrap_or_else(default_history_path);

    let config = Config::builder().auto_add_history(true).build();
    let mut rl = DefaultEditor::with_config(config)?;
    let _ = rl.load_history(&history_path);

    if !no_banner {
        println!("{WELCOME_MESSAGE}");
        println!("{WELCOME_SUBTITLE}");
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if matches!(line.trim(), "(quit)" | "(exit)") {
                    break;
                }
                run_line(root, &line);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                tracing::error!(%err, "readline failed");
                break;
            }
        }
    }

    let _ = rl.save_history(&history_path);
    Ok(())
}

/// Prints one evaluated result the way spec 7 requires: an `Error` value
/// surfaces as a single line prefixed `Error:`; anything else prints via
/// its normal `Display` form.
fn print_result(value: &value::Value) {
    match value {
        value::Value::Error(msg) => println!("Error: {msg}"),
        other => println!("{other}"),
    }
}

/// Parses and evaluates one line, printing each top-level result (spec
/// 6.2: multiple top-level expressions on a line each print separately).
#[tracing::instrument(skip(root))]
fn run_line(root: &Rc<Environment>, line: &str) {
    match parser::parse_program(line) {
        Ok(exprs) => {
            for expr in exprs {
                let result = eval::eval(root, expr);
                tracing::debug!(%result, "evaluated");
                print_result(&result);
            }
        }
        Err(e) => eprintln!("Parse error: {e}"),
    }
}

/// Executes a script file start to finish, printing each top-level
/// expression's result the same way the REPL does.
fn run_script(path: &PathBuf, root: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {e}", path.display()))?;

    let exprs = parser::parse_program(&contents)
        .map_err(|e| format!("parse error in {}: {e}", path.display()))?;

    for expr in exprs {
        print_result(&eval::eval(root, expr));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_args_default_to_repl_mode() {
        let args = CliArgs {
            script: None,
            history_file: None,
            no_banner: false,
        };
        assert!(args.script.is_none());
    }

    #[test]
    fn cli_args_accept_a_script_path() {
        let args = CliArgs {
            script: Some(PathBuf::from("examples/factorial.lispy")),
            history_file: None,
            no_banner: true,
        };
        assert_eq!(args.script, Some(PathBuf::from("examples/factorial.lispy")));
        assert!(args.no_banner);
    }

    #[test]
    fn default_history_path_has_the_expected_filename() {
        let path = default_history_path();
        assert_eq!(path.file_name().unwrap(), ".lispy_history");
    }
}

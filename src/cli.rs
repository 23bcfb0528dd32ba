use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::interpreter::parser::semantic_validator::Validator;
use crate::interpreter::{
    execute, parse_program_with, validate_program, ParseError, ParseOptions, Program,
};

#[derive(Parser)]
#[command(name = "enquanto")]
#[command(about = "Enquanto - interpreter for the While teaching language", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Build `ou` and `xor` as `e`, like older releases of the language
    #[arg(long, global = true)]
    pub legacy_logic: bool,

    /// Skip the semantic validator before `run`
    #[arg(long, global = true)]
    pub no_validate: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and execute programs against stdin/stdout
    Run {
        /// Program files, executed in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the final variable store as JSON to stderr
        #[arg(long)]
        dump_store: bool,
    },

    /// Parse and validate programs without executing them
    Check {
        #[arg(required_unless_present = "rules")]
        files: Vec<PathBuf>,

        /// List the validator rules before checking
        #[arg(long)]
        rules: bool,
    },

    /// Print the parsed program as JSON
    Ast {
        file: PathBuf,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Exit status when a program has syntax errors
pub const EXIT_SYNTAX_ERROR: i32 = 1;
/// Exit status when a program faults at runtime
pub const EXIT_RUNTIME_ERROR: i32 = 2;

/// Parse process arguments and run the selected command
///
/// Returns the process exit status. Errors are reserved for problems outside
/// the programs themselves (unreadable files, bad configuration).
pub fn run_cli() -> Result<i32> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run CLI with custom arguments (first element is the program name)
pub fn run_cli_from_args(args: Vec<String>) -> Result<i32> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli)
}

/// Internal function that handles CLI commands
fn run_cli_with_args(cli: Cli) -> Result<i32> {
    let mut builder = Config::builder().config_path(cli.config.as_ref().map(PathBuf::from));
    if cli.legacy_logic {
        builder = builder.legacy_logic_wiring(true);
    }
    if cli.no_validate {
        builder = builder.validate(false);
    }
    let config = builder.build()?;

    init_tracing(&config.logging.filter);
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Run { files, dump_store } => run_files(&config, &files, dump_store),
        Commands::Check { files, rules } => {
            if rules {
                list_rules();
            }
            check_files(&config, &files)
        }
        Commands::Ast { file, pretty } => print_ast(&config, &file, pretty),
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // A subscriber may already be installed when embedded or under test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/* ===================== Commands ===================== */

fn run_files(config: &Config, files: &[PathBuf], dump_store: bool) -> Result<i32> {
    let options = config.parse_options();
    let mut stdin = io::stdin().lock();

    for path in files {
        let source = read_source(path)?;
        let program = match parse_file(path, &source, &options) {
            Some(program) => program,
            None => return Ok(EXIT_SYNTAX_ERROR),
        };

        if config.interpreter.validate {
            for diagnostic in validate_program(&program, &source) {
                warn!(
                    file = %path.display(),
                    line = diagnostic.line(),
                    column = diagnostic.column(),
                    rule = diagnostic.rule_id,
                    severity = %diagnostic.severity,
                    "{}",
                    diagnostic.message
                );
            }
        }

        debug!(file = %path.display(), "running");
        match execute(&program, &mut stdin, io::stdout().lock()) {
            Ok(store) => {
                if dump_store {
                    let json = serde_json::to_string(&store).context("Failed to serialize store")?;
                    eprintln!("{}", json);
                }
            }
            Err(err) => {
                eprintln!(
                    "{}: runtime error: {:#}",
                    path.display(),
                    anyhow::Error::new(err)
                );
                return Ok(EXIT_RUNTIME_ERROR);
            }
        }
    }

    Ok(0)
}

fn check_files(config: &Config, files: &[PathBuf]) -> Result<i32> {
    let options = config.parse_options();
    let mut status = 0;

    for path in files {
        let source = read_source(path)?;
        let program = match parse_file(path, &source, &options) {
            Some(program) => program,
            None => {
                status = EXIT_SYNTAX_ERROR;
                continue;
            }
        };

        for diagnostic in validate_program(&program, &source) {
            println!(
                "{}:{}:{}: {}: {} [{}]",
                path.display(),
                diagnostic.line(),
                diagnostic.column(),
                diagnostic.severity,
                diagnostic.message,
                diagnostic.rule_id
            );
        }
    }

    Ok(status)
}

fn print_ast(config: &Config, path: &Path, pretty: bool) -> Result<i32> {
    let source = read_source(path)?;
    let program = match parse_file(path, &source, &config.parse_options()) {
        Some(program) => program,
        None => return Ok(EXIT_SYNTAX_ERROR),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&program)
    } else {
        serde_json::to_string(&program)
    }
    .context("Failed to serialize program")?;
    println!("{}", json);

    Ok(0)
}

fn list_rules() {
    for (id, description) in Validator::new().rules() {
        println!("{}: {}", id, description);
    }
}

/* ===================== Helpers ===================== */

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse a file, reporting syntax errors to stderr
fn parse_file(path: &Path, source: &str, options: &ParseOptions) -> Option<Program> {
    match parse_program_with(source, options) {
        Ok(program) => Some(program),
        Err(err) => {
            report_syntax_errors(path, &err);
            None
        }
    }
}

fn report_syntax_errors(path: &Path, err: &ParseError) {
    for error in &err.errors {
        eprintln!("{}:{}: error: {}", path.display(), error.line, error.token);
        debug!(column = error.column, kind = %error.kind, "syntax error detail");
    }
}

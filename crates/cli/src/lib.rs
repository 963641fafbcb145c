mod check;
mod query;

pub use check::{check_file, render_diagnostics};
pub use query::{definition_at, hover_at, render_definition, render_hover};

use ayla_core::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "ayla",
    version,
    about = "Language server and analysis tools for the Ayla language",
    long_about = "Ayla analyses source files to answer editor queries: hover, \
                  go-to-definition and diagnostics. Run `ayla lsp` from an editor, or use the \
                  one-shot subcommands from a terminal."
)]
pub struct Cli {
    /// Directory for log files (defaults to $AYLA_LOG_DIR or ~/.ayla/logs)
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Also print logs to stderr (ignored by `lsp`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Language Server Protocol (LSP) server on stdio
    Lsp,
    /// Report syntax errors and conflicting declarations in a file
    Check {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show hover information at a one-based line and column
    Hover {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        line: u32,
        column: u32,
        #[arg(long)]
        json: bool,
    },
    /// Show where the symbol at a one-based line and column is declared
    Definition {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        line: u32,
        column: u32,
        #[arg(long)]
        json: bool,
    },
}

pub fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Lsp => "lsp",
        _ => "cli",
    };
    let mut config = Config::from_env().with_stderr(cli.verbose && component != "lsp");
    if let Some(dir) = &cli.log_dir {
        config = config.with_log_dir(dir);
    }
    let _guard = ayla_core::logging::init_logging(component, &config);

    match cli.command {
        Commands::Lsp => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(ayla_lsp::run_server())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { path, json } => {
            let diagnostics = check_file(&path)?;
            println!("{}", render_diagnostics(&path, &diagnostics, json)?);
            if diagnostics.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Hover {
            path,
            line,
            column,
            json,
        } => {
            let info = hover_at(&path, line, column)?;
            println!("{}", render_hover(info.as_ref(), json)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Definition {
            path,
            line,
            column,
            json,
        } => {
            let range = definition_at(&path, line, column)?;
            println!("{}", render_definition(&path, range, json)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

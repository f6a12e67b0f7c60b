mod config;
mod convert;
mod sections_cmd;
mod source;
mod terminal_output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use config::RuntimeConfig;
use convert::ConvertOptions;
use terminal_output::{note_error, print_summary};

#[derive(Parser)]
#[command(name = "benchforge")]
#[command(about = "Convert CIS benchmark documents into review workbooks")]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a benchmark document into an .xlsx workbook
    Convert {
        /// Input document (.pdf, or text with form-feed page breaks)
        #[arg(short, long)]
        input: PathBuf,
        /// Output workbook (default: <input stem>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// First page holding recommendations, 1-based (default: 10)
        #[arg(long, alias = "start_page")]
        start_page: Option<usize>,
        /// Document family for section names (detected from the file name if omitted)
        #[arg(long, value_name = "FAMILY")]
        os_type: Option<String>,
        /// Section catalog file (.json, .yaml or .toml)
        #[arg(long)]
        sections: Option<PathBuf>,
        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the section map for a document family
    Sections {
        /// Family name (default: "default")
        family: Option<String>,
        /// Section catalog file (.json, .yaml or .toml)
        #[arg(long)]
        sections: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = RuntimeConfig::from_env();

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    if let Err(err) = logging::init_logger(config.log_dir.as_deref(), level) {
        note_error(&format!("{err:#}"));
    }

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "Run failed");
            note_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &RuntimeConfig) -> Result<()> {
    match command {
        Commands::Convert {
            input,
            output,
            start_page,
            os_type,
            sections,
            json,
        } => {
            let summary = convert::run(ConvertOptions {
                input,
                output,
                start_page: start_page.unwrap_or(config.start_page),
                family: os_type,
                sections,
            })
            .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
        Commands::Sections {
            family,
            sections,
            json,
        } => {
            sections_cmd::run(family.as_deref(), sections.as_deref(), json).await?;
        }
    }
    Ok(())
}

use clap::{Args, Parser, Subcommand};
use langsheet::cli::{self, ConfigOverrides};
use langsheet::error::LangResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "langsheet")]
#[command(about = "Export localization sheets from a workbook into per-language JSON files.")]
#[command(long_about = "langsheet - Workbook → per-language JSON dictionaries

Each configured sheet holds a header row followed by rows of
  id | en | zh
and becomes <output>/<bundle>/language/json/{en,zh}.json, where <bundle>
is the sheet name up to the first '-' (loading-language → loading).

COMMANDS:
  export  - Write the JSON dictionaries (default)
  check   - Report duplicate ids and empty translations
  sheets  - List workbook sheets and their bundles

CONFIG:
  Read from langsheet.yaml when present, otherwise:
    workbook: ./config.xlsx
    output_root: ../assets
    sheets: [loading-language]

EXAMPLES:
  langsheet                                  # Export with defaults
  langsheet export -s game1-language -v
  langsheet check -c tools/langsheet.yaml")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Clone)]
struct SourceArgs {
    /// Config file (default: langsheet.yaml if present)
    #[arg(short, long, global = true, env = "LANGSHEET_CONFIG")]
    config: Option<PathBuf>,

    /// Workbook to read, overriding the config
    #[arg(short, long, global = true)]
    workbook: Option<PathBuf>,

    /// Directory holding the bundle directories, overriding the config
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Sheet to process (repeatable), replacing the configured list
    #[arg(short, long = "sheet", global = true)]
    sheets: Vec<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl SourceArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config: self.config.clone(),
            workbook: self.workbook.clone(),
            output_root: self.output.clone(),
            sheets: self.sheets.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Export every configured sheet to JSON dictionaries
    Export {
        /// Preview without writing files
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Report duplicate ids and empty translations without writing
    Check,

    /// List the workbook's sheets and the bundle each maps to
    Sheets,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "langsheet=info" } else { "langsheet=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> LangResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.source.verbose);

    let overrides = cli.source.overrides();
    let verbose = cli.source.verbose;

    match cli.command.unwrap_or(Commands::Export { dry_run: false }) {
        Commands::Export { dry_run } => cli::export(overrides, dry_run, verbose),
        Commands::Check => cli::check(overrides, verbose),
        Commands::Sheets => cli::sheets(overrides),
    }
}

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use passbook_core::{Transaction, sort_chronologically};
use passbook_finance::Summary;
use passbook_ingest::adapters;
use std::io::{stderr, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

mod config;
mod output;
mod state;
mod statements;

use config::{Config, OutputFormat};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PASSBOOK_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "passbook", version = VERSION, about = "Bank statement CSV ingestion")]
struct Cli {
    /// Config file (default: ~/.passbook/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// error, warn, info, debug or trace (overrides config)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse statements and print the normalized transactions
    Parse {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Bank code; detected from the header when omitted
        #[arg(long)]
        bank: Option<String>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Order by date instead of file order
        #[arg(long)]
        sort: bool,
    },

    /// Income, expense and per-category totals across statements
    Summary {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long)]
        bank: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Show the category a transaction description would get
    Categorize {
        text: String,
    },

    /// List supported bank layouts
    Banks,

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    setup_logging(parse_log_level(level));

    match cli.command {
        Command::Parse {
            files,
            bank,
            format,
            sort,
        } => {
            let format = format.unwrap_or(cfg.format);
            let mut txns = load_transactions(&cfg, &files, bank).await?;
            if sort {
                sort_chronologically(&mut txns);
            }
            output::write_transactions(stdout().lock(), &txns, format)?;
        }

        Command::Summary { files, bank, json } => {
            let txns = load_transactions(&cfg, &files, bank).await?;
            let summary = Summary::from_transactions(&txns);
            output::write_summary(stdout().lock(), &summary, json)?;
        }

        Command::Categorize { text } => {
            let text = text.trim();
            if text.is_empty() {
                bail!("nothing to categorize");
            }
            println!("{}", cfg.rules().categorize(text));
        }

        Command::Banks => {
            for a in adapters::all() {
                println!("{:<8} {:<12} dates {}", a.code, a.name, a.date_layout.describe());
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let path = config::config_path(cli.config.as_deref())?;
                println!("# {}", path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

async fn load_transactions(
    cfg: &Config,
    files: &[PathBuf],
    bank: Option<String>,
) -> Result<Vec<Transaction>> {
    let bank = bank.or_else(|| cfg.default_bank.clone());

    let parsed = statements::parse_files(
        files,
        bank.as_deref(),
        cfg.rules(),
        Duration::from_secs(cfg.parse_timeout_secs),
    )
    .await?;

    let mut txns = Vec::new();
    for file in parsed {
        if !file.report.skipped.is_empty() {
            info!(
                path = %file.path.display(),
                skipped = file.report.skipped.len(),
                "some rows were not transactions"
            );
        }
        txns.extend(file.report.transactions);
    }
    Ok(txns)
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'warn'", level);
            LevelFilter::WARN
        }
    }
}

fn setup_logging(level: LevelFilter) {
    // stdout carries the data; logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}

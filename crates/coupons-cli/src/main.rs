// Rust guideline compliant 2026-10-18

//! Coupons CLI Application
//!
//! Command-line interface for the Coupons discount-code tracker.

use chrono::NaiveDate;
use clap::Parser;
use coupons_app::{AppError, ErrorCode, ErrorEnvelope};
use coupons_cli::commands;
use coupons_cli::commands::add::AddArgs;
use coupons_cli::commands::edit::EditArgs;
use coupons_cli::logging::init_logging;
use coupons_cli::{create_formatter, should_use_color, OutputFormatter, Session};
use coupons_core::OutputFormat as Format;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "cpn",
    version,
    about = "Coupons: track discount codes until they are used or expire",
    long_about = "Coupons keeps a per-user list of discount codes and receipt images, moves codes past their expiry date to expired, and warns about codes that expire soon.",
    after_help = "Examples:\n  cpn init\n  cpn add Zara --expires 2026-05-01 --code SPRING10 --min-amount 50\n  cpn add IKEA --expires 2026-06-30 --image receipt.jpg\n  cpn list --status active --store za\n  cpn use dc-1a2b3c\n  cpn restore 1a2b3c\n  cpn edit 1a2b3c --clear-conditions --remove-image\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Owner whose codes are used (defaults to config, then $USER)
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Log level: error, warn, info or debug
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Table,
    Plain,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Table => Format::Table,
            OutputFormat::Plain => Format::Plain,
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize a new Coupons repository
    Init,

    /// Record a new discount code
    Add(AddArgs),

    /// List discount codes
    List {
        /// Filter by status (all, active, used, expired)
        #[arg(long)]
        status: Option<String>,

        /// Filter by store name (case-insensitive substring)
        #[arg(long)]
        store: Option<String>,
    },

    /// Show details of a discount code
    Show {
        /// Code ID (full or partial)
        id: String,
    },

    /// Mark a discount code as used
    Use {
        /// Code ID (full or partial)
        id: String,
    },

    /// Restore a used discount code
    Restore {
        /// Code ID (full or partial)
        id: String,
    },

    /// Edit a discount code
    Edit(EditArgs),

    /// Delete a discount code and its receipt image
    Delete {
        /// Code ID (full or partial)
        id: String,
    },

    /// Show counts and known stores
    Stats,
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    coupons_app::parse_date(value).map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match init_logging(&cli.log_level, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let session = Session::new(cli.owner.clone(), cli.today);
    let format = match cli.format {
        Some(format) => format.into(),
        None if cli.json => Format::Json,
        None => session.configured_format().unwrap_or_default(),
    };
    let use_color = !cli.no_color && should_use_color();
    let formatter = create_formatter(format, use_color);

    match run(cli.command, &session, format, formatter.as_ref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            if format == Format::Json {
                let envelope = error_envelope(err);
                match serde_json::to_string_pretty(&envelope) {
                    Ok(json) => println!("{}", json),
                    Err(_) => eprintln!("{}", formatter.format_error(&envelope.message)),
                }
            } else {
                eprintln!("{}", formatter.format_error(&err.to_string()));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(
    command: Option<Commands>,
    session: &Session,
    format: Format,
    formatter: &dyn OutputFormatter,
) -> anyhow::Result<()> {
    match command {
        Some(Commands::Init) => commands::init::execute(),
        Some(Commands::Add(args)) => commands::add::execute(session, args, formatter),
        Some(Commands::List { status, store }) => {
            commands::list::execute(session, status, store, format == Format::Table, formatter)
        }
        Some(Commands::Show { id }) => commands::show::execute(session, id, formatter),
        Some(Commands::Use { id }) => commands::mark_used::execute(session, id, formatter),
        Some(Commands::Restore { id }) => commands::restore::execute(session, id, formatter),
        Some(Commands::Edit(args)) => commands::edit::execute(session, args, formatter),
        Some(Commands::Delete { id }) => commands::delete::execute(session, id, formatter),
        Some(Commands::Stats) => commands::stats::execute(session, formatter),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

/// Maps a command failure to the JSON error envelope.
fn error_envelope(err: anyhow::Error) -> ErrorEnvelope {
    let err = match err.downcast::<AppError>() {
        Ok(app) => return ErrorEnvelope::from_error(&app),
        Err(err) => err,
    };
    match err.downcast::<coupons_core::Error>() {
        Ok(core) => ErrorEnvelope::from_error(&AppError::from(core)),
        Err(err) => ErrorEnvelope {
            code: ErrorCode::InvalidInput,
            message: err.to_string(),
            details: None,
        },
    }
}

//! Tally report generator.
//!
//! Runs Profit & Loss, Balance Sheet and Trial Balance reports against a
//! SQLite ledger, printing rows to stdout and optionally exporting CSV.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tally_core::export::write_rows;
use tally_reporting::{
    AccountType, DateInput, ExportOptions, ExportTarget, ProfitAndLossSummary, ReportRow,
    generate_balance_sheet, generate_profit_and_loss, generate_trial_balance,
};
use tally_shared::AppConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reporter")]
#[command(about = "Financial reports from a Tally ledger")]
#[command(version)]
struct Cli {
    /// Ledger database (overrides `ledger.path`)
    #[arg(long, global = true, value_name = "PATH")]
    ledger: Option<PathBuf>,

    /// Directory exports are written to (overrides `export.dir`)
    #[arg(long, global = true, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Round amounts to N decimal places
    #[arg(long, global = true, value_name = "N")]
    places: Option<u32>,

    /// Render zero amounts as empty cells
    #[arg(long, global = true)]
    zero_as_blank: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Profit & Loss over a period
    Pl {
        /// First day of the period (inclusive)
        #[arg(long, value_name = "DATE")]
        start: Option<String>,

        /// Last day of the period (inclusive)
        #[arg(long, value_name = "DATE")]
        end: Option<String>,

        /// Also write pl.csv to the output directory
        #[arg(long)]
        export: bool,
    },

    /// Balance Sheet as of a date
    Bs {
        /// Cut-off date (inclusive)
        #[arg(long, value_name = "DATE")]
        as_of: Option<String>,

        /// Also write bs.csv to the output directory
        #[arg(long)]
        export: bool,
    },

    /// Trial Balance over a period
    Tb {
        /// First day of the period (inclusive)
        #[arg(long, value_name = "DATE")]
        start: Option<String>,

        /// Last day of the period (inclusive)
        #[arg(long, value_name = "DATE")]
        end: Option<String>,

        /// Account categories to include (repeatable; default all)
        #[arg(long = "type", value_name = "TYPE")]
        types: Vec<AccountType>,

        /// Also write tb.csv to the output directory
        #[arg(long)]
        export: bool,
    },

    /// Profit & Loss totals as JSON
    Summary {
        /// First day of the period (inclusive)
        #[arg(long, value_name = "DATE")]
        start: Option<String>,

        /// Last day of the period (inclusive)
        #[arg(long, value_name = "DATE")]
        end: Option<String>,
    },
}

/// Effective settings after applying command-line overrides to the config.
struct Settings {
    ledger: PathBuf,
    out_dir: PathBuf,
    options: ExportOptions,
}

impl Settings {
    fn resolve(config: AppConfig, cli: &Cli) -> Self {
        let mut options = ExportOptions::from(&config.export);
        if cli.places.is_some() {
            options.decimal_places = cli.places;
        }
        options.zero_as_blank |= cli.zero_as_blank;

        Self {
            ledger: cli.ledger.clone().unwrap_or(config.ledger.path),
            out_dir: cli.out_dir.clone().unwrap_or(config.export.dir),
            options,
        }
    }

    fn target(&self, export: bool, file_name: &str) -> Option<ExportTarget> {
        export.then(|| ExportTarget::new(self.out_dir.join(file_name), self.options))
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    let settings = Settings::resolve(config, &cli);
    info!(ledger = %settings.ledger.display(), "Using ledger");

    match cli.command {
        Command::Pl { start, end, export } => {
            let target = settings.target(export, "pl.csv");
            let rows = generate_profit_and_loss(
                &settings.ledger,
                date(start).as_ref(),
                date(end).as_ref(),
                target.as_ref(),
            )?;
            print_rows(&rows, settings.options)?;
        }
        Command::Bs { as_of, export } => {
            let target = settings.target(export, "bs.csv");
            let rows =
                generate_balance_sheet(&settings.ledger, date(as_of).as_ref(), target.as_ref())?;
            print_rows(&rows, settings.options)?;
        }
        Command::Tb {
            start,
            end,
            types,
            export,
        } => {
            let target = settings.target(export, "tb.csv");
            let selected = (!types.is_empty()).then_some(types.as_slice());
            let rows = generate_trial_balance(
                &settings.ledger,
                date(start).as_ref(),
                date(end).as_ref(),
                selected,
                target.as_ref(),
            )?;
            print_rows(&rows, settings.options)?;
        }
        Command::Summary { start, end } => {
            let rows = generate_profit_and_loss(
                &settings.ledger,
                date(start).as_ref(),
                date(end).as_ref(),
                None,
            )?;
            let summary = ProfitAndLossSummary::from_rows(&rows);
            serde_json::to_writer_pretty(io::stdout().lock(), &summary)?;
            println!();
        }
    }

    Ok(())
}

fn date(value: Option<String>) -> Option<DateInput> {
    value.map(DateInput::from)
}

fn print_rows(rows: &[ReportRow], options: ExportOptions) -> anyhow::Result<()> {
    write_rows(io::stdout().lock(), rows, options)?;
    Ok(())
}

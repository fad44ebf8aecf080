use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};

use weightlog_core::cli::render_report;
use weightlog_core::metrics::metrics;
use weightlog_core::{
    export_csv_file, import_csv_file, load_profile, summarize, Profile, SlashDateOrder,
    SummaryReport,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Weight log statistics CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Print Prometheus counters to stderr on exit
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    metrics: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a CSV export: period changes, forecast, BMI, distribution
    Report(ReportArgs),
    /// Re-write a CSV import as canonical `Date,Weight (kg)` rows
    Export(ExportArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DateOrderArg {
    Auto,
    Mdy,
    Dmy,
}

impl From<DateOrderArg> for SlashDateOrder {
    fn from(a: DateOrderArg) -> Self {
        match a {
            DateOrderArg::Auto => SlashDateOrder::Auto,
            DateOrderArg::Mdy => SlashDateOrder::MonthFirst,
            DateOrderArg::Dmy => SlashDateOrder::DayFirst,
        }
    }
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// CSV file with date and weight columns
    input: PathBuf,

    /// Profile JSON (height, goal, windows); missing file means defaults
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Goal weight in kg
    #[arg(long)]
    goal: Option<f64>,

    /// Height in cm, enables BMI
    #[arg(long)]
    height: Option<f64>,

    /// Start weight in kg (defaults to the oldest entry)
    #[arg(long)]
    start: Option<f64>,

    /// How to read a/b/YYYY dates
    #[arg(long, value_enum)]
    date_order: Option<DateOrderArg>,

    /// Drop zero-count bins from the distribution
    #[arg(long, action = ArgAction::SetTrue)]
    omit_empty_bins: bool,

    /// Emit JSON instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// CSV file to normalize
    input: PathBuf,

    /// Destination CSV
    #[arg(short, long)]
    output: PathBuf,

    #[arg(long, value_enum, default_value = "auto")]
    date_order: DateOrderArg,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    let result = match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Export(args) => handle_export(args),
    };

    if cli.metrics {
        let text = metrics().gather_text().context("failed to render metrics")?;
        eprint!("{text}");
    }
    result
}

fn build_profile(args: &ReportArgs) -> Result<Profile> {
    let mut profile = match &args.profile {
        Some(path) => load_profile(path)
            .with_context(|| format!("failed to load profile {}", path.display()))?,
        None => Profile::default(),
    };
    if let Some(goal) = args.goal {
        if !(goal.is_finite() && goal > 0.0) {
            bail!("--goal must be a positive weight, got {goal}");
        }
        profile.goal_weight = Some(goal);
    }
    if args.height.is_some() {
        profile.height_cm = args.height;
    }
    if args.start.is_some() {
        profile.start_weight = args.start;
    }
    if let Some(order) = args.date_order {
        profile.date_order = order.into();
    }
    if args.omit_empty_bins {
        profile.include_empty_bins = false;
    }
    Ok(profile)
}

fn handle_report(args: ReportArgs) -> Result<()> {
    let profile = build_profile(&args)?;
    let import = import_csv_file(&args.input, profile.date_order)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    if import.skipped_count > 0 {
        warn!("{} rows skipped in {}", import.skipped_count, args.input.display());
    }
    if import.ambiguous_count > 0 {
        warn!(
            "{} dates could be read as M/D/Y or D/M/Y; pass --date-order to pin it",
            import.ambiguous_count
        );
    }

    let summary = summarize(&import.samples, &profile)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let report = SummaryReport {
            summary,
            skipped_count: import.skipped_count,
            ambiguous_count: import.ambiguous_count,
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render_report(&summary))?;
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<()> {
    let import = import_csv_file(&args.input, args.date_order.into())
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    export_csv_file(&args.output, &import.samples)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(
        "{} entries written, {} rows skipped",
        import.samples.len(),
        import.skipped_count
    );
    Ok(())
}

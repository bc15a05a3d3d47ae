//! nestegg CLI - Retirement Planning Workbook Generator
//!
//! Command-line interface for generating, previewing, and scaffolding plans.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nestegg_core::config::load_plan;
use nestegg_core::{Plan, Projection};
use nestegg_render::{WorkbookGenerator, DEFAULT_OUTPUT};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod preview;

/// Plan file written by `nestegg init` when no path is given
const DEFAULT_PLAN_FILE: &str = "nestegg.toml";

#[derive(Parser)]
#[command(name = "nestegg")]
#[command(author, version, about = "Retirement planning workbook generator", long_about = None)]
struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the retirement workbook
    Generate {
        #[command(flatten)]
        plan: PlanArgs,

        /// Output file path
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Currency symbol for money formats
        #[arg(long, default_value = "$")]
        currency: String,

        /// Leave the balance chart off the Summary sheet
        #[arg(long)]
        no_chart: bool,
    },

    /// Print the projection without writing a workbook
    Preview {
        #[command(flatten)]
        plan: PlanArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = PreviewFormat::Text)]
        format: PreviewFormat,
    },

    /// Write a plan file with the default assumptions
    Init {
        /// Plan file path
        #[arg(short, long, default_value = DEFAULT_PLAN_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Plan source and per-field overrides shared by `generate` and `preview`
#[derive(Args)]
struct PlanArgs {
    /// Plan file (TOML); built-in defaults when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of projected years
    #[arg(long, value_name = "N")]
    years: Option<u32>,

    /// Preselected scenario name
    #[arg(long, value_name = "NAME")]
    scenario: Option<String>,

    /// First projected year (defaults to the current year)
    #[arg(long, value_name = "YEAR")]
    start_year: Option<i32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PreviewFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            plan,
            output,
            currency,
            no_chart,
        } => cmd_generate(&plan, &output, currency, no_chart),
        Commands::Preview { plan, format } => cmd_preview(&plan, format),
        Commands::Init { output, force } => cmd_init(&output, force),
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

impl PlanArgs {
    /// Load the plan file (if any) and apply command-line overrides
    fn resolve(&self) -> Result<Plan> {
        let mut plan = match &self.config {
            Some(path) => load_plan(path)
                .with_context(|| format!("Failed to load plan: {}", path.display()))?,
            None => Plan::default(),
        };

        if let Some(years) = self.years {
            plan = plan.with_horizon(years);
        }
        if let Some(name) = &self.scenario {
            plan = plan.with_scenario(name.clone());
        }
        if let Some(year) = self.start_year {
            plan = plan.with_start_year(year);
        }

        plan.validate().context("Invalid plan")?;
        debug!(
            years = plan.horizon_years,
            scenario = %plan.assumptions.selected_scenario,
            "plan resolved"
        );
        Ok(plan)
    }
}

fn cmd_generate(args: &PlanArgs, output: &Path, currency: String, no_chart: bool) -> Result<()> {
    let plan = args.resolve()?;

    let mut generator = WorkbookGenerator::new().currency(currency);
    if no_chart {
        generator = generator.no_chart();
    }

    generator
        .write_to_path(&plan, output)
        .with_context(|| format!("Failed to write workbook: {}", output.display()))?;

    println!("Created: {}", output.display());
    Ok(())
}

fn cmd_preview(args: &PlanArgs, format: PreviewFormat) -> Result<()> {
    let plan = args.resolve()?;
    let projection = Projection::simulate(&plan).context("Failed to run projection")?;

    match format {
        PreviewFormat::Text => print!("{}", preview::render_text(&plan, &projection)),
        PreviewFormat::Json => {
            let json = serde_json::to_string_pretty(&projection)
                .context("Failed to serialize projection")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn cmd_init(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let text = Plan::default()
        .to_toml_string()
        .context("Failed to serialize default plan")?;
    std::fs::write(output, text)
        .with_context(|| format!("Failed to write plan: {}", output.display()))?;

    info!(path = %output.display(), "plan file written");
    println!("Created: {}", output.display());
    Ok(())
}

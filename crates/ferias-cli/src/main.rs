//! ferias CLI - Vacation Schedule Dashboard
//!
//! Command-line interface for validating vacation spreadsheets, rendering
//! the timeline chart and serving the interactive dashboard.

mod config;
mod server;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use config::{FileConfig, Settings, DEFAULT_BIND};
use ferias_core::{FilterInputs, FilterOptions, Renderer, Selection, SortKey};
use ferias_render::{build_timeline, HtmlDashboardRenderer, SvgRenderer, TextRenderer};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ferias")]
#[command(author, version, about = "Vacation schedule dashboard", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./ferias.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Vacation spreadsheet
    #[arg(long, value_name = "FILE", env = "FERIAS_DATA")]
    data: Option<PathBuf>,

    /// Worksheet name (default: first sheet)
    #[arg(long)]
    sheet: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a vacation spreadsheet
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Render the vacation timeline
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// Only this employee
        #[arg(long)]
        employee: Option<String>,

        /// Only this department
        #[arg(long)]
        department: Option<String>,

        /// Window start (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        from: Option<NaiveDate>,

        /// Window end (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        to: Option<NaiveDate>,

        /// Y-axis order (start, name, department)
        #[arg(long, default_value = "start")]
        sort: SortKey,

        /// Reference date for the default window (default: today)
        #[arg(long, value_name = "DATE")]
        as_of: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "svg")]
        format: OutputFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the interactive dashboard over HTTP
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Listen address (default: 127.0.0.1:8501)
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,

        /// Reference date for the default window (default: today)
        #[arg(long, value_name = "DATE")]
        as_of: Option<NaiveDate>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Html,
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file_config = FileConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Check { source } => {
            let settings = Settings::resolve(&file_config, source.data, source.sheet);
            cmd_check(&settings)
        }
        Commands::Render {
            source,
            employee,
            department,
            from,
            to,
            sort,
            as_of,
            format,
            output,
        } => {
            let settings = Settings::resolve(&file_config, source.data, source.sheet);
            let inputs = FilterInputs {
                employee: Selection::from_input(employee.as_deref()),
                department: Selection::from_input(department.as_deref()),
                start: from,
                end: to,
                sort,
            };
            cmd_render(&settings, &inputs, as_of, format, output)
        }
        Commands::Serve {
            source,
            bind,
            as_of,
        } => {
            let settings = Settings::resolve(&file_config, source.data, source.sheet);
            let bind = match bind.or(file_config.bind) {
                Some(addr) => addr,
                None => DEFAULT_BIND.parse()?,
            };
            cmd_serve(settings, bind, as_of)
        }
    }
}

/// `-v` raises the default level; `RUST_LOG` wins when set
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

fn today(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn load(settings: &Settings) -> Result<ferias_core::Roster> {
    settings
        .load()
        .with_context(|| format!("failed to load {}", settings.data.display()))
}

fn cmd_check(settings: &Settings) -> Result<()> {
    let roster = load(settings)?;
    let options = FilterOptions::from_roster(&roster);

    println!(
        "{}: {} registros, {} colaboradores, {} áreas",
        settings.data.display(),
        roster.len(),
        options.employees.len(),
        options.departments.len()
    );
    println!("Período: {}", roster.bounds());
    Ok(())
}

fn cmd_render(
    settings: &Settings,
    inputs: &FilterInputs,
    as_of: Option<NaiveDate>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let roster = load(settings)?;
    let criteria = inputs.resolve(&roster, today(as_of))?;
    let view = criteria.apply(roster.records());
    info!(
        selected = view.len(),
        total = roster.len(),
        range = %criteria.range,
        sort = %criteria.sort,
        "filtered records"
    );

    let timeline = build_timeline(&view, criteria.range, &settings.palette);
    let rendered = match format {
        OutputFormat::Svg => SvgRenderer::new().render(&timeline)?,
        OutputFormat::Html => HtmlDashboardRenderer::new()
            .title(settings.title.clone())
            .render(&timeline)?,
        OutputFormat::Text => TextRenderer.render(&timeline)?,
        OutputFormat::Json => serde_json::to_string_pretty(&timeline)?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn cmd_serve(settings: Settings, bind: SocketAddr, as_of: Option<NaiveDate>) -> Result<()> {
    // The sheet must load at startup; later failures only affect one request
    let roster = load(&settings)?;
    info!(
        records = roster.len(),
        path = %settings.data.display(),
        "loaded vacation sheet"
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    runtime.block_on(server::serve(server::AppState::new(settings, as_of), bind))
}

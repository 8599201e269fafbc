//! Nasdaq-100 dashboard CLI binary.
//!
//! Browse constituents by sector, export the filtered list and chart
//! year-to-date closing prices.

mod display;

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use ndx::dashboard::{DEFAULT_FETCH_LIMIT, MAX_CHART_COUNT};
use ndx::{Dashboard, DashboardState, GicsSector, distinct_sectors, resolve_sectors, sector_counts};
use ndx_data::wikipedia::{DEFAULT_URL, LoaderConfig, WikipediaConstituentSource};
use ndx_data::yahoo::YahooPriceProvider;
use ndx_output::{DownloadLink, ExportFormat};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type AppDashboard = Dashboard<WikipediaConstituentSource, YahooPriceProvider>;

#[derive(Parser)]
#[command(name = "ndx")]
#[command(about = "Nasdaq-100 dashboard: constituents by sector, CSV export, YTD charts", long_about = None)]
#[command(version)]
struct Cli {
    /// Page holding the constituent table
    #[arg(long, global = true, default_value = DEFAULT_URL)]
    url: String,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sectors of the index with company counts
    Sectors,

    /// Show the constituent table
    List {
        /// Restrict to a sector (repeatable; default: all sectors)
        #[arg(long = "sector", value_name = "SECTOR")]
        sectors: Vec<String>,
    },

    /// Export the constituent table
    Export {
        /// Restrict to a sector (repeatable; default: all sectors)
        #[arg(long = "sector", value_name = "SECTOR")]
        sectors: Vec<String>,

        /// Output file (default: Nasdaq-100.csv in the download directory)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Print an HTML download link instead of writing a file
        #[arg(long)]
        link: bool,
    },

    /// Fetch year-to-date prices and write line charts
    Charts {
        /// Restrict to a sector (repeatable; default: all sectors)
        #[arg(long = "sector", value_name = "SECTOR")]
        sectors: Vec<String>,

        /// Number of companies to chart
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=10))]
        count: u8,

        /// Directory for the SVG files (default: ndx-charts in the download directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// About this tool and its data sources
    About,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
    PrettyJson,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::PrettyJson => Self::PrettyJson,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::About = cli.command {
        print_about();
        return Ok(());
    }

    let source = WikipediaConstituentSource::with_config(LoaderConfig::with_url(&cli.url))?;
    let mut dashboard = Dashboard::new(source, YahooPriceProvider::new()?);

    match cli.command {
        Commands::Sectors => list_sectors(&mut dashboard).await?,
        Commands::List { sectors } => list_constituents(&mut dashboard, &sectors).await?,
        Commands::Export {
            sectors,
            output,
            format,
            link,
        } => export(&mut dashboard, &sectors, output, format.into(), link).await?,
        Commands::Charts {
            sectors,
            count,
            out_dir,
        } => charts(&mut dashboard, &sectors, count, out_dir).await?,
        Commands::About => {}
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initial state with the sector flags applied.
///
/// No flags keeps every sector selected. Flags are matched against the
/// sectors of the loaded table.
async fn state_for(
    dashboard: &mut AppDashboard,
    sectors: &[String],
) -> Result<DashboardState, Box<dyn std::error::Error>> {
    let state = DashboardState::default();
    if sectors.is_empty() {
        return Ok(state);
    }

    let table = dashboard.table().await?;
    let selected = resolve_sectors(sectors, &distinct_sectors(table))?;
    debug!(?selected, "resolved sector flags");
    Ok(state.select_sectors(selected))
}

async fn list_sectors(dashboard: &mut AppDashboard) -> Result<(), Box<dyn std::error::Error>> {
    let table = dashboard.table().await?;
    let counts = sector_counts(table);

    println!("\n{}\n", display::banner("NASDAQ-100 SECTORS"));
    println!("{}", display::sector_counts(&counts));

    let unknown: Vec<&str> = counts
        .keys()
        .filter(|s| GicsSector::from_label(s).is_none())
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        println!("\nNot a GICS sector label: {}", unknown.join(", "));
    }

    Ok(())
}

async fn list_constituents(
    dashboard: &mut AppDashboard,
    sectors: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let state = state_for(dashboard, sectors).await?;
    let view = dashboard.render(&state).await?;

    println!("\n{}\n", display::banner("NASDAQ-100 CONSTITUENTS"));
    if !sectors.is_empty() {
        let selected: Vec<&str> = view.selected.iter().map(String::as_str).collect();
        println!("Sectors: {}\n", selected.join(", "));
    }
    println!("{}", display::table(&view.table));
    println!("\n{}", view.shape);

    Ok(())
}

async fn export(
    dashboard: &mut AppDashboard,
    sectors: &[String],
    output: Option<PathBuf>,
    format: ExportFormat,
    link: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = state_for(dashboard, sectors).await?;
    let view = dashboard.render(&state).await?;

    let download = match format {
        ExportFormat::Csv => view.download,
        other => DownloadLink::new(&view.table, other)?,
    };

    if link {
        println!("{}", download.to_html_anchor());
        return Ok(());
    }

    let path = match output {
        Some(path) => {
            std::fs::write(&path, &download.payload)?;
            path
        }
        None => {
            let dir = default_dir();
            std::fs::create_dir_all(&dir)?;
            download.save(&dir)?
        }
    };

    println!("Wrote {} to {}", view.shape, path.display());
    Ok(())
}

async fn charts(
    dashboard: &mut AppDashboard,
    sectors: &[String],
    count: u8,
    out_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = state_for(dashboard, sectors)
        .await?
        .with_chart_count(count)
        .request_charts();

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Fetching year-to-date prices...");

    let view = match dashboard.render(&state).await {
        Ok(view) => {
            pb.finish_with_message(format!(
                "Fetched {} tickers, rendered {} chart(s)",
                view.fetched_tickers.len(),
                view.charts.len()
            ));
            view
        }
        Err(e) => {
            pb.finish_with_message("Failed!");
            return Err(e.into());
        }
    };

    if view.charts.is_empty() {
        println!("No companies in the selected sectors.");
        return Ok(());
    }

    let dir = out_dir.unwrap_or_else(|| default_dir().join("ndx-charts"));
    std::fs::create_dir_all(&dir)?;
    for chart in &view.charts {
        let path = chart.save(&dir)?;
        println!("  {:<28} {}", chart.title, path.display());
    }

    Ok(())
}

fn default_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| Path::new(".").to_path_buf())
}

fn print_about() {
    println!("\n{}\n", display::banner("NASDAQ-100 DASHBOARD"));
    println!("Browse the companies of the Nasdaq-100 index by GICS sector, export the");
    println!("filtered list as Nasdaq-100.csv and chart year-to-date closing prices.\n");
    println!("Data sources:");
    println!("  Constituents: {DEFAULT_URL}");
    println!("  Prices:       Yahoo Finance, daily closes, year to date\n");
    println!("Limits:");
    println!("  Prices are fetched for the first {DEFAULT_FETCH_LIMIT} companies of the table.");
    println!("  Up to {MAX_CHART_COUNT} of them can be charted.");
}

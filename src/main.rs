//! CLI entry point for the FARS toolkit.
//!
//! Provides subcommands for naming, loading, summarizing, and mapping yearly
//! accident census files.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use fars::output::{render_text, to_json, write_csv, write_csv_to};
use fars::render::SvgMapRenderer;
use fars::{FarsData, MapOutcome, filename_for, read};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "fars")]
#[command(about = "Summarize and map FARS traffic-fatality census files", long_about = None)]
struct Cli {
    /// Directory holding accident_<year>.csv.bz2 files
    #[arg(short, long, global = true, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the census file name for a year
    Filename {
        #[arg(value_name = "YEAR")]
        year: String,
    },
    /// Load a single census file and report its size
    Read {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Load several years, skipping the ones that cannot be read
    ReadYears {
        #[arg(value_name = "YEAR", required = true)]
        years: Vec<String>,
    },
    /// Count accidents per month for each year
    Summarize {
        #[arg(value_name = "YEAR", required = true)]
        years: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Plot one state's accidents for a year as an SVG map
    MapState {
        /// Numeric STATE code
        #[arg(short, long)]
        state: String,

        #[arg(short, long)]
        year: String,

        /// SVG file to write (default: state_<STATE>_<YEAR>.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/fars.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("fars.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let data = FarsData::new(&cli.data_dir);

    match cli.command {
        Commands::Filename { year } => {
            println!("{}", filename_for(&year)?);
        }
        Commands::Read { file } => {
            let table = read(&file)?;
            info!(
                file = %file.display(),
                rows = table.len(),
                states = table.states().len(),
                "Census file read"
            );
        }
        Commands::ReadYears { years } => {
            for (year, slot) in years.iter().zip(data.read_years(&years)) {
                match slot {
                    Some(table) => info!(year = %year, rows = table.len(), "Loaded"),
                    None => info!(year = %year, "Skipped"),
                }
            }
        }
        Commands::Summarize {
            years,
            format,
            output,
        } => {
            let summary = data.summarize_years(&years)?;

            match (format, output) {
                (Format::Csv, Some(path)) => {
                    write_csv(&path, &summary)?;
                    info!(path = %path.display(), "Summary written");
                }
                (Format::Csv, None) => write_csv_to(std::io::stdout().lock(), &summary)?,
                (format, output) => {
                    let body = match format {
                        Format::Json => to_json(&summary)?,
                        _ => render_text(&summary),
                    };
                    match output {
                        Some(path) => {
                            std::fs::write(&path, body)?;
                            info!(path = %path.display(), "Summary written");
                        }
                        None => print!("{body}"),
                    }
                }
            }
        }
        Commands::MapState {
            state,
            year,
            output,
        } => {
            let path =
                output.unwrap_or_else(|| PathBuf::from(format!("state_{state}_{year}.svg")));
            let renderer = SvgMapRenderer::new(path);

            match data.map_state(&state, &year, &renderer)? {
                MapOutcome::Plotted(plot) => info!(
                    path = %renderer.path().display(),
                    points = plot.points().count(),
                    "State map rendered"
                ),
                MapOutcome::NothingToPlot => {
                    info!(state = %state, year = %year, "Nothing to plot")
                }
            }
        }
    }

    Ok(())
}

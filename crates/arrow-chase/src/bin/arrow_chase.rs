//! `arrow-chase INPUT OUTPUT PATH_FILE`: trace the arrow chain in `INPUT`,
//! write the highlighted image to `OUTPUT` and the path rectangles to
//! `PATH_FILE`.

use std::path::PathBuf;
use std::process::ExitCode;

use arrow_chase::core::parse_level;
use arrow_chase::{io, render, ArrowChaser, ChaseError, ChaseParams};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

#[derive(Parser, Debug)]
#[command(name = "arrow-chase", version)]
#[command(about = "Follow a chain of arrows in an image to its destination region")]
struct Cli {
    /// Image with the arrow map.
    input: PathBuf,
    /// Where to write the input with the traversed rays highlighted.
    output: PathBuf,
    /// Where to write the path rectangles, one `x y w h` per line.
    path_file: PathBuf,
    /// JSON file overriding any subset of the detection parameters.
    #[arg(long, value_name = "JSON")]
    params: Option<PathBuf>,
    /// Write a JSON report of regions, hops and the stop reason.
    #[arg(long, value_name = "JSON")]
    report: Option<PathBuf>,
    /// Write a false-color rendering of the segmentation.
    #[arg(long, value_name = "IMAGE")]
    labels_out: Option<PathBuf>,
    /// off, error, warn, info, debug or trace.
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Emit tracing events as JSON lines.
    #[cfg(feature = "tracing")]
    #[arg(long)]
    json_log: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Chase(#[from] ChaseError),
    #[error("unknown log level `{0}`")]
    LogLevel(String),
    #[cfg(not(feature = "tracing"))]
    #[error("failed to install logger: {0}")]
    Logger(String),
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let level = parse_level(&cli.log_level).ok_or_else(|| CliError::LogLevel(cli.log_level.clone()))?;

    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init();
        arrow_chase::core::init_tracing(level, cli.json_log);
        log::set_max_level(level);
    }
    #[cfg(not(feature = "tracing"))]
    arrow_chase::core::init_with_level(level).map_err(|e| CliError::Logger(e.to_string()))?;

    Ok(())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    init_logging(cli)?;

    let params = match &cli.params {
        Some(path) => ChaseParams::from_json_file(path)?,
        None => ChaseParams::default(),
    };
    let img = io::load_color_image(&cli.input)?;
    let chaser = ArrowChaser::new(params);
    log::debug!("parameters: {:?}", chaser.params());
    let result = chaser.run(&img);
    if result.report.termination.is_destination() {
        log::info!("{}", result.report.termination);
    } else {
        log::warn!("{}", result.report.termination);
    }

    io::save_color_image(&result.image, &cli.output)?;
    io::write_rects(&cli.path_file, &result.path)?;

    if let Some(path) = &cli.report {
        let json = result.report.to_json_pretty()?;
        std::fs::write(path, json).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
    }
    if let Some(path) = &cli.labels_out {
        let debug = render::render_segmentation(&result.labels, &result.regions);
        io::save_color_image(&debug, path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            println!("{}", Cli::command().render_usage());
            return ExitCode::SUCCESS;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

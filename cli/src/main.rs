mod script;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use pixel_canvas::config::{CanvasConfig, ConfigError};
use pixel_canvas::consts::{DEFAULT_CELL_SIZE, DEFAULT_HEIGHT, DEFAULT_WIDTH, EXPORT_FILE_NAME};
use pixel_canvas::engine::EngineCore;
use pixel_canvas::raster::ExportError;
use tracing_subscriber::EnvFilter;

use crate::script::Script;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read script {path}: {source}")]
    ReadScript { path: String, source: io::Error },
    #[error("invalid script: {0}")]
    InvalidScript(#[from] serde_json::Error),
    #[error("invalid canvas size: {0}")]
    Config(#[from] ConfigError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("failed to write {path}: {source}")]
    WriteOutput { path: String, source: io::Error },
}

#[derive(Parser, Debug)]
#[command(name = "pixelcanvas", about = "Headless pixel canvas: replay input scripts and export PNGs")]
struct Cli {
    /// Artwork width in logical pixels.
    #[arg(long, env = "PIXELCANVAS_WIDTH", default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Artwork height in logical pixels.
    #[arg(long, env = "PIXELCANVAS_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Side of one grid cell in logical pixels.
    #[arg(long, env = "PIXELCANVAS_CELL_SIZE", default_value_t = DEFAULT_CELL_SIZE)]
    cell_size: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a JSON event script to the engine and export the result.
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long, default_value = "-", help = "Script file path, or - for stdin")]
    input: String,

    #[arg(long, default_value = EXPORT_FILE_NAME)]
    out: PathBuf,

    /// Print a `data:image/png;base64,...` URL to stdout instead of writing a file.
    #[arg(long, default_value_t = false)]
    data_url: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = CanvasConfig::new(cli.width, cli.height, cli.cell_size)?;
    match cli.command {
        Command::Replay(args) => run_replay(config, &args),
    }
}

fn run_replay(config: CanvasConfig, args: &ReplayArgs) -> Result<(), CliError> {
    let raw = read_input(&args.input)?;
    let script: Script = serde_json::from_str(&raw)?;

    let mut core = EngineCore::new(config);
    let report = script::replay(&mut core, &script);
    tracing::info!(
        events = report.events,
        rejected = report.rejected,
        painted = core.buffer().len(),
        "replay complete"
    );

    if args.data_url {
        let url = core.export_data_url()?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{url}").map_err(|source| CliError::WriteOutput { path: "-".into(), source })?;
        return Ok(());
    }

    let png = core.export_png()?;
    fs::write(&args.out, &png)
        .map_err(|source| CliError::WriteOutput { path: args.out.display().to_string(), source })?;
    tracing::info!(path = %args.out.display(), bytes = png.len(), "png written");
    Ok(())
}

fn read_input(path: &str) -> Result<String, CliError> {
    let read_err = |source| CliError::ReadScript { path: path.to_string(), source };
    if path == "-" {
        let mut raw = String::new();
        io::stdin().lock().read_to_string(&mut raw).map_err(read_err)?;
        return Ok(raw);
    }
    fs::read_to_string(path).map_err(read_err)
}

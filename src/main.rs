mod script;


use std::fs::File;
use std::io::{self, BufRead, BufReader};

use bunnies::config::{RotationUnit, SceneConfig};
use bunnies::controller::{Controller, SceneSnapshot};
use bunnies::error::ControlError;
use bunnies::surface::SceneSurface;
use clap::{Parser, Subcommand};

use crate::script::ScriptError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Control(#[from] ControlError),
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("line {line}: {source}")]
    Script { line: usize, source: ScriptError },
    #[error("line {line}: event rejected: {source}")]
    Rejected { line: usize, source: ControlError },
    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stage geometry defaults come from `BUNNIES_*` environment variables;
/// flags given here take precedence.
#[derive(Parser, Debug)]
#[command(name = "bunnyboard", about = "Headless driver for the bunny stage")]
struct Cli {
    /// Stage width in CSS pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Stage height in CSS pixels.
    #[arg(long)]
    height: Option<f64>,

    /// Grid cell size in CSS pixels.
    #[arg(long)]
    item_size: Option<f64>,

    /// Offset of the first cell from the top-left corner.
    #[arg(long)]
    margin: Option<f64>,

    /// `radians` or `degrees`.
    #[arg(long)]
    rotation_unit: Option<String>,

    /// Print the snapshot on one line.
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount the stage and print its initial snapshot.
    Show,
    /// Replay a script of control events and print the final snapshot.
    Replay {
        /// Script file, or `-` for stdin.
        #[arg(long, default_value = "-")]
        input: String,

        /// Stop at the first rejected event instead of logging and moving on.
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = scene_config(&cli)?;

    let mut controller = Controller::new(SceneSurface::new(config.surface_width, config.surface_height), &config);
    controller.mount()?;

    match &cli.command {
        Command::Show => {}
        Command::Replay { input, strict } => replay(&mut controller, input, *strict)?,
    }

    print_snapshot(&controller.snapshot(), cli.compact)
}

fn scene_config(cli: &Cli) -> Result<SceneConfig, CliError> {
    let mut config = SceneConfig::from_env()?;
    if let Some(width) = cli.width {
        config.surface_width = width;
    }
    if let Some(height) = cli.height {
        config.surface_height = height;
    }
    if let Some(item_size) = cli.item_size {
        config.item_size = item_size;
    }
    if let Some(margin) = cli.margin {
        config.margin = margin;
    }
    if let Some(unit) = &cli.rotation_unit {
        config.rotation_unit = RotationUnit::parse(unit)?;
    }
    config.validate()?;
    Ok(config)
}

fn replay(controller: &mut Controller<SceneSurface>, input: &str, strict: bool) -> Result<(), CliError> {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(input).map_err(|source| CliError::Io { path: input.to_owned(), source })?;
        Box::new(BufReader::new(file))
    };

    let tally = apply_script(controller, reader, input, strict)?;
    tracing::info!(
        applied = tally.applied,
        rejected = tally.rejected,
        bunnies = controller.registry().count(),
        "replay complete"
    );
    Ok(())
}

/// Events applied and rejected during one replay.
#[derive(Debug, Default, PartialEq, Eq)]
struct ReplayTally {
    applied: usize,
    rejected: usize,
}

fn apply_script(
    controller: &mut Controller<SceneSurface>,
    reader: impl BufRead,
    path: &str,
    strict: bool,
) -> Result<ReplayTally, CliError> {
    let mut tally = ReplayTally::default();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| CliError::Io { path: path.to_owned(), source })?;
        let Some(event) = script::parse_line(&line).map_err(|source| CliError::Script { line: line_no, source })?
        else {
            continue;
        };

        match controller.handle(event) {
            Ok(actions) => {
                tally.applied += 1;
                tracing::debug!(line = line_no, actions = actions.len(), "event applied");
            }
            Err(source) if strict => return Err(CliError::Rejected { line: line_no, source }),
            Err(error) => {
                tally.rejected += 1;
                tracing::warn!(line = line_no, %error, "event rejected");
            }
        }
    }
    Ok(tally)
}

fn print_snapshot(snapshot: &SceneSnapshot, compact: bool) -> Result<(), CliError> {
    let json = if compact { serde_json::to_string(snapshot)? } else { serde_json::to_string_pretty(snapshot)? };
    println!("{json}");
    Ok(())
}

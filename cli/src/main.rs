//! probsets - partition probability-set diagrams from scene files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use probsets_core::{PartitionCell, SceneSpec};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "probsets")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Partition the scene's events and print the cells as JSON
    Partition {
        /// Scene file (.json or .toml)
        scene: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List the scene's events with their declared areas
    Events {
        /// Scene file (.json or .toml)
        scene: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Partition { scene, pretty } => {
            let mut space = load_scene(&scene)?.build().context("building scene")?;
            let partition = space.partition().context("partitioning events")?;
            info!(cells = partition.len(), "partition ready");

            let cells: Vec<&PartitionCell> = partition.cells().collect();
            let json = if pretty {
                serde_json::to_string_pretty(&cells)?
            } else {
                serde_json::to_string(&cells)?
            };
            println!("{}", json);
        }
        Command::Events { scene } => {
            let space = load_scene(&scene)?.build().context("building scene")?;
            for event in space.events() {
                println!("{}\t{:.6}", event.name(), event.area());
            }
        }
    }
    Ok(())
}

/// Read a scene, as TOML when the extension says so and JSON otherwise.
fn load_scene(path: &Path) -> Result<SceneSpec> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        parse_toml(&text).with_context(|| format!("parsing {}", path.display()))
    } else {
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

fn parse_toml(text: &str) -> Result<SceneSpec> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_scene() {
        let scene = parse_toml(
            r#"
            name = "dice"

            [config]
            allow_default_shapes = true

            [[events]]
            name = "Low"
            shape = { kind = "box" }

            [[events]]
            name = "Odd"
            shape = { kind = "ellipse", loc = [0.6, 0.5], width = 0.2, height = 0.3, angle = 30.0 }
            style = { fill_color = "green", alpha = 0.3 }

            [[texts]]
            name = "caption"
            loc = [0.1, 0.1]
            text = "two events"
            "#,
        )
        .unwrap();

        assert_eq!(scene.events.len(), 2);
        let mut space = scene.build().unwrap();
        assert!((space.event_area("Low").unwrap() - 0.25).abs() < 1e-12);
        assert!(space.partition().unwrap().len() >= 3);
    }

    #[test]
    fn test_cli_parses_verbosity() {
        let cli = Cli::parse_from(["probsets", "-vv", "partition", "scene.json", "--pretty"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Partition { pretty: true, .. }));
    }
}

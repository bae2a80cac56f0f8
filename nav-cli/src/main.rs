use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, bail};
use nav_core::{BumpState, LineCenter};
use tracing::info;

mod config;
mod output;
mod sweep;

use output::{BumpOutput, CenterOutput, ClassifyOutput, ConvertOutput, PositionOutput, report};

const DEFAULT_LOG_FILTER: &str = "nav_cli=info";

#[derive(Debug, Parser)]
#[command(author, version, about = "Evaluate the maze robot's decision layer")]
struct Cli {
    /// TOML file with thresholds and calibration. Defaults to
    /// `<config dir>/maze-nav/nav.toml` when that file exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert a raw infrared code to millimetres.
    Convert {
        #[arg(allow_negative_numbers = true)]
        raw: i32,
    },
    /// Classify left, center and right distances (mm).
    Classify {
        #[arg(allow_negative_numbers = true)]
        left: i32,
        #[arg(allow_negative_numbers = true)]
        center: i32,
        #[arg(allow_negative_numbers = true)]
        right: i32,
    },
    /// Weighted line position of a reflectance mask (decimal, 0x.. or 0b..).
    Position {
        #[arg(value_parser = parse_byte)]
        mask: u8,
    },
    /// Status of the two middle line sensors.
    Center {
        #[arg(value_parser = parse_byte)]
        mask: u8,
    },
    /// Decode a raw bump switch port byte.
    Bump {
        #[arg(value_parser = parse_byte)]
        port: u8,
    },
    /// Classify every in-band distance triple and check the normal tier
    /// matches exactly one condition each time.
    Sweep {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        step: u16,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert { raw } => {
            let distance = config.calibration.convert(raw);
            report(
                &ConvertOutput {
                    raw,
                    distance,
                    in_range: config.thresholds.in_range(distance),
                },
                cli.json,
            )?;
        }
        Commands::Classify {
            left,
            center,
            right,
        } => {
            let scenario = config.thresholds.classify(left, center, right);
            report(
                &ClassifyOutput {
                    left,
                    center,
                    right,
                    scenario,
                    code: scenario.into(),
                    tier: scenario.tier(),
                },
                cli.json,
            )?;
        }
        Commands::Position { mask } => {
            report(
                &PositionOutput {
                    mask,
                    position: config.line.position(mask),
                    active: mask.count_ones(),
                },
                cli.json,
            )?;
        }
        Commands::Center { mask } => {
            report(
                &CenterOutput {
                    mask,
                    center: LineCenter::from_mask(mask),
                },
                cli.json,
            )?;
        }
        Commands::Bump { port } => {
            let state = BumpState::from_port(port);
            report(
                &BumpOutput {
                    port,
                    bits: state.bits(),
                    pressed: (0..nav_core::bump::SWITCH_COUNT)
                        .filter(|&switch| state.is_pressed(switch))
                        .collect(),
                    left_side: state.left_side(),
                    right_side: state.right_side(),
                },
                cli.json,
            )?;
        }
        Commands::Sweep { step } => {
            let sweep = sweep::run(&config.thresholds, usize::from(step));
            report(&sweep, cli.json)?;
            if !sweep.is_clean() {
                bail!(
                    "normal tier is not disjoint: {} overlapping and {} unmatched triples",
                    sweep.overlaps,
                    sweep.fallbacks
                );
            }
            info!(triples = sweep.triples, "normal tier conditions are disjoint");
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let s = s.trim();
    let digits = s.replace('_', "");
    let hex = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"));
    let bin = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"));
    let parsed = if let Some(hex) = hex {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = bin {
        u8::from_str_radix(bin, 2)
    } else {
        digits.parse()
    };
    parsed.map_err(|e| format!("invalid byte `{s}`: {e}"))
}

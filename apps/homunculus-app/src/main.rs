//! Homunculus inspection CLI.
//!
//! Provides four modes of operation:
//! - `anchors`: Print the world anchors of every joint chain
//! - `coverage`: Classify every collision shape of a configuration
//! - `skin`: Print taxel counts and zeroed taxels of the canned skin vectors
//! - `info`: Print workspace crate versions

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use homunculus_calib::{CalibrationError, Chain};
use homunculus_core::config::RobotConfig;
use homunculus_core::error::ConfigError;
use homunculus_core::types::SubSpace;
use homunculus_kin::{ArmKinematics, JointLayout, KinematicsError};
use homunculus_skin::{SkinActivationVectors, SkinPatch, classifier_for_parts};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Humanoid actuation and tactile-sensing shell.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the world anchors of every chain.
    Anchors {
        /// Robot configuration file.
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Classify every collision shape of the configured skeleton.
    Coverage {
        /// Robot configuration file.
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Print taxel counts and zeroed indices of the canned skin vectors.
    Skin,

    /// Print crate information.
    Info,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error(transparent)]
    Kinematics(#[from] KinematicsError),

    #[error("{0} shape(s) outside head and legs are unclassified")]
    Uncovered(usize),
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn load_layout(config: &RobotConfig) -> Result<JointLayout, AppError> {
    let calibration = homunculus_calib::load(&config.calibration)?;
    Ok(JointLayout::assemble(&calibration, &ArmKinematics::default())?)
}

fn run_anchors(path: &Path) -> Result<(), AppError> {
    let config = RobotConfig::from_file(path)?;
    let layout = load_layout(&config)?;
    let elevation = config.parts.elevation_offset();
    info!(path = %path.display(), elevation, "deriving anchors");

    for chain in Chain::ALL {
        println!("{}:", chain.name());
        for (i, anchor) in layout.chain(chain).iter().enumerate() {
            let p = anchor.world_position(elevation);
            match anchor.axis {
                Some(a) => println!(
                    "  {i:2}  pos=({:+.4}, {:+.4}, {:+.4})  axis=({:+.3}, {:+.3}, {:+.3})",
                    p.x, p.y, p.z, a.x, a.y, a.z
                ),
                None => println!("  {i:2}  pos=({:+.4}, {:+.4}, {:+.4})", p.x, p.y, p.z),
            }
        }
    }
    Ok(())
}

fn run_coverage(path: &Path) -> Result<(), AppError> {
    let config = RobotConfig::from_file(path)?;
    let classifier = classifier_for_parts(config.parts);
    let registry = classifier.registry();

    let mut uncovered = 0;
    for (space, shape) in registry.handles() {
        let class = classifier.classify(space, shape);
        let sub_space = registry.space(space);
        let name = registry.debug_name(shape).unwrap_or("?");
        println!(
            "{:<12} {:<28} skin={:?} body={:?} hand={:?} cover={} tip={}",
            sub_space.map_or("?", SubSpace::name),
            name,
            class.skin_part,
            class.body_part,
            class.hand_part,
            class.is_cover,
            class.is_fingertip,
        );
        let documented_gap = matches!(sub_space, Some(SubSpace::Head | SubSpace::Legs));
        if class.is_unknown() && !documented_gap {
            uncovered += 1;
        }
    }
    println!("\n{} shapes classified", registry.len());

    if uncovered > 0 {
        return Err(AppError::Uncovered(uncovered));
    }
    Ok(())
}

fn run_skin() {
    let vectors = SkinActivationVectors::build();
    for patch in SkinPatch::ALL {
        let zeroed = vectors.zeroed_indices(patch);
        println!(
            "{:<10} taxels={:<4} zeroed={}",
            patch.name(),
            patch.taxel_count(),
            zeroed.len()
        );
        if !zeroed.is_empty() {
            let list: Vec<String> = zeroed.iter().map(ToString::to_string).collect();
            println!("  {}", list.join(" "));
        }
    }
}

fn run_info() {
    println!("homunculus v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("crates:");
    println!("  homunculus-core      {}", env!("CARGO_PKG_VERSION"));
    println!("  homunculus-calib     {}", env!("CARGO_PKG_VERSION"));
    println!("  homunculus-kin       {}", env!("CARGO_PKG_VERSION"));
    println!("  homunculus-actuator  {}", env!("CARGO_PKG_VERSION"));
    println!("  homunculus-skin      {}", env!("CARGO_PKG_VERSION"));
    println!("  homunculus-physics   {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("edition: 2024");
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Anchors { config }) => run_anchors(&config),
        Some(Commands::Coverage { config }) => run_coverage(&config),
        Some(Commands::Skin) => {
            run_skin();
            Ok(())
        }
        Some(Commands::Info) | None => {
            run_info();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

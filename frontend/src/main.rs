use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use log::info;
use vgasim_models::registry;

mod capture;
mod config;
mod emulator;
mod input;
mod video;

/// Real-time VGA viewer for cycle-level hardware models.
#[derive(Parser, Debug)]
#[command(name = "vgasim", version)]
struct Args {
    /// Hardware model to run (see --list-models).
    #[arg(default_value = "vga_test_pattern")]
    model: String,

    /// TOML config file. Defaults to <config dir>/vgasim/config.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for diagnostics and frame captures.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Presentation rate limit in Hz (0 = unpaced).
    #[arg(long)]
    frame_rate: Option<f64>,

    /// Print the available models and exit.
    #[arg(long)]
    list_models: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.list_models {
        for entry in registry::all() {
            println!("{:<20} {}", entry.name, entry.description);
        }
        return Ok(());
    }

    let entry = registry::find(&args.model).ok_or_else(|| {
        let names: Vec<_> = registry::all().iter().map(|e| e.name).collect();
        anyhow!(
            "unknown model `{}` (available: {})",
            args.model,
            names.join(", ")
        )
    })?;

    let mut cfg = config::load(args.config.as_deref())?;
    if let Some(hz) = args.frame_rate {
        cfg.sim.frame_rate_hz = hz;
    }
    if let Some(dir) = args.log_dir {
        cfg.log_dir = dir;
    }
    cfg.validate()?;

    std::fs::create_dir_all(&cfg.log_dir)
        .with_context(|| format!("failed to create log directory {}", cfg.log_dir.display()))?;

    let bindings = input::key_bindings(&cfg.keys, cfg.sim.input_bits)?;

    info!("running model `{}`", entry.name);
    let reason = emulator::run(entry, cfg.sim, bindings, &cfg.log_dir)?;
    info!("exiting: {reason:?}");
    Ok(())
}

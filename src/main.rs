use std::path::PathBuf;

use clap::Parser;

mod run;

/// Headless interactive-water simulation: runs the height-field engine
/// through a scripted scenario and records a capture for external
/// consumers (renderers, caustics generators).
#[derive(Parser)]
#[command(name = "ripple", version, about)]
struct Cli {
    /// Directory the capture is written into.
    #[arg(short, long, default_value = "output/capture")]
    out: PathBuf,

    /// Grid resolution, in cells per side.
    #[arg(short, long, default_value_t = 128)]
    resolution: usize,

    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Simulation and playback rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Wave damping, in (0, 1).
    #[arg(short, long, default_value_t = 0.985)]
    damping: f32,

    /// Disable the ambient wind gusts.
    #[arg(long)]
    no_wind: bool,

    /// Disable sphere gravity; the body stays wherever the script drags it.
    #[arg(long)]
    no_gravity: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(err) = run::run(
        cli.out,
        cli.resolution,
        cli.frames,
        cli.fps,
        cli.damping,
        !cli.no_wind,
        !cli.no_gravity,
    ) {
        log::error!("simulation failed: {err}");
        std::process::exit(1);
    }
}

use std::path::PathBuf;

use glam::Vec3;
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use thiserror::Error;

use ripple_io::encode::{EncodingError, SurfaceDataEncoder};
use ripple_surface::{
    engine::{EngineError, WaterEngine, WaveParams},
    interact::PointerCommand,
};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

pub fn run(
    out: PathBuf,
    resolution: usize,
    frames: u64,
    fps: u32,
    damping: f32,
    wind: bool,
    gravity: bool,
) -> Result<(), RunError> {
    let defaults = WaveParams::default();
    let params = WaveParams {
        resolution,
        damping,
        gravity_enabled: gravity,
        wind_strength: if wind { defaults.wind_strength } else { 0.0 },
        ..defaults
    };

    let mut engine = WaterEngine::new(params)?;
    let dt = 1.0 / fps as f32;

    let mut encoder = SurfaceDataEncoder::new(out, frames, fps)?;
    encoder.encode_metadata(&engine)?;

    let bar_template =
        "Simulating {spinner:.green} [{elapsed}] [{bar:50.white/white}] {pos}/{len} ({eta})";
    let style = ProgressStyle::with_template(bar_template)
        .unwrap()
        .progress_chars("=> ")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress = ProgressBar::new(frames).with_style(style);

    for frame in (0..frames).progress_with(progress) {
        script(&mut engine, frame);

        engine.frame(dt);
        encoder.encode_frame(&engine)?;
    }

    Ok(())
}

/// Scripted input: an early poke, a drag trail across the far half of the
/// pool, and a body drag that lifts the sphere and drops it back in.
fn script(engine: &mut WaterEngine, frame: u64) {
    let pool = engine.layout().pool_size;
    let on_plane = |u: f32, v: f32| Vec3::new((u - 0.5) * pool, 0.0, (0.5 - v) * pool);

    match frame {
        30 => {
            engine.push_pointer(PointerCommand::Down {
                point: on_plane(0.3, 0.3),
                on_body: false,
            });
            engine.push_pointer(PointerCommand::Up);
        }
        120..=180 => {
            let t = (frame - 120) as f32 / 60.0;
            let point = on_plane(0.2 + 0.6 * t, 0.7);

            if frame == 120 {
                engine.push_pointer(PointerCommand::Down {
                    point,
                    on_body: false,
                });
            } else {
                engine.push_pointer(PointerCommand::Move {
                    point,
                    on_body: false,
                });
            }

            if frame == 180 {
                engine.push_pointer(PointerCommand::Up);
            }
        }
        300..=331 => {
            if frame == 331 {
                engine.push_pointer(PointerCommand::Up);
                return;
            }

            let t = (frame - 300) as f32 / 30.0;
            let point = Vec3::new(0.0, 0.6 * t, 0.0);

            if frame == 300 {
                engine.push_pointer(PointerCommand::Down {
                    point,
                    on_body: true,
                });
            } else {
                engine.push_pointer(PointerCommand::Move {
                    point,
                    on_body: true,
                });
            }
        }
        _ => {}
    }
}

//! Disturbance injection: bounds checks, stamp locality and chaining.

use glam::Vec2;
use ripple_surface::engine::{WaterEngine, WaveParams};

fn quiet_engine(resolution: usize) -> WaterEngine {
    WaterEngine::new(WaveParams {
        resolution,
        wind_strength: 0.0,
        gravity_enabled: false,
        ..WaveParams::default()
    })
    .expect("engine config is valid")
}

#[test]
fn out_of_bounds_injections_are_ignored() {
    let mut engine = quiet_engine(64);

    engine.add_disturbance(1.5, 0.5, 0.05, 0.1);
    engine.add_disturbance(0.5, -0.2, 0.05, 0.1);

    assert!(engine.grid().height.iter().all(|&h| h == 0.0));
}

#[test]
fn stamp_is_local_to_its_radius() {
    let mut engine = quiet_engine(64);
    let center = Vec2::splat(0.5);
    let radius = 0.05;

    engine.add_disturbance(center.x, center.y, radius, 0.1);

    let layout = *engine.layout();
    let grid = engine.grid();

    for ((i, j), &height) in grid.height.indexed_iter() {
        let dist = layout.cell_uv(i, j).distance(center);

        if dist >= radius {
            assert_eq!(height, 0.0, "cell at distance {dist} must stay flat");
        } else if dist <= radius * 0.9 {
            assert!(height > 0.0, "cell at distance {dist} must be raised");
        }
    }

    // The pulse only touches the height channel.
    assert!(grid.velocity.iter().all(|&v| v == 0.0));
    assert!(grid.normal_x.iter().all(|&n| n == 0.0));
}

#[test]
fn each_injection_sees_the_previous_one() {
    let mut engine = quiet_engine(64);

    engine.add_disturbance(0.5, 0.5, 0.05, 0.1);
    let single = engine.grid().height.clone();

    engine.add_disturbance(0.5, 0.5, 0.05, 0.1);
    let double = engine.grid().height.clone();

    for (a, b) in single.iter().zip(double.iter()) {
        assert_eq!(*b, a * 2.0);
    }
}

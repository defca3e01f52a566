//! Sphere behavior over whole engine frames.

use glam::Vec3;
use ripple_surface::engine::{WaterEngine, WaveParams};
use ripple_surface::interact::PointerCommand;

const DT: f32 = 1.0 / 60.0;

#[test]
fn dropped_body_settles_floating_near_the_surface() {
    let mut engine = WaterEngine::new(WaveParams {
        resolution: 64,
        wind_strength: 0.0,
        ..WaveParams::default()
    })
    .expect("engine config is valid");

    // Default gravity and buoyancy balance at half submersion, so the
    // spawned body should fall, splash and float back to y near zero.
    for _ in 0..3000 {
        engine.frame(DT);
    }

    let sphere = engine.sphere();
    assert!(
        sphere.position.y.abs() < sphere.radius * 0.5,
        "body should float near half submersion, got y = {}",
        sphere.position.y
    );
    assert!(
        sphere.velocity.length() < 1e-3,
        "body should have settled, velocity = {:?}",
        sphere.velocity
    );

    // The coupled surface stays bounded throughout.
    assert!(engine.grid().height.iter().all(|h| h.is_finite()));
}

#[test]
fn dragging_pins_the_body_and_clamps_it_to_the_pool() {
    let mut engine = WaterEngine::new(WaveParams {
        resolution: 64,
        wind_strength: 0.0,
        ..WaveParams::default()
    })
    .expect("engine config is valid");

    engine.push_pointer(PointerCommand::Down {
        point: engine.sphere().position,
        on_body: true,
    });
    engine.frame(DT);

    // Way outside the pool; the drag clamps to the walls and ceiling.
    engine.push_pointer(PointerCommand::Move {
        point: Vec3::new(10.0, 10.0, -10.0),
        on_body: true,
    });
    engine.frame(DT);

    let layout = *engine.layout();
    let sphere = engine.sphere();
    let half = layout.pool_size * 0.5 - sphere.radius;

    assert_eq!(sphere.position.x, half);
    assert_eq!(sphere.position.y, layout.pool_height);
    assert_eq!(sphere.position.z, -half);
    assert_eq!(sphere.velocity, Vec3::ZERO, "velocity is pinned while dragging");

    // Release: gravity takes over again and the body starts falling.
    engine.push_pointer(PointerCommand::Up);
    engine.frame(DT);
    engine.frame(DT);

    assert!(engine.sphere().velocity.y < 0.0);
    assert!(engine.sphere().position.y < layout.pool_height);
}

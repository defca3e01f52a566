//! Pointer gesture state machine: pokes, drag trails, body drags and the
//! session resets around them.

use glam::{Vec2, Vec3};
use ripple_surface::grid::PoolLayout;
use ripple_surface::interact::{InteractionController, PointerCommand};

fn layout() -> PoolLayout {
    PoolLayout {
        resolution: 128,
        pool_size: 2.0,
        pool_height: 1.0,
    }
}

/// World point on the surface plane for a UV position.
fn on_plane(layout: &PoolLayout, u: f32, v: f32) -> Vec3 {
    let world = layout.world_from_uv(Vec2::new(u, v));
    Vec3::new(world.x, 0.0, world.y)
}

fn down(layout: &PoolLayout, u: f32, v: f32) -> PointerCommand {
    PointerCommand::Down {
        point: on_plane(layout, u, v),
        on_body: false,
    }
}

fn hover(layout: &PoolLayout, u: f32, v: f32) -> PointerCommand {
    PointerCommand::Move {
        point: on_plane(layout, u, v),
        on_body: false,
    }
}

#[test]
fn a_poke_stamps_once_at_the_pointer() {
    let layout = layout();
    let mut controller = InteractionController::new(0.04, 0.4);

    let input = controller.drain(&layout, [down(&layout, 0.3, 0.3)]);

    assert_eq!(input.disturbances.len(), 1);
    assert!(input.disturbances[0].center.distance(Vec2::new(0.3, 0.3)) < 1e-5);
    assert_eq!(input.disturbances[0].strength, 0.4);
}

#[test]
fn a_drag_subdivides_into_evenly_spaced_stamps() {
    let layout = layout();
    let mut controller = InteractionController::new(0.04, 0.4);

    let first = controller.drain(&layout, [down(&layout, 0.1, 0.1)]);
    assert_eq!(first.disturbances.len(), 1);

    let trail = controller.drain(&layout, [hover(&layout, 0.1, 0.25)]);
    assert_eq!(trail.disturbances.len(), 10, "0.15 of travel at 0.015 spacing");

    let from = Vec2::new(0.1, 0.1);
    let to = Vec2::new(0.1, 0.25);
    for (k, stamp) in trail.disturbances.iter().enumerate() {
        let expected = from.lerp(to, (k + 1) as f32 / 10.0);
        assert!(
            stamp.center.distance(expected) < 1e-4,
            "stamp {k} at {:?}, expected {expected:?}",
            stamp.center
        );
    }

    // A fast drag saturates at the configured strength.
    assert_eq!(trail.disturbances[0].strength, 0.4);
}

#[test]
fn a_short_drag_ramps_strength_with_distance() {
    let layout = layout();
    let mut controller = InteractionController::new(0.04, 0.4);

    controller.drain(&layout, [down(&layout, 0.5, 0.5)]);
    let trail = controller.drain(&layout, [hover(&layout, 0.53, 0.5)]);

    assert_eq!(trail.disturbances.len(), 2);

    let expected = 0.01 + 0.03 * 0.4 * 8.0;
    let got = trail.disturbances[0].strength;
    assert!(
        (got - expected).abs() < 1e-4,
        "trail strength {got}, expected about {expected}"
    );
}

#[test]
fn hovering_the_body_suppresses_the_trail() {
    let layout = layout();
    let mut controller = InteractionController::new(0.04, 0.4);

    controller.drain(&layout, [down(&layout, 0.4, 0.4)]);

    let over_body = controller.drain(
        &layout,
        [PointerCommand::Move {
            point: on_plane(&layout, 0.45, 0.4),
            on_body: true,
        }],
    );
    assert!(over_body.disturbances.is_empty());

    // The session was reset, so moving back over open water does not
    // resume the trail.
    let resumed = controller.drain(&layout, [hover(&layout, 0.5, 0.4)]);
    assert!(resumed.disturbances.is_empty());
}

#[test]
fn leaving_the_uv_domain_resets_the_session() {
    let layout = layout();
    let mut controller = InteractionController::new(0.04, 0.4);

    controller.drain(&layout, [down(&layout, 0.9, 0.5)]);

    // Off the edge of the pool: no stamp, session dropped.
    let outside = controller.drain(&layout, [hover(&layout, 1.2, 0.5)]);
    assert!(outside.disturbances.is_empty());

    let back_inside = controller.drain(&layout, [hover(&layout, 0.8, 0.5)]);
    assert!(back_inside.disturbances.is_empty());
}

#[test]
fn dragging_the_body_reports_a_target_and_no_stamps() {
    let layout = layout();
    let mut controller = InteractionController::new(0.04, 0.4);

    let grab = controller.drain(
        &layout,
        [PointerCommand::Down {
            point: Vec3::new(0.0, 0.2, 0.0),
            on_body: true,
        }],
    );
    assert!(grab.disturbances.is_empty());
    assert!(controller.is_dragging());

    let target = Vec3::new(0.5, 0.3, -0.2);
    let dragged = controller.drain(
        &layout,
        [PointerCommand::Move {
            point: target,
            on_body: true,
        }],
    );
    assert_eq!(dragged.drag_target, Some(target));
    assert!(dragged.disturbances.is_empty());

    let released = controller.drain(&layout, [PointerCommand::Up]);
    assert!(released.released);
    assert!(!controller.is_dragging());
}

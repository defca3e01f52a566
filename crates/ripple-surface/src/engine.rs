use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use thiserror::Error;

use crate::body::{Sphere, SpherePhysics};
use crate::grid::{DoubleBuffer, PoolLayout, SurfaceGrid};
use crate::interact::{InteractionController, PointerCommand, Wind};
use crate::pass::{Disturbance, Pass};

/// Body movement below this distance skips the displacement pass and keeps
/// accumulating toward the next one.
const BODY_MOVE_EPSILON: f32 = 1e-4;

/// Largest damping the engine will accept; 1.0 and above diverges.
const MAX_DAMPING: f32 = 0.9999;

/// Configuration for a [`WaterEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    /// Cells along each side of the grid.
    pub resolution: usize,
    /// World-space extent of the surface along X and Z.
    pub pool_size: f32,
    /// Depth of the pool walls below the rest surface.
    pub pool_height: f32,
    /// Fraction of wave velocity retained each step. Must stay in `(0, 1)`.
    pub damping: f32,
    /// UV radius of pointer stamps.
    pub interaction_radius: f32,
    /// Peak strength of a pointer stamp.
    pub interaction_strength: f32,
    /// Peak strength of each ambient wind gust. Zero disables wind.
    pub wind_strength: f32,
    /// UV radius of wind gusts.
    pub wind_radius: f32,
    /// Rate at which wind time accumulates per second of frame delta.
    pub wave_speed: f32,
    /// Whether the sphere integrator runs when the body is not dragged.
    pub gravity_enabled: bool,
    /// Radius of the coupled sphere.
    pub sphere_radius: f32,
    pub sphere_physics: SpherePhysics,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            resolution: 128,
            pool_size: 2.0,
            pool_height: 1.0,
            damping: 0.985,
            interaction_radius: 0.04,
            interaction_strength: 0.4,
            wind_strength: 0.012,
            wind_radius: 0.08,
            wave_speed: 1.0,
            gravity_enabled: true,
            sphere_radius: 0.2,
            sphere_physics: SpherePhysics::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("grid resolution must be at least 2, got {0}")]
    Resolution(usize),
    #[error("pool size must be positive, got {0}")]
    PoolSize(f32),
    #[error("sphere radius must be positive, got {0}")]
    SphereRadius(f32),
}

/// The height-field water engine. Owns the grid double buffer, the coupled
/// sphere and the interaction state, and runs the ordered per-frame pass
/// pipeline. External consumers only read the exposed grid and sphere.
pub struct WaterEngine {
    layout: PoolLayout,
    buffer: DoubleBuffer,
    sphere: Sphere,
    controller: InteractionController,
    wind: Wind,
    physics: SpherePhysics,
    damping: f32,
    wave_speed: f32,
    gravity_enabled: bool,
    accumulated_time: f32,
    commands: SmallVec<[PointerCommand; 4]>,
}

impl WaterEngine {
    pub fn new(params: WaveParams) -> Result<Self, EngineError> {
        if params.resolution < 2 {
            return Err(EngineError::Resolution(params.resolution));
        }
        if !(params.pool_size > 0.0) {
            return Err(EngineError::PoolSize(params.pool_size));
        }
        if !(params.sphere_radius > 0.0) {
            return Err(EngineError::SphereRadius(params.sphere_radius));
        }

        let layout = PoolLayout {
            resolution: params.resolution,
            pool_size: params.pool_size,
            pool_height: params.pool_height,
        };

        log::info!(
            "water engine: {0}x{0} cells over a {1}x{1} pool",
            params.resolution,
            params.pool_size,
        );

        let spawn = Vec3::new(0.0, params.pool_height * 0.5, 0.0);

        Ok(Self {
            layout,
            buffer: DoubleBuffer::new(params.resolution),
            sphere: Sphere::new(spawn, params.sphere_radius),
            controller: InteractionController::new(
                params.interaction_radius,
                params.interaction_strength,
            ),
            wind: Wind {
                strength: params.wind_strength,
                radius: params.wind_radius,
            },
            physics: params.sphere_physics,
            damping: clamp_damping(params.damping),
            wave_speed: params.wave_speed,
            gravity_enabled: params.gravity_enabled,
            accumulated_time: 0.0,
            commands: SmallVec::new(),
        })
    }

    /// Queues a pointer command for the next frame.
    pub fn push_pointer(&mut self, command: PointerCommand) {
        self.commands.push(command);
    }

    /// Stamps a radial impulse at `(u, v)`. Silently ignored outside the
    /// unit square.
    pub fn add_disturbance(&mut self, u: f32, v: f32, radius: f32, strength: f32) {
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return;
        }

        self.buffer.run(
            &self.layout,
            &Pass::Inject(Disturbance {
                center: Vec2::new(u, v),
                radius,
                strength,
            }),
        );
    }

    /// Folds the displacement of a body moving between two centers into the
    /// height field. Exact no-op for equal centers.
    pub fn move_body(&mut self, old_center: Vec3, new_center: Vec3, radius: f32) {
        self.buffer.run(
            &self.layout,
            &Pass::Displace {
                old_center,
                new_center,
                radius,
            },
        );
    }

    /// Replaces the wave damping. Values outside `[0, 1)` are clamped and
    /// logged instead of being allowed to diverge.
    pub fn set_damping(&mut self, value: f32) {
        self.damping = clamp_damping(value);
    }

    /// Advances the wave recurrence one step.
    pub fn step(&mut self) {
        self.buffer.run(
            &self.layout,
            &Pass::WaveUpdate {
                damping: self.damping,
            },
        );
    }

    /// Rebuilds the normal channels from the current heights.
    pub fn reconstruct_normals(&mut self) {
        self.buffer.run(&self.layout, &Pass::ReconstructNormals);
    }

    /// Runs one full frame in pipeline order: queued pointer input, ambient
    /// wind, body integration and displacement, wave update, normal
    /// reconstruction.
    pub fn frame(&mut self, dt: f32) {
        let commands = std::mem::take(&mut self.commands);
        let input = self.controller.drain(&self.layout, commands);

        for disturbance in &input.disturbances {
            self.inject(*disturbance);
        }

        self.accumulated_time += dt * self.wave_speed;
        if self.wind.strength != 0.0 {
            for gust in self.wind.gusts(self.accumulated_time) {
                self.inject(gust);
            }
        }

        if input.released {
            self.sphere.velocity = Vec3::ZERO;
        }

        if self.controller.is_dragging() {
            if let Some(target) = input.drag_target {
                self.sphere.position = self.clamp_drag(target);
            }
            self.sphere.velocity = Vec3::ZERO;
        } else if self.gravity_enabled {
            self.sphere.integrate(&self.physics, self.floor_y());
        }

        let moved = self.sphere.position.distance(self.sphere.previous_position);
        if moved > BODY_MOVE_EPSILON {
            self.move_body(
                self.sphere.previous_position,
                self.sphere.position,
                self.sphere.radius,
            );
            self.sphere.previous_position = self.sphere.position;
        }

        self.step();
        self.reconstruct_normals();
    }

    /// The most recently completed grid state.
    #[inline]
    pub fn grid(&self) -> &SurfaceGrid {
        self.buffer.read()
    }

    #[inline]
    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    #[inline]
    pub fn layout(&self) -> &PoolLayout {
        &self.layout
    }

    #[inline]
    pub fn damping(&self) -> f32 {
        self.damping
    }

    #[inline]
    fn floor_y(&self) -> f32 {
        -self.layout.pool_height + self.sphere.radius
    }

    fn inject(&mut self, d: Disturbance) {
        self.add_disturbance(d.center.x, d.center.y, d.radius, d.strength);
    }

    fn clamp_drag(&self, target: Vec3) -> Vec3 {
        let half = self.layout.pool_size * 0.5 - self.sphere.radius;

        Vec3::new(
            target.x.clamp(-half, half),
            target.y.clamp(self.floor_y(), self.layout.pool_height),
            target.z.clamp(-half, half),
        )
    }
}

/// Damping at or above 1 makes the wave recurrence grow without bound, and
/// negative values flip the field sign every step.
fn clamp_damping(value: f32) -> f32 {
    if (0.0..1.0).contains(&value) {
        return value;
    }

    let clamped = if value >= 1.0 { MAX_DAMPING } else { 0.0 };
    log::warn!("damping {value} outside [0, 1); clamped to {clamped}");
    clamped
}

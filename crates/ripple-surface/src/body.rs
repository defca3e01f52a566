use glam::Vec3;

/// Tunable coefficients for the sphere integrator. Per-frame visual-scale
/// values, not SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpherePhysics {
    /// Constant downward acceleration applied each frame.
    pub gravity: f32,
    /// Upward acceleration applied each frame when fully submerged.
    pub buoyancy_max: f32,
    /// Fraction of velocity retained each frame while fully above the
    /// surface.
    pub drag_air: f32,
    /// Fraction of velocity retained each frame while fully submerged.
    pub drag_water: f32,
    /// Fraction of downward speed kept (and reversed) on floor contact.
    pub bounce: f32,
}

impl Default for SpherePhysics {
    fn default() -> Self {
        Self {
            gravity: -0.002,
            buoyancy_max: 0.004,
            drag_air: 0.998,
            drag_water: 0.96,
            bounce: 0.3,
        }
    }
}

/// The submersible rigid body coupled to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub position: Vec3,
    /// Position used by the last completed displacement pass.
    pub previous_position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            previous_position: position,
            velocity: Vec3::ZERO,
            radius,
        }
    }

    /// Fraction of the body presumed underwater: 0 with the whole sphere
    /// above the rest surface, 1 with the whole sphere below.
    #[inline]
    pub fn submerged_ratio(&self) -> f32 {
        ((self.radius - self.position.y) / (2.0 * self.radius)).clamp(0.0, 1.0)
    }

    /// Advances the body one frame under gravity, buoyancy and drag, with a
    /// partially inelastic bounce off the pool floor at `floor_y`.
    pub fn integrate(&mut self, physics: &SpherePhysics, floor_y: f32) {
        self.velocity.y += physics.gravity;

        let submerged = self.submerged_ratio();
        if submerged > 0.0 {
            self.velocity.y += physics.buoyancy_max * submerged;
        }

        let drag = physics.drag_air + (physics.drag_water - physics.drag_air) * submerged;
        self.velocity *= drag;
        self.position += self.velocity;

        if self.position.y < floor_y {
            self.position.y = floor_y;
            if self.velocity.y < 0.0 {
                self.velocity.y *= -physics.bounce;
            }
        }
    }
}

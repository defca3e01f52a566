use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use ndarray::Zip;

use crate::grid::{PoolLayout, SurfaceGrid};

/// Scale applied to the occupied column volume when converting body motion
/// into a height correction. Empirically tuned; captures are only
/// comparable across builds that agree on it.
pub const COLUMN_VOLUME_SCALE: f32 = 0.25;

/// Sharpens the lateral falloff of the displacement footprint at the rim.
const RIM_SHARPNESS: f32 = 1.5;

/// A localized additive impulse to the height channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disturbance {
    /// Center of the stamp in UV space.
    pub center: Vec2,
    /// Footprint radius in UV units.
    pub radius: f32,
    /// Height added at the center of the stamp.
    pub strength: f32,
}

/// One full-grid computation over an explicit read/write grid pair. The
/// frame orchestrator selects which pass runs; each variant is a pure
/// function of the read grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pass {
    /// Stamp a smooth radial pulse into the height channel.
    Inject(Disturbance),
    /// Advance the damped wave recurrence one step.
    WaveUpdate { damping: f32 },
    /// Rebuild the normal channels from local height differences.
    ReconstructNormals,
    /// Fold the column volume a body swept between two centers into the
    /// height channel.
    Displace {
        old_center: Vec3,
        new_center: Vec3,
        radius: f32,
    },
}

impl Pass {
    pub fn apply(&self, layout: &PoolLayout, read: &SurfaceGrid, write: &mut SurfaceGrid) {
        match *self {
            Pass::Inject(disturbance) => inject(layout, read, write, disturbance),
            Pass::WaveUpdate { damping } => wave_update(layout, read, write, damping),
            Pass::ReconstructNormals => reconstruct_normals(layout, read, write),
            Pass::Displace {
                old_center,
                new_center,
                radius,
            } => displace(layout, read, write, old_center, new_center, radius),
        }
    }
}

/// `height += drop * strength` under a cosine-smoothed radial profile: zero
/// at the rim, one at the center. Velocity and normals pass through.
fn inject(layout: &PoolLayout, read: &SurfaceGrid, write: &mut SurfaceGrid, d: Disturbance) {
    write.velocity.assign(&read.velocity);
    write.normal_x.assign(&read.normal_x);
    write.normal_z.assign(&read.normal_z);

    Zip::indexed(&mut write.height)
        .and(&read.height)
        .for_each(|(i, j), out, &height| {
            let uv = layout.cell_uv(i, j);
            let t = (1.0 - uv.distance(d.center) / d.radius).max(0.0);
            let drop = 0.5 - (t * PI).cos() * 0.5;

            *out = height + drop * d.strength;
        });
}

/// The damped discrete wave equation: pull each cell toward the mean of its
/// four clamped neighbors, damp the resulting velocity, advance the height.
fn wave_update(layout: &PoolLayout, read: &SurfaceGrid, write: &mut SurfaceGrid, damping: f32) {
    write.normal_x.assign(&read.normal_x);
    write.normal_z.assign(&read.normal_z);

    Zip::indexed(&mut write.height)
        .and(&mut write.velocity)
        .for_each(|(i, j), out_height, out_velocity| {
            let (i, j) = (i as isize, j as isize);
            let left = layout.clamp(i - 1, j);
            let right = layout.clamp(i + 1, j);
            let down = layout.clamp(i, j - 1);
            let up = layout.clamp(i, j + 1);
            let (i, j) = (i as usize, j as usize);

            let avg = (read.height[left]
                + read.height[right]
                + read.height[down]
                + read.height[up])
                * 0.25;

            let height = read.height[(i, j)];
            let velocity = (read.velocity[(i, j)] + 2.0 * (avg - height)) * damping;

            *out_velocity = velocity;
            *out_height = height + velocity;
        });
}

/// Tangents along each axis from one-cell clamped height differences; their
/// cross product is the surface normal. Only the horizontal components are
/// stored.
fn reconstruct_normals(layout: &PoolLayout, read: &SurfaceGrid, write: &mut SurfaceGrid) {
    write.height.assign(&read.height);
    write.velocity.assign(&read.velocity);

    let spacing = layout.spacing();

    Zip::indexed(&mut write.normal_x)
        .and(&mut write.normal_z)
        .for_each(|(i, j), out_x, out_z| {
            let right = layout.clamp(i as isize + 1, j as isize);
            let up = layout.clamp(i as isize, j as isize + 1);

            let hx = read.height[right] - read.height[(i, j)];
            let hz = read.height[up] - read.height[(i, j)];

            // cross((0, hz, spacing), (spacing, hx, 0))
            let normal = Vec3::new(-spacing * hx, spacing * spacing, -spacing * hz).normalize();

            *out_x = normal.x;
            *out_z = normal.z;
        });
}

/// `height += V(old) - V(new)`: the surface rises where the body vacated
/// its footprint and falls where it now sits. Exact no-op for equal
/// centers.
fn displace(
    layout: &PoolLayout,
    read: &SurfaceGrid,
    write: &mut SurfaceGrid,
    old_center: Vec3,
    new_center: Vec3,
    radius: f32,
) {
    write.velocity.assign(&read.velocity);
    write.normal_x.assign(&read.normal_x);
    write.normal_z.assign(&read.normal_z);

    if old_center == new_center {
        write.height.assign(&read.height);
        return;
    }

    let n = layout.resolution;

    for j in 0..n {
        for i in 0..n {
            let cell = layout.cell_world(i, j);
            let delta = column_volume(cell, old_center, radius)
                - column_volume(cell, new_center, radius);

            write.height[(i, j)] = read.height[(i, j)] + delta;
        }
    }
}

/// Approximate volume of the vertical column at `cell` occupied by a sphere
/// at `center`. A conservation-flavored heuristic, not exact displacement;
/// it exaggerates for radii large relative to the grid spacing.
fn column_volume(cell: Vec2, center: Vec3, radius: f32) -> f32 {
    let t = Vec2::new(center.x, center.z).distance(cell) / radius;
    let falloff = (-(RIM_SHARPNESS * t).powi(6)).exp();

    let y_min = (center.y - falloff).min(0.0);
    let y_max = (center.y + falloff).max(0.0).min(y_min + 2.0 * falloff);

    (y_max - y_min) * COLUMN_VOLUME_SCALE
}

use glam::Vec2;
use ndarray::Array2;

use crate::pass::Pass;

/// Geometry of the pool surface: grid resolution and the mapping between
/// cell indices, UV space and world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolLayout {
    /// Number of cells along each side of the square grid.
    pub resolution: usize,
    /// World-space extent of the surface along X and Z.
    pub pool_size: f32,
    /// Depth of the pool walls below the rest surface.
    pub pool_height: f32,
}

impl PoolLayout {
    /// One grid-cell width in UV units.
    #[inline]
    pub fn spacing(&self) -> f32 {
        1.0 / self.resolution as f32
    }

    /// UV coordinates of the center of cell `(i, j)`.
    #[inline]
    pub fn cell_uv(&self, i: usize, j: usize) -> Vec2 {
        Vec2::new(
            (i as f32 + 0.5) * self.spacing(),
            (j as f32 + 0.5) * self.spacing(),
        )
    }

    /// Maps a world-space X/Z position on the surface plane to UV.
    #[inline]
    pub fn uv_from_world(&self, x: f32, z: f32) -> Vec2 {
        Vec2::new(x / self.pool_size + 0.5, 0.5 - z / self.pool_size)
    }

    /// Inverse of [`uv_from_world`](Self::uv_from_world): world X/Z of a UV
    /// position.
    #[inline]
    pub fn world_from_uv(&self, uv: Vec2) -> Vec2 {
        Vec2::new(
            (uv.x - 0.5) * self.pool_size,
            (0.5 - uv.y) * self.pool_size,
        )
    }

    /// World X/Z of the center of cell `(i, j)`.
    #[inline]
    pub fn cell_world(&self, i: usize, j: usize) -> Vec2 {
        self.world_from_uv(self.cell_uv(i, j))
    }

    /// Clamped cell addressing: samples past an edge land on the edge cell,
    /// so the boundary behaves like a free wall.
    #[inline]
    pub fn clamp(&self, i: isize, j: isize) -> (usize, usize) {
        let hi = self.resolution as isize - 1;
        (i.clamp(0, hi) as usize, j.clamp(0, hi) as usize)
    }
}

/// Packed per-cell state of the surface, one `(n, n)` array per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    /// Vertical displacement of the surface at each cell.
    pub height: Array2<f32>,
    /// Rate of change of height driving the wave recurrence. Not a
    /// physical momentum.
    pub velocity: Array2<f32>,
    /// Horizontal X component of the reconstructed unit surface normal.
    pub normal_x: Array2<f32>,
    /// Horizontal Z component of the reconstructed unit surface normal.
    pub normal_z: Array2<f32>,
}

impl SurfaceGrid {
    pub fn new(resolution: usize) -> Self {
        let shape = (resolution, resolution);

        Self {
            height: Array2::zeros(shape),
            velocity: Array2::zeros(shape),
            normal_x: Array2::zeros(shape),
            normal_z: Array2::zeros(shape),
        }
    }

    /// Vertical normal component, re-derived at the point of use rather
    /// than stored.
    #[inline]
    pub fn normal_y(&self, i: usize, j: usize) -> f32 {
        let nx = self.normal_x[(i, j)];
        let nz = self.normal_z[(i, j)];

        (1.0 - nx * nx - nz * nz).max(0.0).sqrt()
    }
}

/// Ping-pong pair of grids. Every pass reads only `read` and writes only
/// `write`; [`run`](Self::run) swaps them afterwards so `read` always holds
/// the most recently completed result.
#[derive(Debug, Clone)]
pub struct DoubleBuffer {
    read: SurfaceGrid,
    write: SurfaceGrid,
}

impl DoubleBuffer {
    pub fn new(resolution: usize) -> Self {
        Self {
            read: SurfaceGrid::new(resolution),
            write: SurfaceGrid::new(resolution),
        }
    }

    /// The most recently completed grid state.
    #[inline]
    pub fn read(&self) -> &SurfaceGrid {
        &self.read
    }

    /// Runs one pass as a full read→write→swap cycle.
    pub fn run(&mut self, layout: &PoolLayout, pass: &Pass) {
        pass.apply(layout, &self.read, &mut self.write);
        std::mem::swap(&mut self.read, &mut self.write);
    }
}

use std::io::Write;

use encode::{EncodingError, SurfaceFrameEncoder};
use ripple_surface::engine::WaterEngine;

pub mod as_bytes;
pub mod decode;
pub mod encode;

/// Anything that can serialize its per-frame surface state into a capture.
pub trait EncodeSurface {
    fn encode_state<W: Write>(
        &self,
        encoder: &mut SurfaceFrameEncoder<W>,
    ) -> Result<(), EncodingError>;
}

impl EncodeSurface for WaterEngine {
    fn encode_state<W: Write>(
        &self,
        encoder: &mut SurfaceFrameEncoder<W>,
    ) -> Result<(), EncodingError> {
        let grid = self.grid();

        encoder.encode_channel(grid.height.iter().copied())?;
        encoder.encode_channel(grid.normal_x.iter().copied())?;
        encoder.encode_channel(grid.normal_z.iter().copied())?;
        encoder.encode_value(self.sphere().position)?;

        Ok(())
    }
}

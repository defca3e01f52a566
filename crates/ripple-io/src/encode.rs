use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use thiserror::Error;

use ripple_surface::engine::WaterEngine;

use crate::{as_bytes::AsBytes, EncodeSurface};

/// Writes a capture: a directory holding a `_meta` file plus one
/// zero-padded `.dat` file per frame.
pub struct SurfaceDataEncoder {
    /// Directory the capture is written into.
    path: PathBuf,
    num_frames: u64,
    fps: u32,
    current_frame: u64,
}

impl SurfaceDataEncoder {
    pub fn new(path: PathBuf, num_frames: u64, fps: u32) -> Result<SurfaceDataEncoder, EncodingError> {
        std::fs::create_dir_all(&path)?;

        Ok(Self {
            path,
            num_frames,
            fps,
            current_frame: 0,
        })
    }

    fn frame_path(&self, frame: u64) -> PathBuf {
        let max_digits = (self.num_frames.max(1) - 1).checked_ilog10().unwrap_or(0) + 1;
        let zeros = max_digits - (frame.checked_ilog10().unwrap_or(0) + 1);

        self.path
            .join(format!("{}{frame}.dat", "0".repeat(zeros as usize)))
    }

    pub fn encode_metadata(&mut self, engine: &WaterEngine) -> Result<(), EncodingError> {
        let path = self.path.join("_meta");
        let mut writer = File::create(path)?;

        let layout = engine.layout();

        writer.write_all(&(layout.resolution as u32).to_bytes())?;
        writer.write_all(&self.fps.to_bytes())?;
        writer.write_all(&self.num_frames.to_bytes())?;
        writer.write_all(&layout.pool_size.to_bytes())?;
        writer.write_all(&layout.pool_height.to_bytes())?;
        writer.write_all(&engine.sphere().radius.to_bytes())?;

        Ok(())
    }

    pub fn encode_frame<S: EncodeSurface>(&mut self, surface: &S) -> Result<(), EncodingError> {
        let path = self.frame_path(self.current_frame);
        let writer = BufWriter::new(File::create(path)?);

        surface.encode_state(&mut SurfaceFrameEncoder { writer })?;

        self.current_frame += 1;

        Ok(())
    }
}

pub struct SurfaceFrameEncoder<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> SurfaceFrameEncoder<W> {
    /// Writes a length-prefixed run of scalar values.
    pub fn encode_channel<I>(&mut self, values: I) -> Result<(), EncodingError>
    where
        I: ExactSizeIterator<Item = f32>,
    {
        self.writer.write_all(&(values.len() as u64).to_bytes())?;

        for value in values {
            self.writer.write_all(&value.to_bytes())?;
        }

        Ok(())
    }

    pub fn encode_value<const N: usize, T: AsBytes<N>>(
        &mut self,
        value: T,
    ) -> Result<(), EncodingError> {
        self.writer.write_all(&value.to_bytes())?;

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

use std::{
    fs::File,
    io::{BufReader, Read},
    path::PathBuf,
};

use glam::Vec3;
use ndarray::Array2;
use thiserror::Error;

use crate::as_bytes::AsBytes;

/// Replays a capture directory written by
/// [`SurfaceDataEncoder`](crate::encode::SurfaceDataEncoder). Decode the
/// metadata first; it carries the shape every frame is validated against.
pub struct SurfaceDataDecoder {
    /// Directory the capture resides in.
    path: PathBuf,
    resolution: u32,
    num_frames: u64,
    current_frame: u64,
}

impl SurfaceDataDecoder {
    pub fn new(path: PathBuf) -> SurfaceDataDecoder {
        Self {
            path,
            resolution: 0,
            num_frames: 0,
            current_frame: 0,
        }
    }

    fn read_value<const N: usize, T: AsBytes<N>, R: Read>(
        reader: &mut R,
    ) -> Result<T, DecodingError> {
        let mut bytes = [0; N];
        reader.read_exact(&mut bytes)?;

        Ok(T::from_bytes(bytes))
    }

    fn read_channel<R: Read>(reader: &mut R, expected: usize) -> Result<Vec<f32>, DecodingError> {
        let len = Self::read_value::<8, u64, _>(reader)? as usize;
        if len != expected {
            return Err(DecodingError::ChannelLength { expected, got: len });
        }

        let mut bytes = vec![0; 4 * len];
        reader.read_exact(&mut bytes)?;

        Ok(bytes
            .chunks_exact(4)
            .map(|b| f32::from_bytes(b.try_into().unwrap()))
            .collect())
    }

    fn frame_path(&self, frame: u64) -> PathBuf {
        let max_digits = (self.num_frames.max(1) - 1).checked_ilog10().unwrap_or(0) + 1;
        let zeros = max_digits - (frame.checked_ilog10().unwrap_or(0) + 1);

        self.path
            .join(format!("{}{frame}.dat", "0".repeat(zeros as usize)))
    }

    pub fn decode_metadata(&mut self) -> Result<SurfaceMetadata, DecodingError> {
        let path = self.path.join("_meta");
        let mut reader = BufReader::new(File::open(path)?);

        let resolution = Self::read_value::<4, u32, _>(&mut reader)?;
        let fps = Self::read_value::<4, u32, _>(&mut reader)?;
        let num_frames = Self::read_value::<8, u64, _>(&mut reader)?;
        let pool_size = Self::read_value::<4, f32, _>(&mut reader)?;
        let pool_height = Self::read_value::<4, f32, _>(&mut reader)?;
        let sphere_radius = Self::read_value::<4, f32, _>(&mut reader)?;

        self.resolution = resolution;
        self.num_frames = num_frames;

        Ok(SurfaceMetadata {
            resolution,
            fps,
            num_frames,
            pool_size,
            pool_height,
            sphere_radius,
        })
    }

    /// The next frame, or `None` once the capture is exhausted.
    pub fn decode_frame(&mut self) -> Result<Option<SurfaceFrameData>, DecodingError> {
        if self.current_frame >= self.num_frames {
            return Ok(None);
        }

        let path = self.frame_path(self.current_frame);
        let mut reader = BufReader::new(File::open(path)?);

        let n = self.resolution as usize;
        let cells = n * n;

        let height = Self::read_channel(&mut reader, cells)?;
        let normal_x = Self::read_channel(&mut reader, cells)?;
        let normal_z = Self::read_channel(&mut reader, cells)?;
        let sphere_position = Self::read_value::<12, Vec3, _>(&mut reader)?;

        self.current_frame += 1;

        Ok(Some(SurfaceFrameData {
            height: Array2::from_shape_vec((n, n), height)?,
            normal_x: Array2::from_shape_vec((n, n), normal_x)?,
            normal_z: Array2::from_shape_vec((n, n), normal_z)?,
            sphere_position,
        }))
    }

    /// Rewinds to the first frame.
    pub fn reset(&mut self) {
        self.current_frame = 0;
    }
}

pub struct SurfaceMetadata {
    pub resolution: u32,
    pub fps: u32,
    pub num_frames: u64,
    pub pool_size: f32,
    pub pool_height: f32,
    pub sphere_radius: f32,
}

pub struct SurfaceFrameData {
    pub height: Array2<f32>,
    pub normal_x: Array2<f32>,
    pub normal_z: Array2<f32>,
    pub sphere_position: Vec3,
}

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("channel of {got} values where {expected} were expected")]
    ChannelLength { expected: usize, got: usize },
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

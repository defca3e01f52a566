pub mod body;
pub mod engine;
pub mod grid;
pub mod interact;
pub mod pass;

pub use engine::{EngineError, WaterEngine, WaveParams};

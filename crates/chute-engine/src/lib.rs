#![warn(clippy::pedantic)]

pub mod engine;
pub mod software;

pub use engine::{DecompressEngine, EngineFault, EngineStep};
pub use software::ZstdEngine;

#![warn(clippy::pedantic)]

pub mod driver;
pub mod error;
pub mod state;

pub use driver::{DriveSummary, StreamDriver, DEFAULT_CHUNK_SIZE, MAX_DRAIN_CALLS};
pub use error::DriveError;
pub use state::DriveState;

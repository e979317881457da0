#![warn(clippy::pedantic)]

pub mod backend;
pub mod config;
pub mod error;
pub mod session;

pub use backend::{Acquire, EngineBackend, SoftwareBackend};
pub use config::{ConfigOverrides, Direction, SessionConfig};
pub use error::{SessionError, Stage};
pub use session::Session;

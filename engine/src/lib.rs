// Engine library root

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod http;
pub mod indicators;
pub mod outcome;
pub mod sentiment;
pub mod services;
pub mod state;

pub use error::EngineError;
pub use outcome::{FallbackReason, Outcome};

// Runtime configuration for the engine binaries.
pub mod settings;

pub use settings::EngineSettings;

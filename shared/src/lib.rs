// Data models shared by the engine library, its servers and its CLI.
pub mod models;

//! Project configuration (`.mums.toml`).

pub mod settings;

pub use settings::Settings;

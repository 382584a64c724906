/// Database connection and table creation
pub mod database;

/// Preloaded fortune file loading
pub mod preloaded;

/// Bot settings from config.toml
pub mod settings;

pub use settings::Settings;

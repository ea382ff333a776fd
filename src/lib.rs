pub mod config;
pub mod core;
pub mod domain;
pub mod host;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::storage::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use config::PlacementConfig;
pub use core::engine::{CollageEngine, RunOutcome};
pub use domain::model::{PlacementResult, Report, ScaleAxis};
pub use host::canvas::{CanvasDocument, CanvasHost};
pub use utils::error::{CollageError, Result};

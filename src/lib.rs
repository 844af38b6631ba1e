pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::CommandPatchTool;
pub use config::TomlConfig;
pub use crate::core::applicator::{ensure_patched, PatchApplicator};
pub use domain::model::{PatchJob, PatchOutcome, PatchReport, PatchState};
pub use domain::ports::{ConfigProvider, PatchTool};
pub use utils::error::{PatcherError, Result};

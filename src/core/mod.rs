pub mod applicator;
pub mod marker;

pub use crate::domain::model::{PatchJob, PatchOutcome, PatchReport, PatchState};
pub use crate::domain::ports::{ConfigProvider, PatchTool};
pub use crate::utils::error::Result;

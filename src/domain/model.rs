use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;

/// 一次補丁作業的四個輸入路徑
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchJob {
    pub dependency_root: PathBuf,
    /// 相對於 dependency_root
    pub target: PathBuf,
    pub patch_file: PathBuf,
    /// 相對於 dependency_root
    pub marker: PathBuf,
}

impl PatchJob {
    pub fn new(
        dependency_root: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        patch_file: impl Into<PathBuf>,
        marker: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dependency_root: dependency_root.into(),
            target: target.into(),
            patch_file: patch_file.into(),
            marker: marker.into(),
        }
    }

    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Ok(Self {
            dependency_root: config.dependency_root()?,
            target: config.target_relative_path()?.to_path_buf(),
            patch_file: config.patch_file_path()?.to_path_buf(),
            marker: config.marker_relative_path().to_path_buf(),
        })
    }

    pub fn target_path(&self) -> PathBuf {
        self.dependency_root.join(&self.target)
    }

    pub fn marker_path(&self) -> PathBuf {
        self.dependency_root.join(&self.marker)
    }

    pub fn patch_path(&self) -> &Path {
        &self.patch_file
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchState {
    Unpatched,
    Patched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOutcome {
    /// 標記已存在，未做任何事
    AlreadyPatched,
    Applied,
}

/// CLI 輸出的執行摘要
#[derive(Debug, Clone, Serialize)]
pub struct PatchReport {
    pub outcome: PatchOutcome,
    pub target: PathBuf,
    pub patch_file: PathBuf,
    pub marker: PathBuf,
    pub dry_run: bool,
}

impl PatchReport {
    pub fn new(job: &PatchJob, outcome: PatchOutcome, dry_run: bool) -> Self {
        Self {
            outcome,
            target: job.target_path(),
            patch_file: job.patch_file.clone(),
            marker: job.marker_path(),
            dry_run,
        }
    }
}

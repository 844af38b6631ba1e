use crate::core::marker::Marker;
use crate::domain::model::{PatchJob, PatchOutcome, PatchReport, PatchState};
use crate::domain::ports::PatchTool;
use crate::utils::error::{MissingInput, PatcherError, Result};
use std::path::Path;

/// 確保補丁在此依賴目錄的生命週期內只套用一次。
///
/// 標記存在時直接返回；否則檢查輸入、呼叫外部工具，成功後才建立標記。
pub fn ensure_patched<T: PatchTool + ?Sized>(
    tool: &T,
    dependency_root: &Path,
    target_relative_path: &Path,
    patch_file_path: &Path,
    marker_relative_path: &Path,
) -> Result<PatchOutcome> {
    let marker = Marker::new(dependency_root.join(marker_relative_path));
    if marker.is_present()? {
        return Ok(PatchOutcome::AlreadyPatched);
    }

    let target = dependency_root.join(target_relative_path);
    check_inputs(&target, patch_file_path)?;

    tool.apply(&target, patch_file_path)?;

    // 必須在工具成功之後
    marker.touch()?;
    Ok(PatchOutcome::Applied)
}

fn check_inputs(target: &Path, patch_file: &Path) -> Result<()> {
    if !target.is_file() {
        return Err(PatcherError::MissingInputError {
            input: MissingInput::Target,
            path: target.to_path_buf(),
        });
    }
    if !patch_file.is_file() {
        return Err(PatcherError::MissingInputError {
            input: MissingInput::PatchFile,
            path: patch_file.to_path_buf(),
        });
    }
    Ok(())
}

pub struct PatchApplicator<T: PatchTool> {
    tool: T,
}

impl<T: PatchTool> PatchApplicator<T> {
    pub fn new(tool: T) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn state(&self, job: &PatchJob) -> Result<PatchState> {
        if Marker::new(job.marker_path()).is_present()? {
            Ok(PatchState::Patched)
        } else {
            Ok(PatchState::Unpatched)
        }
    }

    pub fn ensure_patched(&self, job: &PatchJob) -> Result<PatchOutcome> {
        tracing::debug!(
            "Checking marker {} for {}",
            job.marker_path().display(),
            job.dependency_root.display()
        );

        let outcome = match ensure_patched(
            &self.tool,
            &job.dependency_root,
            &job.target,
            &job.patch_file,
            &job.marker,
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                if matches!(e, PatcherError::MarkerWriteError { .. }) {
                    tracing::error!(
                        "⚠️ {} was patched but the marker could not be written",
                        job.target_path().display()
                    );
                }
                return Err(e);
            }
        };

        match outcome {
            PatchOutcome::AlreadyPatched => tracing::info!(
                "⏭️ Marker present, {} already patched",
                job.target_path().display()
            ),
            PatchOutcome::Applied => tracing::info!(
                "🩹 Applied {} to {}",
                job.patch_file.display(),
                job.target_path().display()
            ),
        }

        Ok(outcome)
    }

    /// 乾跑：回報 ensure_patched 會做什麼，不呼叫工具也不寫標記
    pub fn plan(&self, job: &PatchJob) -> Result<PatchReport> {
        let outcome = match self.state(job)? {
            PatchState::Patched => PatchOutcome::AlreadyPatched,
            PatchState::Unpatched => {
                check_inputs(&job.target_path(), &job.patch_file)?;
                PatchOutcome::Applied
            }
        };

        tracing::info!("🔍 Dry run: would result in {:?}", outcome);
        Ok(PatchReport::new(job, outcome, true))
    }

    pub fn run(&self, job: &PatchJob) -> Result<PatchReport> {
        let outcome = self.ensure_patched(job)?;
        Ok(PatchReport::new(job, outcome, false))
    }
}

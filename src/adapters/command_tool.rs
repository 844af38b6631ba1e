use crate::domain::ports::PatchTool;
use crate::utils::error::{PatcherError, Result};
use std::path::Path;
use std::process::Command;

pub const DEFAULT_PROGRAM: &str = "patch";
pub const ORIGINAL_PLACEHOLDER: &str = "{original}";
pub const PATCH_PLACEHOLDER: &str = "{patch}";

pub fn default_args() -> Vec<String> {
    vec![
        ORIGINAL_PLACEHOLDER.to_string(),
        PATCH_PLACEHOLDER.to_string(),
    ]
}

/// 以外部程式套用補丁，預設等同 `patch "<original>" "<patch>"`
#[derive(Debug, Clone)]
pub struct CommandPatchTool {
    program: String,
    args: Vec<String>,
}

impl CommandPatchTool {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// 替換 {original} 與 {patch} 佔位符
    pub fn render_args(&self, original: &Path, patch: &Path) -> Vec<String> {
        let original = original.to_string_lossy();
        let patch = patch.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(ORIGINAL_PLACEHOLDER, &original)
                    .replace(PATCH_PLACEHOLDER, &patch)
            })
            .collect()
    }
}

impl Default for CommandPatchTool {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, default_args())
    }
}

impl PatchTool for CommandPatchTool {
    fn apply(&self, original: &Path, patch: &Path) -> Result<()> {
        let args = self.render_args(original, patch);
        tracing::debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| PatcherError::ToolLaunchError {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            tracing::debug!("[{}] {}", self.program, line);
        }

        if output.status.success() {
            return Ok(());
        }

        // GNU patch 把 hunk 失敗寫在 stdout
        let combined = [stderr.trim(), stdout.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        Err(PatcherError::PatchApplicationError {
            program: self.program.clone(),
            status: output.status.code(),
            output: combined,
        })
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// 缺少的輸入檔案種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    Target,
    PatchFile,
}

impl std::fmt::Display for MissingInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingInput::Target => write!(f, "target file"),
            MissingInput::PatchFile => write!(f, "patch file"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PatcherError {
    #[error("Missing {input}: {}", .path.display())]
    MissingInputError { input: MissingInput, path: PathBuf },

    #[error("Patch application failed: `{program}` exited with {}{}", describe_status(.status), describe_output(.output))]
    PatchApplicationError {
        program: String,
        status: Option<i32>,
        output: String,
    },

    #[error("Failed to launch patch tool `{program}`: {source}")]
    ToolLaunchError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write marker {}: {source}", .path.display())]
    MarkerWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

fn describe_output(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!(": {}", output)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Patch,
    Filesystem,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PatcherError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PatcherError::MissingInputError { .. } => ErrorCategory::Input,
            PatcherError::PatchApplicationError { .. } | PatcherError::ToolLaunchError { .. } => {
                ErrorCategory::Patch
            }
            PatcherError::MarkerWriteError { .. } | PatcherError::IoError(_) => {
                ErrorCategory::Filesystem
            }
            PatcherError::ConfigValidationError { .. }
            | PatcherError::InvalidConfigValueError { .. }
            | PatcherError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 嚴重程度決定 CLI 的退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 補丁已套用但標記遺失，下次建置會重複套用
            PatcherError::MarkerWriteError { .. } => ErrorSeverity::Critical,
            PatcherError::IoError(_) => ErrorSeverity::Critical,
            PatcherError::MissingInputError { .. }
            | PatcherError::PatchApplicationError { .. }
            | PatcherError::ToolLaunchError { .. } => ErrorSeverity::High,
            PatcherError::ConfigValidationError { .. }
            | PatcherError::InvalidConfigValueError { .. }
            | PatcherError::MissingConfigError { .. } => ErrorSeverity::Medium,
        }
    }

    /// 根據錯誤嚴重程度決定退出碼，建置流程據此中止
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,   // 設定錯誤
            ErrorSeverity::High => 1,     // 補丁失敗
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PatcherError::MissingInputError { input: MissingInput::Target, .. } => {
                "Reinstall the library dependency so the file to patch is present, then rebuild"
                    .to_string()
            }
            PatcherError::MissingInputError { input: MissingInput::PatchFile, .. } => {
                "Check the patch file path; it is resolved relative to the project directory"
                    .to_string()
            }
            PatcherError::PatchApplicationError { .. } => {
                "The patch no longer applies cleanly. Remove the library checkout to restore pristine sources, or update the patch for the new upstream version"
                    .to_string()
            }
            PatcherError::ToolLaunchError { program, .. } => {
                format!("Install `{}` or point the tool setting at an available patch program", program)
            }
            PatcherError::MarkerWriteError { path, .. } => format!(
                "The patch was already applied. Fix the filesystem problem and create {} by hand; do not rerun the patcher",
                path.display()
            ),
            PatcherError::IoError(_) => {
                "Check permissions on the library dependency directory".to_string()
            }
            PatcherError::ConfigValidationError { .. }
            | PatcherError::InvalidConfigValueError { .. }
            | PatcherError::MissingConfigError { .. } => {
                "Fix the configuration file or command-line flags and rerun".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Cannot patch library: {}", self),
            ErrorCategory::Patch => format!("Patching failed, build halted: {}", self),
            ErrorCategory::Filesystem => format!("Filesystem problem: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PatcherError>;

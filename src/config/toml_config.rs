use crate::adapters::command_tool::{self, CommandPatchTool};
use crate::core::ConfigProvider;
use crate::utils::error::{PatcherError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LIBDEPS_DIR: &str = ".pio/libdeps";
pub const DEFAULT_MARKER: &str = ".patching-done";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub dependency: DependencyConfig,
    pub patch: PatchConfig,
    pub tool: ToolConfig,
    pub logging: LoggingConfig,
}

/// 依賴目錄：直接給 root，或用 PlatformIO 的 `<libdeps_dir>/<env>/<library>` 佈局
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    pub root: Option<PathBuf>,
    pub libdeps_dir: Option<PathBuf>,
    pub env: Option<String>,
    pub library: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    pub target: Option<PathBuf>,
    pub file: Option<PathBuf>,
    pub marker: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<LogFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PatcherError::ConfigValidationError {
                field: "config".to_string(),
                message: format!("Cannot read {}: {}", path.display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PatcherError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PIOENV})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PatcherError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 解析依賴根目錄，root 優先於 PlatformIO 佈局
    pub fn resolve_dependency_root(&self) -> Result<PathBuf> {
        if let Some(root) = &self.dependency.root {
            return Ok(root.clone());
        }

        let env = validation::validate_required_field("dependency.env", &self.dependency.env)?;
        let library =
            validation::validate_required_field("dependency.library", &self.dependency.library)?;
        validation::validate_non_empty_string("dependency.env", env)?;
        validation::validate_non_empty_string("dependency.library", library)?;

        let libdeps_dir = self
            .dependency
            .libdeps_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBDEPS_DIR));
        Ok(libdeps_dir.join(env).join(library))
    }

    pub fn validate_config(&self) -> Result<()> {
        let root = self.resolve_dependency_root()?;
        validation::validate_path("dependency.root", &root)?;

        validation::validate_relative_path("patch.target", self.target_relative_path()?)?;
        validation::validate_path("patch.file", self.patch_file_path()?)?;

        validation::validate_relative_path("patch.marker", self.marker_relative_path())?;

        validation::validate_non_empty_string("tool.program", self.tool_program())?;
        validation::validate_placeholder(
            "tool.args",
            &self.tool_args(),
            command_tool::PATCH_PLACEHOLDER,
        )?;

        Ok(())
    }

    pub fn tool_program(&self) -> &str {
        self.tool
            .program
            .as_deref()
            .unwrap_or(command_tool::DEFAULT_PROGRAM)
    }

    pub fn tool_args(&self) -> Vec<String> {
        self.tool
            .args
            .clone()
            .unwrap_or_else(command_tool::default_args)
    }

    pub fn patch_tool(&self) -> CommandPatchTool {
        CommandPatchTool::new(self.tool_program(), self.tool_args())
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.format.unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn dependency_root(&self) -> Result<PathBuf> {
        self.resolve_dependency_root()
    }

    fn target_relative_path(&self) -> Result<&Path> {
        validation::validate_required_field("patch.target", &self.patch.target)
            .map(PathBuf::as_path)
    }

    fn patch_file_path(&self) -> Result<&Path> {
        validation::validate_required_field("patch.file", &self.patch.file)
            .map(PathBuf::as_path)
    }

    fn marker_relative_path(&self) -> &Path {
        self.patch
            .marker
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_MARKER))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "libdeps-patcher.toml";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "libdeps-patcher")]
#[command(about = "Apply a patch to a vendored library dependency exactly once")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./libdeps-patcher.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Library dependency directory, overrides the PlatformIO layout
    #[arg(long)]
    pub dependency_root: Option<PathBuf>,

    /// PlatformIO environment name
    #[arg(long, env = "PIOENV")]
    pub pio_env: Option<String>,

    /// Library directory name under the environment's libdeps
    #[arg(long)]
    pub library: Option<String>,

    /// PlatformIO libdeps directory [default: .pio/libdeps]
    #[arg(long)]
    pub libdeps_dir: Option<PathBuf>,

    /// File to patch, relative to the dependency root
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Patch to apply, relative to the working directory
    #[arg(long)]
    pub patch_file: Option<PathBuf>,

    /// Marker file, relative to the dependency root
    #[arg(long)]
    pub marker: Option<PathBuf>,

    /// Patch program to run
    #[arg(long)]
    pub tool: Option<String>,

    /// Argument for the patch program; {original} and {patch} are substituted
    #[arg(long = "tool-arg", allow_hyphen_values = true)]
    pub tool_args: Vec<String>,

    /// Show what would happen without patching
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入設定檔並套用命令列覆蓋
    pub fn load(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                TomlConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(root) = &self.dependency_root {
            config.dependency.root = Some(root.clone());
        }
        if let Some(env) = &self.pio_env {
            config.dependency.env = Some(env.clone());
        }
        if let Some(library) = &self.library {
            config.dependency.library = Some(library.clone());
        }
        if let Some(libdeps_dir) = &self.libdeps_dir {
            config.dependency.libdeps_dir = Some(libdeps_dir.clone());
        }
        if let Some(target) = &self.target {
            config.patch.target = Some(target.clone());
        }
        if let Some(file) = &self.patch_file {
            config.patch.file = Some(file.clone());
        }
        if let Some(marker) = &self.marker {
            config.patch.marker = Some(marker.clone());
        }
        if let Some(tool) = &self.tool {
            config.tool.program = Some(tool.clone());
        }
        if !self.tool_args.is_empty() {
            config.tool.args = Some(self.tool_args.clone());
        }
        if self.verbose {
            config.logging.verbose = Some(true);
        }
        if let Some(format) = self.log_format {
            config.logging.format = Some(format);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use crate::utils::validation::Validate;

    #[test]
    fn test_parse_flags() {
        let cli = CliConfig::try_parse_from([
            "libdeps-patcher",
            "--dependency-root",
            "lib/lvgl",
            "--target",
            "lv_conf.h",
            "--patch-file",
            "patches/lvgl.patch",
            "--tool",
            "patch",
            "--tool-arg",
            "-p1",
            "--tool-arg",
            "-i",
            "--tool-arg",
            "{patch}",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.tool_args, vec!["-p1", "-i", "{patch}"]);
        assert!(cli.dry_run);
        assert!(!cli.json);
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let mut config = TomlConfig::from_toml_str(
            r#"
[dependency]
env = "ttgo-t-watch"
library = "TTGO TWatch Library"

[patch]
target = "src/lv_conf.h"
file = "patches/fonts.patch"
"#,
        )
        .unwrap();

        let cli = CliConfig {
            pio_env: Some("t-watch-2020-v3".to_string()),
            marker: Some(PathBuf::from(".fonts-patched")),
            log_format: Some(LogFormat::Json),
            ..Default::default()
        };
        cli.apply_overrides(&mut config);
        config.validate().unwrap();

        assert_eq!(
            config.dependency_root().unwrap(),
            PathBuf::from(".pio/libdeps/t-watch-2020-v3/TTGO TWatch Library")
        );
        assert_eq!(config.marker_relative_path(), Path::new(".fonts-patched"));
        assert_eq!(config.patch_file_path().unwrap(), Path::new("patches/fonts.patch"));
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn test_every_flag_has_help_text() {
        use clap::CommandFactory;

        let command = CliConfig::command();
        for arg in command.get_arguments() {
            let id = arg.get_id().as_str();
            if id == "help" {
                continue;
            }
            assert!(arg.get_help().is_some(), "--{} has no help text", id);
        }
    }

    #[test]
    fn test_flags_alone_are_enough() {
        let cli = CliConfig {
            dependency_root: Some(PathBuf::from("lib")),
            target: Some(PathBuf::from("lv_conf.h")),
            patch_file: Some(PathBuf::from("fonts.patch")),
            ..Default::default()
        };
        let mut config = TomlConfig::default();
        cli.apply_overrides(&mut config);

        assert!(config.validate().is_ok());
    }
}

use crate::utils::error::{PatcherError, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// 哨兵檔案：存在即代表補丁已套用，內容無意義
#[derive(Debug, Clone)]
pub struct Marker {
    path: PathBuf,
}

impl Marker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 任何檔案系統項目都算存在；NotFound 以外的錯誤往上傳
    pub fn is_present(&self) -> Result<bool> {
        match fs::symlink_metadata(&self.path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PatcherError::IoError(e)),
        }
    }

    /// 建立空白標記檔
    pub fn touch(&self) -> Result<()> {
        let write_error = |source: std::io::Error| PatcherError::MarkerWriteError {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
        }

        File::create(&self.path).map_err(write_error)?;
        Ok(())
    }
}

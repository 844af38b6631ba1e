use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 外部補丁工具：就地修改 original，成功或失敗
pub trait PatchTool {
    fn apply(&self, original: &Path, patch: &Path) -> Result<()>;
}

impl<T: PatchTool + ?Sized> PatchTool for &T {
    fn apply(&self, original: &Path, patch: &Path) -> Result<()> {
        (**self).apply(original, patch)
    }
}

impl<T: PatchTool + ?Sized> PatchTool for Box<T> {
    fn apply(&self, original: &Path, patch: &Path) -> Result<()> {
        (**self).apply(original, patch)
    }
}

/// 缺少必要路徑時回傳錯誤，不退回空路徑
pub trait ConfigProvider {
    fn dependency_root(&self) -> Result<PathBuf>;
    fn target_relative_path(&self) -> Result<&Path>;
    fn patch_file_path(&self) -> Result<&Path>;
    fn marker_relative_path(&self) -> &Path;
}

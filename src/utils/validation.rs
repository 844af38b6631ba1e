use crate::utils::error::{PatcherError, Result};
use std::path::{Component, Path};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let as_str = path.to_string_lossy();
    if as_str.is_empty() {
        return Err(PatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_str.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if as_str.contains('\0') {
        return Err(PatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_str.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 路徑必須是相對路徑，且不能以 `..` 跳出依賴根目錄
pub fn validate_relative_path(field_name: &str, path: &Path) -> Result<()> {
    validate_path(field_name, path)?;

    let mut depth: usize = 0;
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(PatcherError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: path.display().to_string(),
                    reason: "Path must be relative to the dependency root".to_string(),
                });
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(PatcherError::InvalidConfigValueError {
                        field: field_name.to_string(),
                        value: path.display().to_string(),
                        reason: "Path escapes the dependency root".to_string(),
                    });
                }
                depth -= 1;
            }
            Component::Normal(_) => depth += 1,
        }
    }

    if depth == 0 {
        return Err(PatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "Path must name a file inside the dependency root".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PatcherError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_placeholder(field_name: &str, args: &[String], placeholder: &str) -> Result<()> {
    if !args.iter().any(|arg| arg.contains(placeholder)) {
        return Err(PatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: args.join(" "),
            reason: format!("Arguments must reference {}", placeholder),
        });
    }
    Ok(())
}

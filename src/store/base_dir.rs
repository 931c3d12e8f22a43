//! 平台基础目录解析

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store::core::StoreError;

/// DataStore 的根目录来源
///
/// - `Roaming`: 漫游应用数据目录（`dirs::data_dir()`，Windows 下为 `%APPDATA%`）
/// - `Local`: 本地应用数据目录（`dirs::data_local_dir()`，Windows 下为 `%LOCALAPPDATA%`）
/// - `Custom`: 指定目录
///
/// Linux/macOS 上 `Roaming` 与 `Local` 通常指向同一个目录。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseDir {
    #[default]
    Roaming,
    Local,
    Custom(PathBuf),
}

impl BaseDir {
    /// 解析为绝对路径
    pub fn resolve(&self) -> Result<PathBuf, StoreError> {
        let dir = match self {
            BaseDir::Roaming => dirs::data_dir(),
            BaseDir::Local => dirs::data_local_dir(),
            BaseDir::Custom(path) => Some(path.clone()),
        };
        let dir = dir.ok_or_else(|| StoreError::NoBaseDirectory(self.clone()))?;

        // 相对路径以当前工作目录为基准
        if dir.is_absolute() {
            Ok(dir)
        } else {
            std::path::absolute(&dir).map_err(|e| StoreError::io(dir, e))
        }
    }
}

impl From<PathBuf> for BaseDir {
    fn from(path: PathBuf) -> Self {
        BaseDir::Custom(path)
    }
}

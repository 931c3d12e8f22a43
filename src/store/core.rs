use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::serializer::SerializerError;
use crate::store::base_dir::BaseDir;

/// 可持久化实体
///
/// 实体只需要暴露一个 `u64` 唯一标识，DataStore 用它生成存储键 `<id>.<ext>`，
/// 不解释实体的其他内容。
///
/// # 示例
/// ```
/// use rustx_datastore::Entity;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Widget {
///     id: u64,
///     name: String,
/// }
///
/// impl Entity for Widget {
///     fn id(&self) -> u64 {
///         self.id
///     }
/// }
/// ```
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// 实体在所属 DataStore 目录内的唯一标识
    fn id(&self) -> u64;
}

/// DataStore 相关错误
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid name {0:?}: must be a single non-empty path component")]
    InvalidName(String),
    #[error("Failed to resolve base directory {0:?}")]
    NoBaseDirectory(BaseDir),
    #[error("Store directory {} was deleted; re-create the store before using it", .0.display())]
    StoreDeleted(PathBuf),
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize entity {id}: {source}")]
    Serialize {
        id: u64,
        #[source]
        source: SerializerError,
    },
    #[error("Failed to deserialize {}: {source}", path.display())]
    Deserialize {
        path: PathBuf,
        #[source]
        source: SerializerError,
    },
    #[error("Invalid config: {0}")]
    Config(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// 校验目录名：必须是单个非空路径组件
pub(crate) fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// 校验子存储目录名：除单个路径组件外，还不能形如 `<u64>.<ext>`，
/// 否则子目录会占用同名实体的存储键
pub(crate) fn validate_sub_name(name: &str, extension: &str) -> Result<(), StoreError> {
    validate_name(name)?;

    let collides = name
        .strip_suffix(extension)
        .and_then(|stem| stem.strip_suffix('.'))
        .is_some_and(|id| id.parse::<u64>().is_ok_and(|n| n.to_string() == id));
    if collides {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

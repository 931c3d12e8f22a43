use anyhow::Result;
use garde::Validate;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use crate::cfg::TypeOptions;
use crate::store::base_dir::BaseDir;

/// DataStore 配置
///
/// # 示例
/// ```
/// use rustx_datastore::{BaseDir, DataStoreConfig};
///
/// let config = DataStoreConfig::from_toml(r#"
/// app_name = "myapp"
/// store_name = "widgets"
/// base_dir = "local"
///
/// [serializer]
/// type = "JsonSerializer"
/// options = { pretty = false }
/// "#).unwrap();
///
/// assert_eq!(config.base_dir, BaseDir::Local);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SmartDefault, Validate)]
#[serde(default)]
pub struct DataStoreConfig {
    /// 应用名，对应目录 `<base>/.<app_name>`
    #[garde(length(min = 1), pattern(r"^[^/\\]+$"), custom(not_dot_name))]
    pub app_name: String,

    /// 存储名，对应目录 `<base>/.<app_name>/<store_name>`
    #[garde(length(min = 1), pattern(r"^[^/\\]+$"), custom(not_dot_name))]
    pub store_name: String,

    /// 根目录，默认漫游应用数据目录
    #[garde(skip)]
    pub base_dir: BaseDir,

    /// 序列化器，默认缩进 JSON
    #[default(TypeOptions::new("JsonSerializer", serde_json::json!({ "pretty": true })))]
    #[garde(skip)]
    pub serializer: TypeOptions,
}

// 名称必须是单个路径组件，`.` / `..` 会逃逸出应用目录
fn not_dot_name(value: &str, _: &()) -> garde::Result {
    if value == "." || value == ".." {
        return Err(garde::Error::new("must not be a relative path component"));
    }
    Ok(())
}

impl DataStoreConfig {
    pub fn new(app_name: impl Into<String>, store_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            store_name: store_name.into(),
            ..Default::default()
        }
    }

    /// 从 JSON 字符串加载（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(json5::from_str(json_str)?)
    }

    /// 从 YAML 字符串加载
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// 从 TOML 字符串加载
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

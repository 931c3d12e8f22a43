use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use crate::serializer::core::{Serializer, SerializerError};

/// JSON 序列化器配置
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, SmartDefault)]
#[serde(default)]
pub struct JsonSerializerConfig {
    /// 是否格式化输出（美化 JSON），默认开启，方便人工查看落盘文件
    #[default = true]
    pub pretty: bool,
}

/// JSON 序列化器
///
/// 支持任意实现了 Serialize + DeserializeOwned 的类型与字节数组之间的序列化。
/// DataStore 的默认序列化器。
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    config: JsonSerializerConfig,
}

impl JsonSerializer {
    /// 创建 JSON 序列化器
    ///
    /// # 参数
    /// * `config` - JSON 序列化器配置
    pub fn new(config: JsonSerializerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JsonSerializerConfig {
        &self.config
    }
}

impl Serializer for JsonSerializer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn serialize<T>(&self, from: &T) -> Result<Vec<u8>, SerializerError>
    where
        T: Serialize,
    {
        if self.config.pretty {
            serde_json::to_vec_pretty(from)
                .map_err(|e| SerializerError::SerializationFailed(e.to_string()))
        } else {
            serde_json::to_vec(from).map_err(|e| SerializerError::SerializationFailed(e.to_string()))
        }
    }

    fn deserialize<T>(&self, to: &[u8]) -> Result<Option<T>, SerializerError>
    where
        T: DeserializeOwned,
    {
        // 顶层 null 视为空值
        serde_json::from_slice::<Option<T>>(to)
            .map_err(|e| SerializerError::DeserializationFailed(e.to_string()))
    }
}

impl From<JsonSerializerConfig> for JsonSerializer {
    fn from(config: JsonSerializerConfig) -> Self {
        JsonSerializer::new(config)
    }
}

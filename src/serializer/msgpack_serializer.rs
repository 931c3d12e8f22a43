use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use crate::serializer::core::{Serializer, SerializerError};

/// MessagePack 序列化器配置
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, SmartDefault)]
#[serde(default)]
pub struct MsgPackSerializerConfig {
    /// 是否使用命名字段（struct字段名）
    #[default = true]
    pub named: bool,
}

/// MessagePack 序列化器
///
/// MessagePack 是一种紧凑的二进制序列化格式，适合体积敏感的实体
#[derive(Debug, Clone, Default)]
pub struct MsgPackSerializer {
    config: MsgPackSerializerConfig,
}

impl MsgPackSerializer {
    /// 创建 MessagePack 序列化器
    ///
    /// # 参数
    /// * `config` - MessagePack 序列化器配置
    pub fn new(config: MsgPackSerializerConfig) -> Self {
        Self { config }
    }
}

impl Serializer for MsgPackSerializer {
    fn extension(&self) -> &'static str {
        "msgpack"
    }

    fn serialize<T>(&self, from: &T) -> Result<Vec<u8>, SerializerError>
    where
        T: Serialize,
    {
        if self.config.named {
            rmp_serde::to_vec_named(from)
                .map_err(|e| SerializerError::SerializationFailed(e.to_string()))
        } else {
            rmp_serde::to_vec(from).map_err(|e| SerializerError::SerializationFailed(e.to_string()))
        }
    }

    fn deserialize<T>(&self, to: &[u8]) -> Result<Option<T>, SerializerError>
    where
        T: DeserializeOwned,
    {
        // nil 视为空值
        rmp_serde::from_slice::<Option<T>>(to)
            .map_err(|e| SerializerError::DeserializationFailed(e.to_string()))
    }
}

impl From<MsgPackSerializerConfig> for MsgPackSerializer {
    fn from(config: MsgPackSerializerConfig) -> Self {
        MsgPackSerializer::new(config)
    }
}

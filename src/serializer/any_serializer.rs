use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cfg::TypeOptions;
use crate::serializer::core::{Serializer, SerializerError};
use crate::serializer::{
    BsonSerializer, BsonSerializerConfig, JsonSerializer, JsonSerializerConfig, MsgPackSerializer,
    MsgPackSerializerConfig,
};

/// 按配置选择的序列化器
///
/// 由 `TypeOptions` 构造，`type` 字段取值：
/// - `JsonSerializer`
/// - `MsgPackSerializer`
/// - `BsonSerializer`
///
/// # 示例
/// ```
/// use rustx_datastore::cfg::TypeOptions;
/// use rustx_datastore::serializer::{AnySerializer, Serializer};
///
/// let opts = TypeOptions::from_json(r#"{ "type": "MsgPackSerializer", options: { named: true } }"#).unwrap();
/// let serializer = AnySerializer::from_type_options(&opts).unwrap();
/// assert_eq!(serializer.extension(), "msgpack");
/// ```
#[derive(Debug, Clone)]
pub enum AnySerializer {
    Json(JsonSerializer),
    MsgPack(MsgPackSerializer),
    Bson(BsonSerializer),
}

impl AnySerializer {
    pub fn from_type_options(opts: &TypeOptions) -> Result<Self, SerializerError> {
        // options 缺省（null）时使用各格式的默认配置
        let options = if opts.options.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            opts.options.clone()
        };
        let invalid = |e: serde_json::Error| SerializerError::InvalidOptions(e.to_string());

        match opts.type_name.as_str() {
            "JsonSerializer" => {
                let config: JsonSerializerConfig = serde_json::from_value(options).map_err(invalid)?;
                Ok(AnySerializer::Json(JsonSerializer::new(config)))
            }
            "MsgPackSerializer" => {
                let config: MsgPackSerializerConfig =
                    serde_json::from_value(options).map_err(invalid)?;
                Ok(AnySerializer::MsgPack(MsgPackSerializer::new(config)))
            }
            "BsonSerializer" => {
                let config: BsonSerializerConfig = serde_json::from_value(options).map_err(invalid)?;
                Ok(AnySerializer::Bson(BsonSerializer::new(config)))
            }
            other => Err(SerializerError::UnknownType(other.to_string())),
        }
    }
}

impl Default for AnySerializer {
    fn default() -> Self {
        AnySerializer::Json(JsonSerializer::default())
    }
}

impl TryFrom<&TypeOptions> for AnySerializer {
    type Error = SerializerError;

    fn try_from(opts: &TypeOptions) -> Result<Self, Self::Error> {
        AnySerializer::from_type_options(opts)
    }
}

impl Serializer for AnySerializer {
    fn extension(&self) -> &'static str {
        match self {
            AnySerializer::Json(s) => s.extension(),
            AnySerializer::MsgPack(s) => s.extension(),
            AnySerializer::Bson(s) => s.extension(),
        }
    }

    fn serialize<T>(&self, from: &T) -> Result<Vec<u8>, SerializerError>
    where
        T: Serialize,
    {
        match self {
            AnySerializer::Json(s) => s.serialize(from),
            AnySerializer::MsgPack(s) => s.serialize(from),
            AnySerializer::Bson(s) => s.serialize(from),
        }
    }

    fn deserialize<T>(&self, to: &[u8]) -> Result<Option<T>, SerializerError>
    where
        T: DeserializeOwned,
    {
        match self {
            AnySerializer::Json(s) => s.deserialize(to),
            AnySerializer::MsgPack(s) => s.deserialize(to),
            AnySerializer::Bson(s) => s.deserialize(to),
        }
    }
}

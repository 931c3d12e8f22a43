use crate::serializer::core::{Serializer, SerializerError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// BSON 序列化器配置
///
/// BSON 只有有符号整数，`u64` 字段（包括实体 id）超过 `i64::MAX` 时无法序列化，
/// 需要完整 `u64` 范围时请使用 JSON 或 MessagePack。
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct BsonSerializerConfig {}

/// BSON 序列化器
///
/// BSON（Binary JSON）是 MongoDB 使用的二进制序列化格式。
/// 顶层必须是文档，因此不存在"空值"，解码结果要么是实体要么是错误。
///
/// # 限制
///
/// BSON 没有无符号整数类型，`u64` 按 `Int64` 写入。值大于 `i64::MAX` 的 `u64` 字段
/// （包括实体 id）序列化失败，返回 `SerializerError::SerializationFailed`。
#[derive(Debug, Clone, Default)]
pub struct BsonSerializer {}

impl BsonSerializer {
    pub fn new(_: BsonSerializerConfig) -> Self {
        Self {}
    }
}

impl Serializer for BsonSerializer {
    fn extension(&self) -> &'static str {
        "bson"
    }

    fn serialize<T>(&self, from: &T) -> Result<Vec<u8>, SerializerError>
    where
        T: Serialize,
    {
        // 先序列化为 BSON Document，再写成字节
        let doc = bson::to_document(from)
            .map_err(|e| SerializerError::SerializationFailed(e.to_string()))?;

        let mut buf = Vec::new();
        doc.to_writer(&mut buf)
            .map_err(|e| SerializerError::SerializationFailed(e.to_string()))?;

        Ok(buf)
    }

    fn deserialize<T>(&self, to: &[u8]) -> Result<Option<T>, SerializerError>
    where
        T: DeserializeOwned,
    {
        let doc = bson::Document::from_reader(to)
            .map_err(|e| SerializerError::DeserializationFailed(e.to_string()))?;

        bson::from_document(doc)
            .map(Some)
            .map_err(|e| SerializerError::DeserializationFailed(e.to_string()))
    }
}

impl From<BsonSerializerConfig> for BsonSerializer {
    fn from(config: BsonSerializerConfig) -> Self {
        BsonSerializer::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
    struct TestData {
        id: u64,
        name: String,
        tags: Vec<String>,
    }

    #[test]
    fn test_bson_serializer() {
        let serializer = BsonSerializer::default();

        let data = TestData {
            id: 42,
            name: "Alice".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
        };

        let bytes = serializer.serialize(&data).unwrap();
        let deserialized: Option<TestData> = serializer.deserialize(&bytes).unwrap();

        assert_eq!(Some(data), deserialized);
    }

    #[test]
    fn test_bson_u64_limit() {
        let serializer = BsonSerializer::default();

        let in_range = TestData {
            id: 1 << 62,
            name: "large".to_string(),
            tags: vec![],
        };
        let bytes = serializer.serialize(&in_range).unwrap();
        assert_eq!(serializer.deserialize(&bytes).unwrap(), Some(in_range));

        let over_limit = TestData {
            id: i64::MAX as u64 + 1,
            name: "over".to_string(),
            tags: vec![],
        };
        let result = serializer.serialize(&over_limit);
        assert!(matches!(result, Err(SerializerError::SerializationFailed(_))));
    }

    #[test]
    fn test_bson_truncated_is_error() {
        let serializer = BsonSerializer::default();
        let result = serializer.deserialize::<TestData>(&[0x05, 0x00]);
        assert!(matches!(result, Err(SerializerError::DeserializationFailed(_))));
    }
}

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// 序列化相关错误
#[derive(Error, Debug)]
pub enum SerializerError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),
    #[error("Unknown serializer type: {0}")]
    UnknownType(String),
    #[error("Invalid serializer options: {0}")]
    InvalidOptions(String),
}

/// 核心序列化 trait
///
/// 负责实体与字节之间的编解码，配置（如是否美化输出）由实现自身持有，
/// DataStore 不解释这些配置，只负责透传。
///
/// 反序列化需要区分两种情况：
/// - `Ok(None)`: 数据合法但表示"空值"（如 JSON 的 `null`）
/// - `Err(_)`: 数据无法解析为目标类型
pub trait Serializer: Clone + Send + Sync {
    /// 该格式的规范文件扩展名（不含点），用于生成存储键 `<id>.<ext>`
    fn extension(&self) -> &'static str;

    /// 序列化：将实体编码为字节
    fn serialize<T>(&self, from: &T) -> Result<Vec<u8>, SerializerError>
    where
        T: Serialize;

    /// 反序列化：将字节解码为实体，空值返回 `None`
    fn deserialize<T>(&self, to: &[u8]) -> Result<Option<T>, SerializerError>
    where
        T: DeserializeOwned;
}

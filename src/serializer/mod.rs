pub mod any_serializer;
pub mod bson_serializer;
pub mod core;
pub mod json_serializer;
pub mod msgpack_serializer;

// 重新导出核心类型和 trait
pub use core::{Serializer, SerializerError};

// 重新导出具体的序列化器
pub use any_serializer::AnySerializer;
pub use bson_serializer::{BsonSerializer, BsonSerializerConfig};
pub use json_serializer::{JsonSerializer, JsonSerializerConfig};
pub use msgpack_serializer::{MsgPackSerializer, MsgPackSerializerConfig};

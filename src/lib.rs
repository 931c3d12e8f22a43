//! RustX DataStore - 基于文件的实体持久化
//!
//! 每个实体（`Entity`）序列化为一个以其 `u64` 标识命名的独立文件，
//! 存放在 `<base>/.<app_name>/<store_name>/` 目录下。
//!
//! ## 模块
//!
//! - **store**: `DataStore` 及子存储、根目录解析、配置
//! - **serializer**: 序列化器抽象（JSON、MessagePack、BSON）
//! - **cfg**: 按名称选择实现的 `TypeOptions`
//!
//! ## 示例
//!
//! ```no_run
//! use rustx_datastore::{DataStore, Entity};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Widget {
//!     id: u64,
//!     name: String,
//! }
//!
//! impl Entity for Widget {
//!     fn id(&self) -> u64 {
//!         self.id
//!     }
//! }
//!
//! # async fn run() -> Result<(), rustx_datastore::StoreError> {
//! let store: DataStore<Widget> = DataStore::new("myapp", "widgets")?;
//! store.save(&Widget { id: 7, name: "foo".to_string() }).await?;
//! assert!(store.read(7).await?.is_some());
//! assert!(store.read(8).await?.is_none());
//! # Ok(())
//! # }
//! ```

pub mod cfg;
pub mod serializer;
pub mod store;

// 重新导出主要的公共 API
pub use cfg::TypeOptions;

pub use serializer::{
    AnySerializer, BsonSerializer, BsonSerializerConfig, JsonSerializer, JsonSerializerConfig,
    MsgPackSerializer, MsgPackSerializerConfig, Serializer, SerializerError,
};

pub use store::{BaseDir, DataStore, DataStoreConfig, Entity, StoreError};

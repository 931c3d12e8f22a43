pub mod base_dir;
pub mod config;
pub mod core;
pub mod data_store;

// 重新导出核心类型和 trait
pub use base_dir::BaseDir;
pub use config::DataStoreConfig;
pub use core::{Entity, StoreError};
pub use data_store::DataStore;

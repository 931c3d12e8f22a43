//! cfg 模块 - 配置管理
//!
//! 提供按名称选择实现的 `TypeOptions`，支持 JSON5 / YAML / TOML 三种来源

pub mod type_options;

pub use type_options::TypeOptions;

//! 基于文件的实体存储
//!
//! 每个实体序列化为一个独立文件，文件名即存储键 `<id>.<ext>`。
//!
//! # 目录布局
//!
//! ```text
//! <base>/.<app_name>/<store_name>/
//! ├── 7.json              # 实体文件
//! ├── 8.json
//! └── <sub_name>/         # 子存储，独立的 id 命名空间
//!     └── 7.json
//! ```

use std::fmt;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::serializer::{AnySerializer, JsonSerializer, Serializer};
use crate::store::base_dir::BaseDir;
use crate::store::config::DataStoreConfig;
use crate::store::core::{validate_name, validate_sub_name, Entity, StoreError};

/// 目录级别的实体存储
///
/// 一个 `DataStore` 只存放一种实体类型 `T`，序列化格式由 `S` 决定（默认 JSON）。
/// 存储不做任何加锁，同一个 id 的并发写入以文件系统的语义为准（通常后写者胜出）。
pub struct DataStore<T, S = JsonSerializer> {
    location: PathBuf,
    serializer: S,
    _phantom: PhantomData<fn() -> T>,
}

// 手动实现，避免 derive 给实体类型 T 加上 Clone / Debug 约束
impl<T, S: Clone> Clone for DataStore<T, S> {
    fn clone(&self) -> Self {
        Self {
            location: self.location.clone(),
            serializer: self.serializer.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T, S: fmt::Debug> fmt::Debug for DataStore<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStore")
            .field("location", &self.location)
            .field("serializer", &self.serializer)
            .finish()
    }
}

impl<T, S> DataStore<T, S>
where
    T: Entity,
    S: Serializer + Default,
{
    /// 在漫游应用数据目录下创建存储：`<data_dir>/.<app_name>/<store_name>`
    pub fn new(app_name: &str, store_name: &str) -> Result<Self, StoreError> {
        Self::open(app_name, store_name, &BaseDir::Roaming, S::default())
    }

    /// 在本地应用数据目录下创建存储：`<data_local_dir>/.<app_name>/<store_name>`
    pub fn new_local(app_name: &str, store_name: &str) -> Result<Self, StoreError> {
        Self::open(app_name, store_name, &BaseDir::Local, S::default())
    }
}

impl<T> DataStore<T, AnySerializer>
where
    T: Entity,
{
    /// 根据配置创建存储，序列化器由 `config.serializer` 选择
    ///
    /// # 示例
    /// ```no_run
    /// use rustx_datastore::{DataStore, DataStoreConfig, Entity};
    /// # use serde::{Deserialize, Serialize};
    /// # #[derive(Serialize, Deserialize)]
    /// # struct Widget { id: u64 }
    /// # impl Entity for Widget { fn id(&self) -> u64 { self.id } }
    ///
    /// let config = DataStoreConfig::from_yaml(r#"
    /// app_name: myapp
    /// store_name: widgets
    /// serializer:
    ///   type: MsgPackSerializer
    ///   options: { named: true }
    /// "#).unwrap();
    ///
    /// let store: DataStore<Widget, _> = DataStore::from_config(&config).unwrap();
    /// ```
    pub fn from_config(config: &DataStoreConfig) -> Result<Self, StoreError> {
        garde::Validate::validate(config).map_err(|e| StoreError::Config(e.to_string()))?;
        let serializer = AnySerializer::from_type_options(&config.serializer)
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Self::open(&config.app_name, &config.store_name, &config.base_dir, serializer)
    }
}

impl<T, S> DataStore<T, S>
where
    T: Entity,
    S: Serializer,
{
    /// 在指定根目录下创建存储：`<base>/.<app_name>/<store_name>`
    ///
    /// 应用目录和存储目录不存在时自动创建；已存在时不会修改其中的内容。
    pub fn open(
        app_name: &str,
        store_name: &str,
        base: &BaseDir,
        serializer: S,
    ) -> Result<Self, StoreError> {
        validate_name(app_name)?;
        validate_name(store_name)?;

        let app_dir = base.resolve()?.join(format!(".{}", app_name));
        Self::under(&app_dir, store_name, serializer)
    }

    /// 在任意父目录下以原始名称创建存储，父目录与最终目录都会被确保存在
    fn under(parent: &Path, name: &str, serializer: S) -> Result<Self, StoreError> {
        validate_name(name)?;

        ensure_dir(parent)?;
        let location = parent.join(name);
        ensure_dir(&location)?;

        Ok(Self {
            location,
            serializer,
            _phantom: PhantomData,
        })
    }

    /// 存储所在目录
    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// id 对应的存储文件路径 `<location>/<id>.<ext>`
    pub fn key_path(&self, id: u64) -> PathBuf {
        self.location.join(format!("{}.{}", id, self.serializer.extension()))
    }

    /// 保存实体，已存在的同 id 文件会被覆盖
    pub async fn save(&self, entity: &T) -> Result<(), StoreError> {
        self.ensure_present().await?;

        let id = entity.id();
        let bytes = self
            .serializer
            .serialize(entity)
            .map_err(|source| StoreError::Serialize { id, source })?;

        let path = self.key_path(id);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StoreError::io(&path, e))
    }

    /// 读取实体，文件不存在时返回 `Ok(None)`
    ///
    /// 文件存在但无法解码时，先记录错误日志，再将错误返回给调用方。
    pub async fn read(&self, id: u64) -> Result<Option<T>, StoreError> {
        self.ensure_present().await?;

        let path = self.key_path(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        match self.serializer.deserialize(&bytes) {
            Ok(entity) => Ok(entity),
            Err(source) => {
                log::error!("failed to deserialize {}: {}", path.display(), source);
                Err(StoreError::Deserialize { path, source })
            }
        }
    }

    /// 读取目录下的所有实体（不递归，子存储目录会被跳过）
    ///
    /// - 指向文件的符号链接按实体文件处理，悬空链接被跳过
    /// - 解码为空值的文件被跳过
    /// - 无法解码的文件记录 warn 日志后跳过，不影响其他实体
    /// - 枚举过程中被删除的文件被跳过
    ///
    /// 返回顺序取决于文件系统的枚举顺序，不保证稳定。
    pub async fn read_all(&self) -> Result<Vec<T>, StoreError> {
        self.ensure_present().await?;

        let mut entries = tokio::fs::read_dir(&self.location)
            .await
            .map_err(|e| StoreError::io(&self.location, e))?;

        let mut entities = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&self.location, e))?
        {
            let path = entry.path();
            // metadata 会跟随符号链接，指向文件的链接也算作实体文件
            let meta = match tokio::fs::metadata(&path).await {
                Ok(meta) => meta,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::io(&path, e)),
            };
            if !meta.is_file() {
                continue;
            }

            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("file removed during enumeration: {}", path.display());
                    continue;
                }
                Err(e) => return Err(StoreError::io(&path, e)),
            };

            match self.serializer.deserialize(&bytes) {
                Ok(Some(entity)) => entities.push(entity),
                Ok(None) => log::debug!("skip empty entity: {}", path.display()),
                Err(e) => log::warn!("skip undecodable file {}: {}", path.display(), e),
            }
        }

        Ok(entities)
    }

    /// 判断 id 对应的文件是否存在
    pub async fn contains(&self, id: u64) -> Result<bool, StoreError> {
        self.ensure_present().await?;

        let path = self.key_path(id);
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))
    }

    /// 删除实体，文件不存在时静默成功
    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.ensure_present().await?;

        let path = self.key_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    /// 递归删除整个存储目录（包括所有子存储）
    ///
    /// 删除后该实例的其他操作都会返回 `StoreError::StoreDeleted`，
    /// 需要重新构造存储才能继续使用。目录已不存在时静默成功。
    pub async fn delete_all(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_dir_all(&self.location).await {
            Ok(()) => {
                log::info!("deleted store directory: {}", self.location.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&self.location, e)),
        }
    }

    /// 将当前存储重新指向子目录 `<location>/<name>`
    ///
    /// 原目录被放弃但不会被删除。需要 `&mut self`，调用期间不能存在其他引用。
    /// 当前存储已被 `delete_all` 删除时返回 `StoreError::StoreDeleted`。
    #[deprecated(note = "use `sub_store`, which leaves this store unchanged")]
    pub fn make_sub_store(&mut self, name: &str) -> Result<(), StoreError> {
        validate_sub_name(name, self.serializer.extension())?;
        self.check_present()?;

        let location = self.location.join(name);
        ensure_dir(&location)?;
        self.location = location;
        Ok(())
    }
}

impl<T, S> DataStore<T, S>
where
    S: Serializer,
{
    /// 创建子存储 `<location>/<name>`，继承序列化配置，当前存储不受影响
    ///
    /// 子存储拥有独立的 id 命名空间，可以存放与父存储不同类型的实体。
    /// 名称不能形如 `<id>.<ext>`，否则会占用同名实体的存储键。
    /// 当前存储已被 `delete_all` 删除时返回 `StoreError::StoreDeleted`，不会重建父目录。
    pub fn sub_store<U>(&self, name: &str) -> Result<DataStore<U, S>, StoreError>
    where
        U: Entity,
    {
        validate_sub_name(name, self.serializer.extension())?;
        self.check_present()?;

        let sub = DataStore::<U, S>::under(&self.location, name, self.serializer.clone())?;
        log::debug!("created sub store: {}", sub.location.display());
        Ok(sub)
    }

    async fn ensure_present(&self) -> Result<(), StoreError> {
        self.presence(tokio::fs::metadata(&self.location).await)
    }

    fn check_present(&self) -> Result<(), StoreError> {
        self.presence(std::fs::metadata(&self.location))
    }

    fn presence(&self, meta: io::Result<std::fs::Metadata>) -> Result<(), StoreError> {
        match meta {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StoreError::StoreDeleted(self.location.clone())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::StoreDeleted(self.location.clone()))
            }
            Err(e) => Err(StoreError::io(&self.location, e)),
        }
    }
}

fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|e| StoreError::io(path, e))?;
    log::debug!("created directory: {}", path.display());
    Ok(())
}

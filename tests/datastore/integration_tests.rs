#[cfg(test)]
mod integration_tests {
    use anyhow::Result;
    use rustx_datastore::{
        BaseDir, DataStore, DataStoreConfig, Entity, JsonSerializer, Serializer, StoreError,
    };
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    struct Account {
        id: u64,
        owner: String,
        balance: i64,
        #[serde(default)]
        labels: HashMap<String, String>,
    }

    impl Entity for Account {
        fn id(&self) -> u64 {
            self.id
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    struct Transfer {
        id: u64,
        from: u64,
        to: u64,
        amount: i64,
    }

    impl Entity for Transfer {
        fn id(&self) -> u64 {
            self.id
        }
    }

    fn account(id: u64, owner: &str, balance: i64) -> Account {
        Account {
            id,
            owner: owner.to_string(),
            balance,
            labels: HashMap::new(),
        }
    }

    fn custom_config(temp: &TempDir, yaml_serializer: &str) -> Result<DataStoreConfig> {
        let yaml = format!(
            "app_name: bank\nstore_name: accounts\nbase_dir:\n  custom: {}\n{}",
            temp.path().display(),
            yaml_serializer
        );
        DataStoreConfig::from_yaml(&yaml)
    }

    #[tokio::test]
    async fn test_layout_on_disk() -> Result<()> {
        let temp = TempDir::new()?;
        let base = BaseDir::Custom(temp.path().to_path_buf());
        let store: DataStore<Account> =
            DataStore::open("bank", "accounts", &base, JsonSerializer::default())?;

        store.save(&account(1, "alice", 100)).await?;

        let expected = temp.path().join(".bank").join("accounts").join("1.json");
        assert!(expected.is_file());

        // 落盘内容就是实体本身，无封装
        let on_disk: Account = serde_json::from_slice(&std::fs::read(&expected)?)?;
        assert_eq!(on_disk, account(1, "alice", 100));
        Ok(())
    }

    #[tokio::test]
    async fn test_enumeration_completeness() -> Result<()> {
        let temp = TempDir::new()?;
        let base = BaseDir::Custom(temp.path().to_path_buf());
        let store: DataStore<Account> =
            DataStore::open("bank", "accounts", &base, JsonSerializer::default())?;

        let mut saved = Vec::new();
        for id in 0..50u64 {
            let mut acc = account(id * 1_000_003, &format!("owner-{}", id), id as i64 * 10);
            acc.labels.insert("tier".to_string(), (id % 3).to_string());
            store.save(&acc).await?;
            saved.push(acc);
        }

        let mut loaded = store.read_all().await?;
        loaded.sort_by_key(|a| a.id);
        assert_eq!(loaded, saved);
        Ok(())
    }

    #[tokio::test]
    async fn test_from_config_msgpack() -> Result<()> {
        let temp = TempDir::new()?;
        let config = custom_config(
            &temp,
            "serializer:\n  type: MsgPackSerializer\n  options:\n    named: true\n",
        )?;

        let store: DataStore<Account, _> = DataStore::from_config(&config)?;
        assert_eq!(store.serializer().extension(), "msgpack");

        store.save(&account(5, "carol", -20)).await?;
        assert!(store.location().join("5.msgpack").is_file());
        assert_eq!(store.read(5).await?, Some(account(5, "carol", -20)));

        // 子存储继承序列化配置
        let transfers: DataStore<Transfer, _> = store.sub_store("transfers")?;
        let transfer = Transfer {
            id: 1,
            from: 5,
            to: 6,
            amount: 20,
        };
        transfers.save(&transfer).await?;
        assert!(transfers.location().join("1.msgpack").is_file());
        assert_eq!(transfers.read(1).await?, Some(transfer));
        Ok(())
    }

    #[test]
    fn test_from_config_rejects_invalid() -> Result<()> {
        let temp = TempDir::new()?;

        let mut config = custom_config(&temp, "")?;
        config.store_name = "../outside".to_string();
        let result: Result<DataStore<Account, _>, _> = DataStore::from_config(&config);
        assert!(matches!(result, Err(StoreError::Config(_))));

        let config = custom_config(&temp, "serializer:\n  type: CsvSerializer\n")?;
        let result: Result<DataStore<Account, _>, _> = DataStore::from_config(&config);
        assert!(matches!(result, Err(StoreError::Config(msg)) if msg.contains("CsvSerializer")));

        // 校验失败不应创建目录
        assert!(!temp.path().join(".bank").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_shared_store_concurrent_distinct_ids() -> Result<()> {
        let temp = TempDir::new()?;
        let base = BaseDir::Custom(temp.path().to_path_buf());
        let store: Arc<DataStore<Account>> = Arc::new(DataStore::open(
            "bank",
            "accounts",
            &base,
            JsonSerializer::default(),
        )?);

        let mut handles = Vec::new();
        for id in 0..16u64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.save(&account(id, "concurrent", id as i64)).await
            }));
        }
        for handle in handles {
            handle.await??;
        }

        assert_eq!(store.read_all().await?.len(), 16);
        Ok(())
    }

    #[tokio::test]
    async fn test_nested_sub_stores_and_delete_all() -> Result<()> {
        let temp = TempDir::new()?;
        let base = BaseDir::Custom(temp.path().to_path_buf());
        let root: DataStore<Account> =
            DataStore::open("bank", "accounts", &base, JsonSerializer::default())?;
        let year: DataStore<Transfer> = root.sub_store("2026")?;
        let month: DataStore<Transfer> = year.sub_store("10")?;

        assert_eq!(month.location(), root.location().join("2026").join("10"));

        month
            .save(&Transfer {
                id: 9,
                from: 1,
                to: 2,
                amount: 3,
            })
            .await?;
        assert!(year.read_all().await?.is_empty());
        assert!(root.read(9).await?.is_none());

        // 删除中间层会连带删除更深的子存储
        year.delete_all().await?;
        assert!(root.location().is_dir());
        assert!(matches!(month.read(9).await, Err(StoreError::StoreDeleted(_))));
        Ok(())
    }
}

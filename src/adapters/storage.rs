use crate::domain::model::{ParameterPatch, ParameterRecord, SigmoidParameters};
use crate::domain::ports::ParameterStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<u64, ParameterRecord>,
    next_id: u64,
}

impl Table {
    fn from_records(records: Vec<ParameterRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let rows = records.into_iter().map(|r| (r.id, r)).collect();
        Self { rows, next_id }
    }

    fn insert(&mut self, params: SigmoidParameters) -> ParameterRecord {
        // id 從 1 開始
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let record = ParameterRecord {
            id,
            x_shift: params.x_shift,
            steepness: params.steepness,
            created_at: Utc::now(),
        };
        self.rows.insert(id, record.clone());
        record
    }

    fn newest_first(&self) -> Vec<ParameterRecord> {
        let mut records: Vec<ParameterRecord> = self.rows.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        records
    }

    fn update(&mut self, id: u64, patch: ParameterPatch) -> Option<ParameterRecord> {
        let record = self.rows.get_mut(&id)?;
        patch.apply(record);
        Some(record.clone())
    }
}

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    table: RwLock<Table>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParameterStore for InMemoryStore {
    async fn create(&self, params: SigmoidParameters) -> Result<ParameterRecord> {
        Ok(self.table.write().await.insert(params))
    }

    async fn get(&self, id: u64) -> Result<Option<ParameterRecord>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<ParameterRecord>> {
        Ok(self.table.read().await.newest_first())
    }

    async fn update(&self, id: u64, patch: ParameterPatch) -> Result<Option<ParameterRecord>> {
        Ok(self.table.write().await.update(id, patch))
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}

/// Keeps records in a JSON array on disk, rewritten after every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    table: Mutex<Table>,
}

impl JsonFileStore {
    /// 開啟既有檔案；檔案不存在時視為空表
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<ParameterRecord> = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            "📁 Loaded {} parameter records from {}",
            records.len(),
            path.display()
        );

        Ok(Self {
            path,
            table: Mutex::new(Table::from_records(records)),
        })
    }

    async fn flush(&self, table: &Table) -> Result<()> {
        let records: Vec<&ParameterRecord> = table.rows.values().collect();
        let data = serde_json::to_vec_pretty(&records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // 先寫暫存檔再改名，避免寫到一半的檔案
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, data).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                tracing::warn!(
                    "Could not remove {} after failed rename: {}",
                    tmp_path.display(),
                    cleanup
                );
            }
            return Err(e.into());
        }

        tracing::debug!(
            "Persisted {} records to {}",
            table.rows.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[async_trait]
impl ParameterStore for JsonFileStore {
    async fn create(&self, params: SigmoidParameters) -> Result<ParameterRecord> {
        let mut table = self.table.lock().await;
        let record = table.insert(params);
        if let Err(e) = self.flush(&table).await {
            table.rows.remove(&record.id);
            return Err(e);
        }
        Ok(record)
    }

    async fn get(&self, id: u64) -> Result<Option<ParameterRecord>> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<ParameterRecord>> {
        Ok(self.table.lock().await.newest_first())
    }

    async fn update(&self, id: u64, patch: ParameterPatch) -> Result<Option<ParameterRecord>> {
        let mut table = self.table.lock().await;
        let previous = match table.rows.get(&id) {
            Some(record) => record.clone(),
            None => return Ok(None),
        };
        let updated = table.update(id, patch);
        if let Err(e) = self.flush(&table).await {
            table.rows.insert(id, previous);
            return Err(e);
        }
        Ok(updated)
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        let mut table = self.table.lock().await;
        let removed = match table.rows.remove(&id) {
            Some(record) => record,
            None => return Ok(false),
        };
        if let Err(e) = self.flush(&table).await {
            table.rows.insert(id, removed);
            return Err(e);
        }
        Ok(true)
    }
}

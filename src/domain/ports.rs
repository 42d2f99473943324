use crate::domain::model::{ParameterPatch, ParameterRecord, SigmoidParameters};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Persistence for sigmoid parameter records.
///
/// Implementations own id assignment and `created_at`. Each call is a single
/// atomic write as far as callers are concerned.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    async fn create(&self, params: SigmoidParameters) -> Result<ParameterRecord>;
    async fn get(&self, id: u64) -> Result<Option<ParameterRecord>>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<ParameterRecord>>;
    async fn update(&self, id: u64, patch: ParameterPatch) -> Result<Option<ParameterRecord>>;
    async fn delete(&self, id: u64) -> Result<bool>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn storage_path(&self) -> Option<&str>;
    fn json_logs(&self) -> bool;
}

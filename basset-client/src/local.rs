//! In-process client over a shared `MemoryEntityStore`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use basset_entities::{
    LogRecord, NumberDataType, Observation, TimeRangeValue, Transaction,
};
use basset_store::MemoryEntityStore;

use crate::client::EntityClient;
use crate::error::ClientResult;

/// Client backed directly by an in-memory store in the same process.
#[derive(Debug, Clone)]
pub struct LocalClient {
    store: Arc<MemoryEntityStore>,
}

impl LocalClient {
    pub fn new(store: Arc<MemoryEntityStore>) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Arc<MemoryEntityStore> {
        &self.store
    }
}

impl Default for LocalClient {
    fn default() -> Self {
        Self::new(Arc::new(MemoryEntityStore::new()))
    }
}

#[async_trait]
impl EntityClient for LocalClient {
    async fn publish(&self, transaction: Transaction) -> ClientResult<()> {
        self.store.apply(&transaction)?;
        Ok(())
    }

    async fn get_latest_observation(&self, path: &str) -> ClientResult<Option<Observation>> {
        Ok(self.store.latest_observation(path)?)
    }

    async fn get_observations(&self, path: &str) -> ClientResult<Vec<Observation>> {
        Ok(self.store.observations(path)?)
    }

    async fn get_boolean(&self, path: &str) -> ClientResult<Option<bool>> {
        Ok(self.store.boolean(path)?)
    }

    async fn get_string(&self, path: &str) -> ClientResult<Option<String>> {
        Ok(self.store.string_value(path)?)
    }

    async fn get_number(&self, path: &str) -> ClientResult<Option<(NumberDataType, String)>> {
        Ok(self.store.number(path)?)
    }

    async fn get_duration(&self, path: &str) -> ClientResult<Option<i64>> {
        Ok(self.store.duration(path)?)
    }

    async fn get_reference(&self, path: &str) -> ClientResult<Option<String>> {
        Ok(self.store.reference(path)?)
    }

    async fn get_state(&self, path: &str) -> ClientResult<Option<String>> {
        Ok(self.store.state(path)?)
    }

    async fn get_assignment(&self, path: &str) -> ClientResult<Option<String>> {
        Ok(self.store.assignment(path)?)
    }

    async fn get_timestamp(&self, path: &str) -> ClientResult<Option<i64>> {
        Ok(self.store.timestamp_value(path)?)
    }

    async fn get_time_range(&self, path: &str) -> ClientResult<Option<TimeRangeValue>> {
        Ok(self.store.time_range(path)?)
    }

    async fn get_vocabulary(&self, path: &str) -> ClientResult<Option<String>> {
        Ok(self.store.vocabulary(path)?)
    }

    async fn get_set(&self, path: &str) -> ClientResult<Vec<String>> {
        Ok(self.store.set_values(path)?)
    }

    async fn get_vocabulary_set(&self, path: &str) -> ClientResult<Vec<String>> {
        Ok(self.store.vocabulary_set_terms(path)?)
    }

    async fn get_group(&self, path: &str) -> ClientResult<Vec<String>> {
        Ok(self.store.group_members(path)?)
    }

    async fn get_hash(&self, path: &str) -> ClientResult<HashMap<String, String>> {
        Ok(self.store.hash_values(path)?)
    }

    async fn get_logs(&self, path: &str) -> ClientResult<Vec<LogRecord>> {
        Ok(self.store.logs(path)?)
    }
}

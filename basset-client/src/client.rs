//! The `EntityClient` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use basset_entities::{
    Entry, LogRecord, NumberDataType, Observation, TimeRangeValue, Transaction,
};

use crate::error::ClientResult;

/// Handle to an entity host: transactional publish plus typed queries.
///
/// Implementations must be shareable across tasks (`Arc<dyn EntityClient>`);
/// every call is independent and carries no session state.
#[async_trait]
pub trait EntityClient: Send + Sync {
    /// Publishes a transaction atomically: all entries become visible to
    /// subsequent queries, or none do.
    async fn publish(&self, transaction: Transaction) -> ClientResult<()>;

    /// Convenience: wraps the entries in a transaction and publishes.
    async fn publish_entries(&self, entries: Vec<Entry>) -> ClientResult<()> {
        self.publish(Transaction::from(entries)).await
    }

    /// Latest observation at a path; `Ok(None)` when none has been recorded.
    async fn get_latest_observation(&self, path: &str) -> ClientResult<Option<Observation>>;

    /// All observations at a path, oldest first.
    async fn get_observations(&self, path: &str) -> ClientResult<Vec<Observation>>;

    async fn get_boolean(&self, path: &str) -> ClientResult<Option<bool>>;

    async fn get_string(&self, path: &str) -> ClientResult<Option<String>>;

    /// Raw number literal and its declared subtype.
    async fn get_number(&self, path: &str) -> ClientResult<Option<(NumberDataType, String)>>;

    /// Duration in nanoseconds.
    async fn get_duration(&self, path: &str) -> ClientResult<Option<i64>>;

    /// Canonical absolute path of the referenced entity.
    async fn get_reference(&self, path: &str) -> ClientResult<Option<String>>;

    /// Canonical absolute path of the current state.
    async fn get_state(&self, path: &str) -> ClientResult<Option<String>>;

    /// Canonical absolute path of the assigned member.
    async fn get_assignment(&self, path: &str) -> ClientResult<Option<String>>;

    /// Stored timestamp value, unix nanoseconds.
    async fn get_timestamp(&self, path: &str) -> ClientResult<Option<i64>>;

    async fn get_time_range(&self, path: &str) -> ClientResult<Option<TimeRangeValue>>;

    /// Canonical absolute path of the vocabulary term.
    async fn get_vocabulary(&self, path: &str) -> ClientResult<Option<String>>;

    /// Set elements in first-publish order.
    async fn get_set(&self, path: &str) -> ClientResult<Vec<String>>;

    /// Vocabulary set terms in first-publish order.
    async fn get_vocabulary_set(&self, path: &str) -> ClientResult<Vec<String>>;

    /// Group members in first-publish order.
    async fn get_group(&self, path: &str) -> ClientResult<Vec<String>>;

    /// Hash fields, latest value per field.
    async fn get_hash(&self, path: &str) -> ClientResult<HashMap<String, String>>;

    /// Log records, oldest first.
    async fn get_logs(&self, path: &str) -> ClientResult<Vec<LogRecord>>;
}

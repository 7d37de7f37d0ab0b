//! The in-memory entity host.

use std::collections::HashMap;
use std::sync::RwLock;

use basset_entities::{
    Entry, EntryPayload, LogLevel, LogRecord, NumberDataType, Observation, TimeRangeValue,
    Transaction,
};
use basset_types::{parse_duration, parse_timestamp, unix_now_nanos, EntityPath};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// A value plus the instant it was published.
#[derive(Debug, Clone)]
struct Stamped<T> {
    value: T,
    timestamp: i64,
}

/// An entry validated and normalized, ready to apply.
///
/// Building these is the first phase of [`MemoryEntityStore::apply`]; only a
/// fully validated batch ever reaches the content maps, which is what makes
/// the apply atomic.
#[derive(Debug)]
enum ResolvedOp {
    Assignment { member: String },
    Boolean { value: bool },
    Duration { nanos: i64 },
    Group { member: String },
    Hash { field: String, value: String },
    Log { level: LogLevel, message: String },
    Number { data_type: NumberDataType, value: String },
    Observation { value: String, timestamp: i64 },
    Reference { target: String },
    Set { value: String },
    State { state: String },
    String { value: String },
    TimeRange { range: TimeRangeValue },
    Timestamp { nanos: i64 },
    Vocabulary { term: String },
    VocabularySet { term: String },
}

#[derive(Debug)]
struct Resolved {
    uuid: String,
    path: String,
    timestamp: i64,
    op: ResolvedOp,
}

#[derive(Debug, Default)]
struct Content {
    /// uuid → canonical absolute path, for every path touched by a publish.
    paths: HashMap<String, String>,

    assignments: HashMap<String, Stamped<String>>,
    booleans: HashMap<String, Stamped<bool>>,
    durations: HashMap<String, Stamped<i64>>,
    numbers: HashMap<String, Stamped<(NumberDataType, String)>>,
    references: HashMap<String, Stamped<String>>,
    states: HashMap<String, Stamped<String>>,
    strings: HashMap<String, Stamped<String>>,
    time_ranges: HashMap<String, Stamped<TimeRangeValue>>,
    timestamps: HashMap<String, Stamped<i64>>,
    vocabularies: HashMap<String, Stamped<String>>,

    groups: HashMap<String, Vec<String>>,
    hashes: HashMap<String, HashMap<String, String>>,
    logs: HashMap<String, Vec<LogRecord>>,
    observations: HashMap<String, Vec<Observation>>,
    sets: HashMap<String, Vec<String>>,
    vocabulary_sets: HashMap<String, Vec<String>>,
}

/// Thread-safe in-memory entity host.
///
/// Applies transactions atomically: every entry is validated and normalized
/// before any content map is touched, so a malformed entry anywhere in the
/// batch leaves the store unchanged.
#[derive(Debug, Default)]
pub struct MemoryEntityStore {
    content: RwLock<Content>,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a transaction's publish operations as one atomic unit.
    pub fn apply(&self, transaction: &Transaction) -> StoreResult<()> {
        let now = unix_now_nanos();
        let entries = transaction.publish_operations();

        let mut resolved = Vec::with_capacity(entries.len());
        for entry in entries {
            match Self::resolve(entry, now) {
                Ok(r) => resolved.push(r),
                Err(e) => {
                    warn!(path = %entry.path, error = %e, "transaction rejected");
                    return Err(e);
                }
            }
        }

        let mut content = self.content.write().expect("store lock poisoned");
        for r in resolved {
            content.paths.insert(r.uuid.clone(), r.path);
            content.apply(r.uuid, r.timestamp, r.op);
        }
        debug!(entries = entries.len(), "transaction applied");
        Ok(())
    }

    fn resolve(entry: &Entry, now: i64) -> StoreResult<Resolved> {
        let path = EntityPath::parse(&entry.path)?;
        let timestamp = entry.timestamp.unwrap_or(now);

        let op = match &entry.payload {
            EntryPayload::Assignment { member } => ResolvedOp::Assignment {
                member: EntityPath::parse(member)?.absolute(),
            },
            EntryPayload::Boolean { value } => ResolvedOp::Boolean { value: *value },
            EntryPayload::Duration { value } => ResolvedOp::Duration {
                nanos: parse_duration(value)?,
            },
            EntryPayload::Group { member } => ResolvedOp::Group {
                member: EntityPath::parse(member)?.absolute(),
            },
            EntryPayload::Hash { field, value } => ResolvedOp::Hash {
                field: field.clone(),
                value: value.clone(),
            },
            EntryPayload::Log { level, message } => ResolvedOp::Log {
                level: *level,
                message: message.clone(),
            },
            EntryPayload::Number { data_type, value } => {
                if !data_type.validates(value) {
                    return Err(StoreError::InvalidNumber {
                        path: entry.path.clone(),
                        data_type: *data_type,
                        value: value.clone(),
                    });
                }
                ResolvedOp::Number {
                    data_type: *data_type,
                    value: value.clone(),
                }
            }
            EntryPayload::Observation { value, timestamp } => ResolvedOp::Observation {
                value: value.clone(),
                timestamp: *timestamp,
            },
            EntryPayload::Reference { target } => ResolvedOp::Reference {
                target: EntityPath::parse(target)?.absolute(),
            },
            EntryPayload::Set { value } => ResolvedOp::Set {
                value: value.clone(),
            },
            EntryPayload::State { state } => ResolvedOp::State {
                state: EntityPath::parse(state)?.absolute(),
            },
            EntryPayload::String { value } => ResolvedOp::String {
                value: value.clone(),
            },
            EntryPayload::TimeRange { start, end } => {
                let range = TimeRangeValue {
                    start: parse_timestamp(start)?,
                    end: parse_timestamp(end)?,
                };
                if range.end < range.start {
                    return Err(StoreError::InvalidTimeRange {
                        path: entry.path.clone(),
                    });
                }
                ResolvedOp::TimeRange { range }
            }
            EntryPayload::Timestamp { value } => ResolvedOp::Timestamp {
                nanos: parse_timestamp(value)?,
            },
            EntryPayload::Vocabulary { term } => ResolvedOp::Vocabulary {
                term: EntityPath::parse(term)?.absolute(),
            },
            EntryPayload::VocabularySet { term } => ResolvedOp::VocabularySet {
                term: EntityPath::parse(term)?.absolute(),
            },
        };

        Ok(Resolved {
            uuid: path.uuid(),
            path: path.absolute(),
            timestamp,
            op,
        })
    }

    /// True when any content has been published at the path.
    pub fn contains(&self, path: &str) -> StoreResult<bool> {
        let uuid = EntityPath::parse(path)?.uuid();
        let content = self.content.read().expect("store lock poisoned");
        Ok(content.paths.contains_key(&uuid))
    }

    /// Latest observation at a path, if any.
    pub fn latest_observation(&self, path: &str) -> StoreResult<Option<Observation>> {
        let uuid = EntityPath::parse(path)?.uuid();
        let content = self.content.read().expect("store lock poisoned");
        Ok(content
            .observations
            .get(&uuid)
            .and_then(|samples| samples.last())
            .cloned())
    }

    /// All observations at a path, oldest first.
    pub fn observations(&self, path: &str) -> StoreResult<Vec<Observation>> {
        let uuid = EntityPath::parse(path)?.uuid();
        let content = self.content.read().expect("store lock poisoned");
        Ok(content.observations.get(&uuid).cloned().unwrap_or_default())
    }

    pub fn boolean(&self, path: &str) -> StoreResult<Option<bool>> {
        self.scalar(path, |c| &c.booleans)
    }

    pub fn string_value(&self, path: &str) -> StoreResult<Option<String>> {
        self.scalar(path, |c| &c.strings)
    }

    /// Raw number literal and its declared subtype.
    pub fn number(&self, path: &str) -> StoreResult<Option<(NumberDataType, String)>> {
        self.scalar(path, |c| &c.numbers)
    }

    /// Duration in nanoseconds.
    pub fn duration(&self, path: &str) -> StoreResult<Option<i64>> {
        self.scalar(path, |c| &c.durations)
    }

    /// Canonical absolute path of the referenced entity.
    pub fn reference(&self, path: &str) -> StoreResult<Option<String>> {
        self.scalar(path, |c| &c.references)
    }

    /// Canonical absolute path of the current state.
    pub fn state(&self, path: &str) -> StoreResult<Option<String>> {
        self.scalar(path, |c| &c.states)
    }

    /// Canonical absolute path of the assigned member.
    pub fn assignment(&self, path: &str) -> StoreResult<Option<String>> {
        self.scalar(path, |c| &c.assignments)
    }

    /// Stored timestamp value, unix nanoseconds.
    pub fn timestamp_value(&self, path: &str) -> StoreResult<Option<i64>> {
        self.scalar(path, |c| &c.timestamps)
    }

    pub fn time_range(&self, path: &str) -> StoreResult<Option<TimeRangeValue>> {
        self.scalar(path, |c| &c.time_ranges)
    }

    /// Canonical absolute path of the vocabulary term.
    pub fn vocabulary(&self, path: &str) -> StoreResult<Option<String>> {
        self.scalar(path, |c| &c.vocabularies)
    }

    /// Set elements in first-publish order.
    pub fn set_values(&self, path: &str) -> StoreResult<Vec<String>> {
        self.accumulated(path, |c| &c.sets)
    }

    /// Vocabulary set terms (canonical paths) in first-publish order.
    pub fn vocabulary_set_terms(&self, path: &str) -> StoreResult<Vec<String>> {
        self.accumulated(path, |c| &c.vocabulary_sets)
    }

    /// Group members (canonical paths) in first-publish order.
    pub fn group_members(&self, path: &str) -> StoreResult<Vec<String>> {
        self.accumulated(path, |c| &c.groups)
    }

    /// Hash fields, latest value per field.
    pub fn hash_values(&self, path: &str) -> StoreResult<HashMap<String, String>> {
        let uuid = EntityPath::parse(path)?.uuid();
        let content = self.content.read().expect("store lock poisoned");
        Ok(content.hashes.get(&uuid).cloned().unwrap_or_default())
    }

    /// Log records, oldest first.
    pub fn logs(&self, path: &str) -> StoreResult<Vec<LogRecord>> {
        let uuid = EntityPath::parse(path)?.uuid();
        let content = self.content.read().expect("store lock poisoned");
        Ok(content.logs.get(&uuid).cloned().unwrap_or_default())
    }

    fn scalar<T: Clone>(
        &self,
        path: &str,
        map: impl FnOnce(&Content) -> &HashMap<String, Stamped<T>>,
    ) -> StoreResult<Option<T>> {
        let uuid = EntityPath::parse(path)?.uuid();
        let content = self.content.read().expect("store lock poisoned");
        Ok(map(&content).get(&uuid).map(|s| s.value.clone()))
    }

    fn accumulated(
        &self,
        path: &str,
        map: impl FnOnce(&Content) -> &HashMap<String, Vec<String>>,
    ) -> StoreResult<Vec<String>> {
        let uuid = EntityPath::parse(path)?.uuid();
        let content = self.content.read().expect("store lock poisoned");
        Ok(map(&content).get(&uuid).cloned().unwrap_or_default())
    }
}

impl Content {
    fn apply(&mut self, uuid: String, timestamp: i64, op: ResolvedOp) {
        match op {
            ResolvedOp::Assignment { member } => {
                self.assignments.insert(uuid, Stamped { value: member, timestamp });
            }
            ResolvedOp::Boolean { value } => {
                self.booleans.insert(uuid, Stamped { value, timestamp });
            }
            ResolvedOp::Duration { nanos } => {
                self.durations.insert(uuid, Stamped { value: nanos, timestamp });
            }
            ResolvedOp::Group { member } => {
                push_unique(self.groups.entry(uuid).or_default(), member);
            }
            ResolvedOp::Hash { field, value } => {
                self.hashes.entry(uuid).or_default().insert(field, value);
            }
            ResolvedOp::Log { level, message } => {
                self.logs.entry(uuid).or_default().push(LogRecord {
                    level,
                    message,
                    timestamp,
                });
            }
            ResolvedOp::Number { data_type, value } => {
                self.numbers.insert(
                    uuid,
                    Stamped {
                        value: (data_type, value),
                        timestamp,
                    },
                );
            }
            ResolvedOp::Observation { value, timestamp: observed_at } => {
                let path = self.paths.get(&uuid).cloned().unwrap_or_default();
                let samples = self.observations.entry(uuid).or_default();
                let observation = Observation {
                    path,
                    value,
                    timestamp: observed_at,
                };
                // Keep samples time-ordered; publishes usually arrive in order
                // so the insertion point is almost always the tail.
                let at = samples.partition_point(|o| o.timestamp <= observed_at);
                samples.insert(at, observation);
            }
            ResolvedOp::Reference { target } => {
                self.references.insert(uuid, Stamped { value: target, timestamp });
            }
            ResolvedOp::Set { value } => {
                push_unique(self.sets.entry(uuid).or_default(), value);
            }
            ResolvedOp::State { state } => {
                self.states.insert(uuid, Stamped { value: state, timestamp });
            }
            ResolvedOp::String { value } => {
                self.strings.insert(uuid, Stamped { value, timestamp });
            }
            ResolvedOp::TimeRange { range } => {
                self.time_ranges.insert(uuid, Stamped { value: range, timestamp });
            }
            ResolvedOp::Timestamp { nanos } => {
                self.timestamps.insert(uuid, Stamped { value: nanos, timestamp });
            }
            ResolvedOp::Vocabulary { term } => {
                self.vocabularies.insert(uuid, Stamped { value: term, timestamp });
            }
            ResolvedOp::VocabularySet { term } => {
                push_unique(self.vocabulary_sets.entry(uuid).or_default(), term);
            }
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

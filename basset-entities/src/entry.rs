//! Typed entries.
//!
//! An [`Entry`] pairs a raw path string with a typed payload. Variants fall
//! into two families: scalar variants replace the value at their path, while
//! set-like variants (sets, vocabulary sets, hashes, logs, groups,
//! observations) accumulate under it. The family decides how entries dedup
//! inside a transaction and how a host applies them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subtype of a number entry's string-encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberDataType {
    Byte,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    Decimal,
}

impl NumberDataType {
    /// Checks that a string literal parses under this subtype.
    pub fn validates(&self, value: &str) -> bool {
        match self {
            Self::Byte => value.parse::<u8>().is_ok(),
            Self::Int16 => value.parse::<i16>().is_ok(),
            Self::Int32 => value.parse::<i32>().is_ok(),
            Self::Int64 => value.parse::<i64>().is_ok(),
            Self::Float => value.parse::<f32>().is_ok_and(f32::is_finite),
            Self::Double | Self::Decimal => value.parse::<f64>().is_ok_and(f64::is_finite),
        }
    }
}

/// Severity of a log entry, ordered from most to least severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Information,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Critical => "Critical",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Information => "Information",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        };
        write!(f, "{s}")
    }
}

/// The typed payload of an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum EntryPayload {
    /// Assigns another entity (by path) to this one.
    Assignment { member: String },
    Boolean { value: bool },
    /// Duration literal, e.g. `"00:01:30"` or `"90s"`.
    Duration { value: String },
    /// Adds a member (by path) to the group at this path.
    Group { member: String },
    /// One field of the hash at this path.
    Hash { field: String, value: String },
    Log { level: LogLevel, message: String },
    /// String-encoded numeric value; the literal must parse under `data_type`.
    Number {
        data_type: NumberDataType,
        value: String,
    },
    /// Timestamped value sample; `timestamp` in unix nanoseconds.
    Observation { value: String, timestamp: i64 },
    /// References another entity by path.
    Reference { target: String },
    /// One element of the set at this path.
    Set { value: String },
    /// State identified by a path, e.g. a definition under a `.States` branch.
    State { state: String },
    String { value: String },
    /// Start/end timestamp literals (integer nanos or RFC 3339).
    TimeRange { start: String, end: String },
    /// Timestamp literal (integer nanos or RFC 3339).
    Timestamp { value: String },
    Vocabulary { term: String },
    /// One term of the vocabulary set at this path.
    VocabularySet { term: String },
}

/// Discriminant of an entry payload, used for dedup keys and host content maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryClass {
    Assignment,
    Boolean,
    Duration,
    Group,
    Hash,
    Log,
    Number,
    Observation,
    Reference,
    Set,
    State,
    String,
    TimeRange,
    Timestamp,
    Vocabulary,
    VocabularySet,
}

impl fmt::Display for EntryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Assignment => "assignment",
            Self::Boolean => "boolean",
            Self::Duration => "duration",
            Self::Group => "group",
            Self::Hash => "hash",
            Self::Log => "log",
            Self::Number => "number",
            Self::Observation => "observation",
            Self::Reference => "reference",
            Self::Set => "set",
            Self::State => "state",
            Self::String => "string",
            Self::TimeRange => "timeRange",
            Self::Timestamp => "timestamp",
            Self::Vocabulary => "vocabulary",
            Self::VocabularySet => "vocabularySet",
        };
        write!(f, "{s}")
    }
}

/// One typed unit of data bound for an entity host.
///
/// The path is kept as written by the caller; hosts parse and normalize it
/// when the transaction is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub path: String,
    #[serde(flatten)]
    pub payload: EntryPayload,
    /// Explicit instant for the entry, unix nanoseconds. Hosts stamp their
    /// own wall time when absent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<i64>,
}

impl Entry {
    pub fn new(path: impl Into<String>, payload: EntryPayload) -> Self {
        Self {
            path: path.into(),
            payload,
            timestamp: None,
        }
    }

    /// Sets an explicit instant (unix nanoseconds).
    #[must_use]
    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn assignment(path: impl Into<String>, member: impl Into<String>) -> Self {
        Self::new(
            path,
            EntryPayload::Assignment {
                member: member.into(),
            },
        )
    }

    pub fn boolean(path: impl Into<String>, value: bool) -> Self {
        Self::new(path, EntryPayload::Boolean { value })
    }

    pub fn duration(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            path,
            EntryPayload::Duration {
                value: value.into(),
            },
        )
    }

    pub fn group(path: impl Into<String>, member: impl Into<String>) -> Self {
        Self::new(
            path,
            EntryPayload::Group {
                member: member.into(),
            },
        )
    }

    pub fn hash(
        path: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            EntryPayload::Hash {
                field: field.into(),
                value: value.into(),
            },
        )
    }

    pub fn log(path: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self::new(
            path,
            EntryPayload::Log {
                level,
                message: message.into(),
            },
        )
    }

    pub fn number(
        path: impl Into<String>,
        data_type: NumberDataType,
        value: impl ToString,
    ) -> Self {
        Self::new(
            path,
            EntryPayload::Number {
                data_type,
                value: value.to_string(),
            },
        )
    }

    pub fn int(path: impl Into<String>, value: i64) -> Self {
        Self::number(path, NumberDataType::Int64, value)
    }

    pub fn float(path: impl Into<String>, value: f64) -> Self {
        Self::number(path, NumberDataType::Double, value)
    }

    pub fn observation(path: impl Into<String>, value: impl ToString, timestamp: i64) -> Self {
        Self::new(
            path,
            EntryPayload::Observation {
                value: value.to_string(),
                timestamp,
            },
        )
    }

    pub fn reference(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            path,
            EntryPayload::Reference {
                target: target.into(),
            },
        )
    }

    pub fn set(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            path,
            EntryPayload::Set {
                value: value.into(),
            },
        )
    }

    pub fn state(path: impl Into<String>, state: impl Into<String>) -> Self {
        Self::new(
            path,
            EntryPayload::State {
                state: state.into(),
            },
        )
    }

    pub fn string(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            path,
            EntryPayload::String {
                value: value.into(),
            },
        )
    }

    pub fn time_range(
        path: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            EntryPayload::TimeRange {
                start: start.into(),
                end: end.into(),
            },
        )
    }

    pub fn timestamp(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            path,
            EntryPayload::Timestamp {
                value: value.into(),
            },
        )
    }

    pub fn vocabulary(path: impl Into<String>, term: impl Into<String>) -> Self {
        Self::new(
            path,
            EntryPayload::Vocabulary { term: term.into() },
        )
    }

    pub fn vocabulary_set(path: impl Into<String>, term: impl Into<String>) -> Self {
        Self::new(
            path,
            EntryPayload::VocabularySet { term: term.into() },
        )
    }

    /// The payload's class discriminant.
    pub fn class(&self) -> EntryClass {
        match &self.payload {
            EntryPayload::Assignment { .. } => EntryClass::Assignment,
            EntryPayload::Boolean { .. } => EntryClass::Boolean,
            EntryPayload::Duration { .. } => EntryClass::Duration,
            EntryPayload::Group { .. } => EntryClass::Group,
            EntryPayload::Hash { .. } => EntryClass::Hash,
            EntryPayload::Log { .. } => EntryClass::Log,
            EntryPayload::Number { .. } => EntryClass::Number,
            EntryPayload::Observation { .. } => EntryClass::Observation,
            EntryPayload::Reference { .. } => EntryClass::Reference,
            EntryPayload::Set { .. } => EntryClass::Set,
            EntryPayload::State { .. } => EntryClass::State,
            EntryPayload::String { .. } => EntryClass::String,
            EntryPayload::TimeRange { .. } => EntryClass::TimeRange,
            EntryPayload::Timestamp { .. } => EntryClass::Timestamp,
            EntryPayload::Vocabulary { .. } => EntryClass::Vocabulary,
            EntryPayload::VocabularySet { .. } => EntryClass::VocabularySet,
        }
    }

    /// Whether repeated entries under one path accumulate rather than replace.
    pub fn is_accumulating(&self) -> bool {
        matches!(
            self.class(),
            EntryClass::Group
                | EntryClass::Hash
                | EntryClass::Log
                | EntryClass::Observation
                | EntryClass::Set
                | EntryClass::VocabularySet
        )
    }

    /// Dedup key within a transaction.
    ///
    /// Scalar entries collapse to one per (path, class); accumulating
    /// entries fold their distinguishing value in so repeated adds survive.
    /// The path identity is the host's path UUID, so `/On` and `Main:/On`
    /// share a key; a path that does not parse falls back to its normalized
    /// text (the host rejects it at apply time anyway).
    pub fn entry_id(&self) -> String {
        let path = match basset_types::EntityPath::parse(&self.path) {
            Ok(parsed) => parsed.uuid(),
            Err(_) => self.path.trim().trim_end_matches('/').to_lowercase(),
        };
        let class = self.class();
        match &self.payload {
            EntryPayload::Group { member } => format!("{path}|{class}|{member}"),
            EntryPayload::Hash { field, .. } => format!("{path}|{class}|{field}"),
            EntryPayload::Log { message, level } => {
                format!("{path}|{class}|{level}|{message}")
            }
            EntryPayload::Observation { timestamp, value } => {
                format!("{path}|{class}|{timestamp}|{value}")
            }
            EntryPayload::Set { value } => format!("{path}|{class}|{value}"),
            EntryPayload::VocabularySet { term } => format!("{path}|{class}|{term}"),
            _ => format!("{path}|{class}"),
        }
    }
}

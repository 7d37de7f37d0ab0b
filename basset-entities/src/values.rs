//! Value records returned by host queries.

use serde::{Deserialize, Serialize};

use crate::LogLevel;

/// The latest-known (or a historical) value sample at a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub path: String,
    pub value: String,
    /// Instant the value was observed, unix nanoseconds.
    pub timestamp: i64,
}

impl Observation {
    /// The value parsed to a concrete type, when it parses.
    pub fn value_as<T: std::str::FromStr>(&self) -> Option<T> {
        self.value.parse().ok()
    }
}

/// One log line recorded against a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: i64,
}

/// A start/end instant pair, unix nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeValue {
    pub start: i64,
    pub end: i64,
}

impl TimeRangeValue {
    /// Span length in nanoseconds.
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_value_parses_typed() {
        let obs = Observation {
            path: "Debug:/Entities/Boolean".to_string(),
            value: "true".to_string(),
            timestamp: 1,
        };
        assert_eq!(obs.value_as::<bool>(), Some(true));
        assert_eq!(obs.value_as::<i64>(), None);
    }

    #[test]
    fn time_range_duration() {
        let tr = TimeRangeValue { start: 100, end: 350 };
        assert_eq!(tr.duration(), 250);
    }
}

//! Atomic entry batches.
//!
//! A [`PublishTransaction`] accumulates entries in call order, deduplicating
//! by entry id: a scalar entry re-added under the same path replaces the
//! earlier one in place, while accumulating entries (sets, hashes, logs,
//! observations, ...) all survive. A [`Transaction`] wraps the publish
//! operations as the unit handed to a host.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::Entry;

/// An ordered, deduplicating batch of entries to publish.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Entry>", into = "Vec<Entry>")]
pub struct PublishTransaction {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl PublishTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry.
    ///
    /// An entry whose id is already present replaces the earlier entry at
    /// its original position; otherwise the entry appends at the end.
    pub fn add(&mut self, entry: Entry) {
        let id = entry.entry_id();
        match self.index.get(&id) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(id, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Folds another transaction's entries in, preserving this one's order.
    pub fn merge(&mut self, other: PublishTransaction) {
        for entry in other.entries {
            self.add(entry);
        }
    }

    /// Surviving entries in first-add order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Entry>> for PublishTransaction {
    fn from(entries: Vec<Entry>) -> Self {
        let mut tx = Self::new();
        for entry in entries {
            tx.add(entry);
        }
        tx
    }
}

impl From<PublishTransaction> for Vec<Entry> {
    fn from(tx: PublishTransaction) -> Self {
        tx.entries
    }
}

impl FromIterator<Entry> for PublishTransaction {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut tx = Self::new();
        for entry in iter {
            tx.add(entry);
        }
        tx
    }
}

impl<'a> IntoIterator for &'a PublishTransaction {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The atomic unit handed to an entity host.
///
/// Owned exclusively by the caller until submitted; hosts apply all of its
/// publish operations or none of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "publish", skip_serializing_if = "PublishTransaction::is_empty", default)]
    publish: PublishTransaction,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one publish entry.
    pub fn add(&mut self, entry: Entry) {
        self.publish.add(entry);
    }

    /// Folds another transaction in.
    pub fn merge(&mut self, other: Transaction) {
        self.publish.merge(other.publish);
    }

    pub fn publish_operations(&self) -> &PublishTransaction {
        &self.publish
    }

    pub fn is_empty(&self) -> bool {
        self.publish.is_empty()
    }
}

impl From<PublishTransaction> for Transaction {
    fn from(publish: PublishTransaction) -> Self {
        Self { publish }
    }
}

impl From<Vec<Entry>> for Transaction {
    fn from(entries: Vec<Entry>) -> Self {
        Self {
            publish: entries.into(),
        }
    }
}

impl FromIterator<Entry> for Transaction {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            publish: iter.into_iter().collect(),
        }
    }
}

// Status Collection - one response's worth of records

use std::ops::Deref;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::record::StatusRecord;
use super::sort::SortKey;

/// Ordered records from a status response.
///
/// Order is response order until [`StatusLines::sort`] is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusLines(Vec<StatusRecord>);

impl StatusLines {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, record: StatusRecord) {
        self.0.push(record);
    }

    pub fn into_vec(self) -> Vec<StatusRecord> {
        self.0
    }

    /// Reorder in place by `key`
    pub fn sort(&mut self, key: SortKey, ascending: bool) {
        self.0.sort_by(|a, b| key.compare(a, b, ascending));
    }

    /// Keep only records accepted by `predicate`, preserving order
    pub fn retain(&mut self, mut predicate: impl FnMut(&StatusRecord) -> bool) {
        self.0.retain(|record| predicate(record));
    }

    /// Combine with `incoming`, summing the counts of records that share a name.
    ///
    /// Both inputs are left untouched. Records present on one side only are
    /// carried over as-is. Repeated names within one side are summed as well.
    /// The result lists names in first-seen order, but callers should treat
    /// the order as unspecified.
    pub fn merge(&self, incoming: &StatusLines) -> StatusLines {
        let mut by_name: IndexMap<&str, StatusRecord> =
            IndexMap::with_capacity(self.len() + incoming.len());

        for record in self.iter().chain(incoming.iter()) {
            match by_name.get_mut(record.name()) {
                Some(existing) => *existing = existing.combine(record),
                None => {
                    by_name.insert(record.name(), record.clone());
                }
            }
        }

        by_name.into_values().collect()
    }

    /// Fold any number of collections into one with [`StatusLines::merge`]
    pub fn merged<'a>(collections: impl IntoIterator<Item = &'a StatusLines>) -> StatusLines {
        collections
            .into_iter()
            .fold(StatusLines::new(), |acc, lines| acc.merge(lines))
    }
}

impl Deref for StatusLines {
    type Target = [StatusRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<StatusRecord>> for StatusLines {
    fn from(records: Vec<StatusRecord>) -> Self {
        Self(records)
    }
}

impl FromIterator<StatusRecord> for StatusLines {
    fn from_iter<I: IntoIterator<Item = StatusRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for StatusLines {
    type Item = StatusRecord;
    type IntoIter = std::vec::IntoIter<StatusRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatusLines {
    type Item = &'a StatusRecord;
    type IntoIter = std::slice::Iter<'a, StatusRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

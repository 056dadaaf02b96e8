// Sort Keys - the closed set of orderings over status records

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::UnknownSortKey;
use super::record::StatusRecord;

/// Field a collection can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Queued,
    Running,
    Workers,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::Queued,
        SortKey::Running,
        SortKey::Workers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Queued => "queued",
            SortKey::Running => "running",
            SortKey::Workers => "workers",
        }
    }

    /// Compare two records under this key.
    ///
    /// `ascending = false` reverses the primary comparison only. Numeric keys
    /// break ties by case-insensitive name, always ascending. Counts that are
    /// not integers compare as zero.
    pub fn compare(&self, a: &StatusRecord, b: &StatusRecord, ascending: bool) -> Ordering {
        let primary = match self {
            SortKey::Name => compare_names(a.name(), b.name()),
            SortKey::Queued => a.queued_count().cmp(&b.queued_count()),
            SortKey::Running => a.running_count().cmp(&b.running_count()),
            SortKey::Workers => a.workers_count().cmp(&b.workers_count()),
        };
        let primary = if ascending { primary } else { primary.reverse() };

        match self {
            SortKey::Name => primary,
            _ => primary.then_with(|| compare_names(a.name(), b.name())),
        }
    }
}

/// Case-insensitive lexicographic comparison
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

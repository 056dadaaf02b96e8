// Record Filters
//
// Predicates handed to the client's filtered status query. Any
// `FnMut(&StatusRecord) -> bool` works; these are the common ones.

use super::record::StatusRecord;

/// Keeps every record
pub fn accept_all(_record: &StatusRecord) -> bool {
    true
}

/// Drops queues with nothing queued, running, or registered
pub fn not_idle(record: &StatusRecord) -> bool {
    !record.is_idle()
}

/// Keeps records whose name contains `needle`, ignoring case
pub fn name_contains(needle: &str) -> impl Fn(&StatusRecord) -> bool {
    let needle = needle.to_lowercase();
    move |record| record.name().to_lowercase().contains(&needle)
}

/// Keeps records accepted by both predicates
pub fn both<A, B>(mut first: A, mut second: B) -> impl FnMut(&StatusRecord) -> bool
where
    A: FnMut(&StatusRecord) -> bool,
    B: FnMut(&StatusRecord) -> bool,
{
    move |record| first(record) && second(record)
}

// Status Record Domain Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ParseError, Result, STATUS_FIELD_COUNT};
use super::numeric::{add_counts, parse_or_zero};

/// One queue's counts as reported by a single `status` line.
///
/// Counts are kept as the text the daemon sent. A record only exists if its
/// line had exactly four fields; the counts themselves are not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusRecord {
    name: String,
    queued: String,
    running: String,
    workers: String,
}

impl StatusRecord {
    pub fn new(
        name: impl Into<String>,
        queued: impl Into<String>,
        running: impl Into<String>,
        workers: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            queued: queued.into(),
            running: running.into(),
            workers: workers.into(),
        }
    }

    /// Parse one status line: `<name> <queued> <running> <workers>`
    ///
    /// # Errors
    /// - ParseError::FieldCount if the line does not split into exactly four
    ///   whitespace-separated fields
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != STATUS_FIELD_COUNT {
            return Err(ParseError::FieldCount {
                found: fields.len(),
                line: line.to_string(),
            });
        }
        Ok(Self::new(fields[0], fields[1], fields[2], fields[3]))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn queued(&self) -> &str {
        &self.queued
    }

    pub fn running(&self) -> &str {
        &self.running
    }

    pub fn workers(&self) -> &str {
        &self.workers
    }

    /// Queued count, zero if the daemon sent something that is not an integer
    pub fn queued_count(&self) -> i64 {
        parse_or_zero(&self.queued)
    }

    pub fn running_count(&self) -> i64 {
        parse_or_zero(&self.running)
    }

    pub fn workers_count(&self) -> i64 {
        parse_or_zero(&self.workers)
    }

    /// True when nothing is queued, running, or registered to work
    pub fn is_idle(&self) -> bool {
        self.queued_count() == 0 && self.running_count() == 0 && self.workers_count() == 0
    }

    /// Sum the counts of two records into one carrying `self`'s name.
    pub fn combine(&self, other: &StatusRecord) -> StatusRecord {
        StatusRecord {
            name: self.name.clone(),
            queued: add_counts(&self.queued, &other.queued),
            running: add_counts(&self.running, &other.running),
            workers: add_counts(&self.workers, &other.workers),
        }
    }
}

impl FromStr for StatusRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Renders the record in wire format (tab separated)
impl fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.name, self.queued, self.running, self.workers
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_four_fields() {
        let record = StatusRecord::parse("reverse\t3\t1\t2").unwrap();
        assert_eq!(record, StatusRecord::new("reverse", "3", "1", "2"));
        assert_eq!(record.queued_count(), 3);
        assert_eq!(record.running_count(), 1);
        assert_eq!(record.workers_count(), 2);
    }

    #[test]
    fn test_parse_collapses_repeated_whitespace() {
        let record: StatusRecord = "  resize   10 \t 0  4 ".parse().unwrap();
        assert_eq!(record.name(), "resize");
        assert_eq!(record.queued(), "10");
        assert_eq!(record.running(), "0");
        assert_eq!(record.workers(), "4");
    }

    #[test]
    fn test_parse_too_few_fields() {
        let err = StatusRecord::parse("reverse 3 1").unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldCount {
                found: 3,
                line: "reverse 3 1".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "Wrong number of fields: expected 4, found 3 in \"reverse 3 1\""
        );
    }

    #[test]
    fn test_parse_too_many_fields() {
        let result = StatusRecord::parse("reverse 3 1 2 9");
        assert!(matches!(result, Err(ParseError::FieldCount { found: 5, .. })));
    }

    #[test]
    fn test_parse_empty_line() {
        let result = StatusRecord::parse("");
        assert!(matches!(result, Err(ParseError::FieldCount { found: 0, .. })));
    }

    #[test]
    fn test_parse_accepts_non_numeric_counts() {
        // Strict on shape only; counts are coerced later
        let record = StatusRecord::parse("odd x y z").unwrap();
        assert_eq!(record.queued(), "x");
        assert_eq!(record.queued_count(), 0);
        assert!(record.is_idle());
    }

    #[test]
    fn test_combine_sums_counts() {
        let a = StatusRecord::new("X", "1", "2", "3");
        let b = StatusRecord::new("X", "4", "5", "6");
        assert_eq!(a.combine(&b), StatusRecord::new("X", "5", "7", "9"));
    }

    #[test]
    fn test_combine_treats_bad_operand_as_zero() {
        let a = StatusRecord::new("X", "bad", "2", "3");
        let b = StatusRecord::new("X", "4", "5", "?");
        assert_eq!(a.combine(&b), StatusRecord::new("X", "4", "7", "3"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let record = StatusRecord::new("thumbnail", "12", "2", "8");
        let reparsed = StatusRecord::parse(&record.to_string()).unwrap();
        assert_eq!(record, reparsed);
    }

    #[test]
    fn test_serializes_as_json_object() {
        let record = StatusRecord::new("thumbnail", "12", "2", "8");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "thumbnail",
                "queued": "12",
                "running": "2",
                "workers": "8"
            })
        );
    }
}

/// Ids are assigned by the in-memory directory from a monotonic counter.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Job identifiers are issued from a monotonic counter starting at 1.
pub type JobId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

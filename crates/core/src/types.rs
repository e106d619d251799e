use chrono::{DateTime, Utc};

/// Row id of a category or card (`BIGSERIAL`).
pub type DbId = i64;

/// Card creation and modification times, stored as `TIMESTAMPTZ`.
pub type Timestamp = DateTime<Utc>;

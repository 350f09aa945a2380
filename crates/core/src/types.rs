/// Row ids (`BIGSERIAL`).
pub type DbId = i64;

/// `TIMESTAMPTZ` columns, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

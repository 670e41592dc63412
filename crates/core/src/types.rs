/// Record ids are UUIDv7 so that ids sort by creation time.
pub type RecordId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Allocate a fresh record id.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::now_v7()
}

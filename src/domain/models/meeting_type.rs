use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Read-only during slot generation. Buffers are idle minutes that must stay
/// free immediately before/after a meeting; they widen the conflict check but
/// are never persisted as part of a booking's own interval.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MeetingType {
    pub id: String,
    pub host_id: String,
    pub name: String,
    pub duration_min: i32,
    pub buffer_before_min: i32,
    pub buffer_after_min: i32,
    pub max_booking_days: i32,
    pub min_notice_hours: i32,
    pub is_active: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl MeetingType {
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_min as i64)
    }

    pub fn buffer_before(&self) -> Duration {
        Duration::minutes(self.buffer_before_min as i64)
    }

    pub fn buffer_after(&self) -> Duration {
        Duration::minutes(self.buffer_after_min as i64)
    }
}

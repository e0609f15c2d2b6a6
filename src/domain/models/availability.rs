use crate::error::SchedulingError;
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A recurring weekly interval during which a host accepts bookings.
/// `start_time`/`end_time` are local wall-clock times ("HH:MM") in the
/// window's own IANA timezone. `day_of_week` uses the Sunday=0 convention.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AvailabilityWindow {
    pub id: String,
    pub host_id: String,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub timezone: String,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AvailabilityWindow {
    pub fn new(
        host_id: String,
        day_of_week: i32,
        start_time: String,
        end_time: String,
        timezone: String,
    ) -> Result<Self, SchedulingError> {
        if !(0..=6).contains(&day_of_week) {
            return Err(SchedulingError::InvalidRequest(
                "day_of_week must be between 0 (Sunday) and 6 (Saturday)".into(),
            ));
        }

        let start = NaiveTime::parse_from_str(&start_time, "%H:%M")
            .map_err(|_| SchedulingError::InvalidRequest("start_time must be HH:MM".into()))?;
        let end = NaiveTime::parse_from_str(&end_time, "%H:%M")
            .map_err(|_| SchedulingError::InvalidRequest("end_time must be HH:MM".into()))?;

        if start >= end {
            return Err(SchedulingError::InvalidRequest(
                "start_time must be before end_time".into(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            host_id,
            day_of_week,
            start_time,
            end_time,
            timezone,
            is_active: true,
            deleted_at: None,
            created_at: Utc::now(),
        })
    }
}

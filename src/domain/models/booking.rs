use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const CONFIRMATION_CODE_LEN: usize = 8;
const CODE_ALPHABET: &[u8] = b"0123456789ABCDEF";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub host_id: String,
    pub meeting_type_id: String,
    pub contact_id: Option<String>,
    pub guest_name: String,
    pub guest_email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub confirmation_code: String,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct GuestInfo {
    pub name: String,
    pub email: String,
}

pub struct NewBookingParams {
    pub host_id: String,
    pub meeting_type_id: String,
    pub contact_id: Option<String>,
    pub guest: GuestInfo,
    pub start: DateTime<Utc>,
    pub duration_min: i32,
}

impl Booking {
    /// Bookings are created directly as confirmed; there is no separate
    /// pending-approval phase.
    pub fn new(params: NewBookingParams) -> Self {
        let end_time = params.start + Duration::minutes(params.duration_min as i64);

        Self {
            id: Uuid::new_v4().to_string(),
            host_id: params.host_id,
            meeting_type_id: params.meeting_type_id,
            contact_id: params.contact_id,
            guest_name: params.guest.name,
            guest_email: params.guest.email,
            start_time: params.start,
            end_time,
            status: BookingStatus::Confirmed,
            confirmation_code: generate_confirmation_code(),
            cancellation_reason: None,
            cancelled_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn duration_min(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Short public identifier used for guest-facing lookup without
/// authentication. Uniqueness is enforced by the storage layer; on a
/// collision the caller regenerates and retries.
pub fn generate_confirmation_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CONFIRMATION_CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

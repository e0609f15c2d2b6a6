use crate::domain::models::{
    availability::AvailabilityWindow, booking::Booking, contact::ContactRef,
    meeting_type::MeetingType,
};
use crate::error::SchedulingError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Active, non-deleted windows for a host on a weekday (Sunday=0).
    /// An empty result means "no slots", not an error.
    async fn find_active_windows(
        &self,
        host_id: &str,
        day_of_week: i32,
    ) -> Result<Vec<AvailabilityWindow>, SchedulingError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Confirmed bookings whose [start, end) interval overlaps the given
    /// range. Callers pass a superset range; fine-grained overlap checks
    /// stay in the conflict resolver.
    async fn find_confirmed_overlapping(
        &self,
        host_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, SchedulingError>;
    async fn find_by_code(&self, confirmation_code: &str)
        -> Result<Option<Booking>, SchedulingError>;
    /// Must fail with `SchedulingError::CodeCollision` on a duplicate
    /// confirmation code so the caller can regenerate and retry.
    async fn insert(&self, booking: &Booking) -> Result<Booking, SchedulingError>;
    async fn update(&self, booking: &Booking) -> Result<Booking, SchedulingError>;
}

#[async_trait]
pub trait MeetingTypeRepository: Send + Sync {
    async fn find_active_by_id(&self, id: &str) -> Result<Option<MeetingType>, SchedulingError>;
}

#[async_trait]
pub trait ContactLookup: Send + Sync {
    /// Optional enrichment only; absence is not an error.
    async fn find_by_email(
        &self,
        email: &str,
        host_id: &str,
    ) -> Result<Option<ContactRef>, SchedulingError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

use crate::domain::models::booking::{Booking, BookingStatus};
use crate::domain::models::meeting_type::MeetingType;
use crate::domain::services::time::overlaps;
use chrono::{DateTime, Utc};

/// Pure overlap predicate over a caller-supplied booking set. The set is
/// expected to already be scoped to one host and a superset time range;
/// this function never touches storage.
///
/// `exclude_booking_id` lets a reschedule-in-progress skip the booking's own
/// prior interval.
pub fn has_conflict(
    bookings: &[Booking],
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    exclude_booking_id: Option<&str>,
) -> bool {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .filter(|b| exclude_booking_id != Some(b.id.as_str()))
        .any(|b| overlaps(candidate_start, candidate_end, b.start_time, b.end_time))
}

/// Conflict check with the meeting type's buffers applied: both the
/// candidate and each existing booking are widened by buffer_before /
/// buffer_after before comparing. Buffers are never persisted on the
/// booking itself, so the expansion happens here at check time.
pub fn has_buffered_conflict(
    meeting_type: &MeetingType,
    bookings: &[Booking],
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    exclude_booking_id: Option<&str>,
) -> bool {
    let before = meeting_type.buffer_before();
    let after = meeting_type.buffer_after();

    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .filter(|b| exclude_booking_id != Some(b.id.as_str()))
        .any(|b| {
            overlaps(
                candidate_start - before,
                candidate_end + after,
                b.start_time - before,
                b.end_time + after,
            )
        })
}

use crate::domain::models::booking::{
    generate_confirmation_code, Booking, BookingStatus, GuestInfo, NewBookingParams,
};
use crate::domain::models::meeting_type::MeetingType;
use crate::domain::models::slot::Slot;
use crate::domain::ports::{
    AvailabilityRepository, BookingRepository, Clock, ContactLookup, MeetingTypeRepository,
};
use crate::domain::services::conflict::{has_buffered_conflict, has_conflict};
use crate::domain::services::slots::{generate_slots, window_bounds_utc};
use crate::domain::services::time::day_of_week;
use crate::error::SchedulingError;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// How often an insert is retried with a regenerated confirmation code
/// before the collision is surfaced as an internal error. Collisions at
/// 8 hex chars are rare enough that exhausting this bound points at a
/// code-generation defect, not bad luck.
const CODE_INSERT_RETRIES: u32 = 3;

/// The only component allowed to create, cancel, or reschedule bookings.
///
/// Create and reschedule hold a per-host async lock across the
/// re-fetch/check/write sequence so that at most one write lands per host
/// per overlapping interval. Slot listing and cancellation take no lock:
/// listing is pure over fetched data, and a concurrent double-cancel just
/// observes `AlreadyCancelled` on the second attempt.
#[derive(Clone)]
pub struct BookingService {
    availability_repo: Arc<dyn AvailabilityRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    meeting_type_repo: Arc<dyn MeetingTypeRepository>,
    contact_lookup: Arc<dyn ContactLookup>,
    clock: Arc<dyn Clock>,
    host_locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl BookingService {
    pub fn new(
        availability_repo: Arc<dyn AvailabilityRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        meeting_type_repo: Arc<dyn MeetingTypeRepository>,
        contact_lookup: Arc<dyn ContactLookup>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            availability_repo,
            booking_repo,
            meeting_type_repo,
            contact_lookup,
            clock,
            host_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Bookable slots for one meeting type on one date. An empty list is a
    /// normal outcome (host has no availability, or everything is taken),
    /// never an error.
    pub async fn list_available_slots(
        &self,
        meeting_type_id: &str,
        date: NaiveDate,
        timezone: Tz,
    ) -> Result<Vec<Slot>, SchedulingError> {
        let meeting_type = self
            .meeting_type_repo
            .find_active_by_id(meeting_type_id)
            .await?
            .ok_or_else(|| SchedulingError::NotFound("Meeting type not found".into()))?;

        let now = self.clock.now();
        let horizon = now.date_naive() + Duration::days(meeting_type.max_booking_days as i64);
        if date > horizon {
            return Err(SchedulingError::InvalidRequest(format!(
                "Date is beyond the booking horizon of {} days",
                meeting_type.max_booking_days
            )));
        }

        let windows = self
            .availability_repo
            .find_active_windows(&meeting_type.host_id, day_of_week(date))
            .await?;

        if windows.is_empty() {
            return Ok(Vec::new());
        }

        info!(
            "list_available_slots: {} on {} (guest zone {})",
            meeting_type_id, date, timezone
        );

        // Fetch one padded superset of the day's confirmed bookings; the
        // generator does the fine-grained overlap checks. Anchored to UTC
        // midnight of the target date: a window zone can place the day's
        // slots up to 14 hours before or 12 hours after the UTC day, and
        // one day of padding on each side covers both extremes.
        let day_start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        let range_start = day_start - Duration::days(1);
        let range_end = day_start + Duration::days(2);

        let confirmed = self
            .booking_repo
            .find_confirmed_overlapping(&meeting_type.host_id, range_start, range_end)
            .await?;

        Ok(generate_slots(&meeting_type, &windows, &confirmed, date, now))
    }

    pub async fn create_booking(
        &self,
        meeting_type_id: &str,
        guest: GuestInfo,
        requested_start: DateTime<Utc>,
    ) -> Result<Booking, SchedulingError> {
        let meeting_type = self
            .meeting_type_repo
            .find_active_by_id(meeting_type_id)
            .await?
            .ok_or_else(|| SchedulingError::NotFound("Meeting type not found".into()))?;

        let now = self.clock.now();
        let requested_end = requested_start + meeting_type.duration();

        // Re-validate notice and window membership even though
        // list_available_slots filters both: time passes between listing
        // and booking.
        if requested_start < now + Duration::hours(meeting_type.min_notice_hours as i64) {
            return Err(SchedulingError::InvalidRequest(
                "Requested start is within the minimum notice period".into(),
            ));
        }
        // Same date-based rule as list_available_slots, so a slot listed on
        // the horizon-boundary date stays bookable for the rest of that day.
        let horizon = now.date_naive() + Duration::days(meeting_type.max_booking_days as i64);
        if requested_start.date_naive() > horizon {
            return Err(SchedulingError::InvalidRequest(
                "Requested start is beyond the booking horizon".into(),
            ));
        }
        if !self
            .within_availability(&meeting_type.host_id, requested_start, requested_end)
            .await?
        {
            return Err(SchedulingError::InvalidRequest(
                "Requested time is outside the host's availability".into(),
            ));
        }

        let contact_id = self.lookup_contact(&guest.email, &meeting_type.host_id).await;

        let host_lock = self.lock_for_host(&meeting_type.host_id);
        let _guard = host_lock.lock().await;

        let confirmed = self
            .fetch_conflict_candidates(&meeting_type, requested_start, requested_end)
            .await?;

        if has_buffered_conflict(&meeting_type, &confirmed, requested_start, requested_end, None) {
            warn!(
                "create_booking: slot {} rejected for host {}: conflict",
                requested_start, meeting_type.host_id
            );
            return Err(SchedulingError::SlotUnavailable(
                "Selected time slot is no longer available".into(),
            ));
        }

        let booking = Booking::new(NewBookingParams {
            host_id: meeting_type.host_id.clone(),
            meeting_type_id: meeting_type.id.clone(),
            contact_id,
            guest,
            start: requested_start,
            duration_min: meeting_type.duration_min,
        });

        let created = self.insert_with_code_retry(booking).await?;
        info!(
            "Booking confirmed: {} ({}) for host {}",
            created.id, created.confirmation_code, created.host_id
        );
        Ok(created)
    }

    /// Idempotency under races is by observation: a second concurrent
    /// cancel simply finds the booking already cancelled.
    pub async fn cancel_booking(
        &self,
        confirmation_code: &str,
        reason: Option<String>,
    ) -> Result<Booking, SchedulingError> {
        let mut booking = self
            .booking_repo
            .find_by_code(confirmation_code)
            .await?
            .ok_or_else(|| SchedulingError::NotFound("Booking not found".into()))?;

        if booking.status == BookingStatus::Cancelled {
            return Err(SchedulingError::AlreadyCancelled(confirmation_code.into()));
        }

        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(self.clock.now());
        booking.cancellation_reason = reason;

        let cancelled = self.booking_repo.update(&booking).await?;
        info!("Booking cancelled: {}", cancelled.id);
        Ok(cancelled)
    }

    /// Moves a booking in place. The new end is derived from the booking's
    /// *existing* duration, not the meeting type, so a meeting type edited
    /// after the original booking does not change it on reschedule.
    pub async fn reschedule_booking(
        &self,
        confirmation_code: &str,
        new_start: DateTime<Utc>,
    ) -> Result<Booking, SchedulingError> {
        let mut booking = self
            .booking_repo
            .find_by_code(confirmation_code)
            .await?
            .ok_or_else(|| SchedulingError::NotFound("Booking not found".into()))?;

        if booking.status == BookingStatus::Cancelled {
            return Err(SchedulingError::AlreadyCancelled(confirmation_code.into()));
        }

        let duration = booking.end_time - booking.start_time;
        let new_end = new_start + duration;

        // The meeting type may have been deactivated or deleted since the
        // original booking; buffers then degrade to a raw overlap check.
        let meeting_type = self
            .meeting_type_repo
            .find_active_by_id(&booking.meeting_type_id)
            .await?;

        let host_lock = self.lock_for_host(&booking.host_id);
        let _guard = host_lock.lock().await;

        let pad = conflict_padding(meeting_type.as_ref());
        let confirmed = self
            .booking_repo
            .find_confirmed_overlapping(&booking.host_id, new_start - pad, new_end + pad)
            .await?;

        let conflict = match &meeting_type {
            Some(mt) => {
                has_buffered_conflict(mt, &confirmed, new_start, new_end, Some(&booking.id))
            }
            None => has_conflict(&confirmed, new_start, new_end, Some(&booking.id)),
        };

        if conflict {
            return Err(SchedulingError::SlotUnavailable(
                "Target time slot is not available".into(),
            ));
        }

        booking.start_time = new_start;
        booking.end_time = new_end;

        let updated = self.booking_repo.update(&booking).await?;
        info!("Booking rescheduled: {} -> {}", updated.id, updated.start_time);
        Ok(updated)
    }

    fn lock_for_host(&self, host_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.host_locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(host_id.to_string()).or_default().clone()
    }

    /// True if [start, end) lies fully inside some active window. A UTC
    /// instant can fall on the previous or next calendar day in a window's
    /// local zone, so the adjacent weekdays are checked too.
    async fn within_availability(
        &self,
        host_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, SchedulingError> {
        let utc_date = start.date_naive();

        for date in [
            utc_date - Duration::days(1),
            utc_date,
            utc_date + Duration::days(1),
        ] {
            let windows = self
                .availability_repo
                .find_active_windows(host_id, day_of_week(date))
                .await?;

            for window in &windows {
                if let Some((window_start, window_end)) = window_bounds_utc(window, date) {
                    if start >= window_start && end <= window_end {
                        return Ok(true);
                    }
                }
            }
        }

        Ok(false)
    }

    async fn lookup_contact(&self, email: &str, host_id: &str) -> Option<String> {
        match self.contact_lookup.find_by_email(email, host_id).await {
            Ok(contact) => contact.map(|c| c.id),
            Err(e) => {
                // Enrichment only; a failed lookup never blocks the booking.
                warn!("Contact lookup failed for {}: {}", email, e);
                None
            }
        }
    }

    async fn fetch_conflict_candidates(
        &self,
        meeting_type: &MeetingType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, SchedulingError> {
        let pad = meeting_type.buffer_before() + meeting_type.buffer_after();
        self.booking_repo
            .find_confirmed_overlapping(&meeting_type.host_id, start - pad, end + pad)
            .await
    }

    async fn insert_with_code_retry(
        &self,
        mut booking: Booking,
    ) -> Result<Booking, SchedulingError> {
        for attempt in 0..CODE_INSERT_RETRIES {
            match self.booking_repo.insert(&booking).await {
                Ok(created) => return Ok(created),
                Err(SchedulingError::CodeCollision) => {
                    warn!(
                        "Confirmation code collision on {} (attempt {})",
                        booking.confirmation_code,
                        attempt + 1
                    );
                    booking.confirmation_code = generate_confirmation_code();
                }
                Err(e) => return Err(e),
            }
        }

        Err(SchedulingError::Internal(
            "Confirmation code generation kept colliding".into(),
        ))
    }
}

fn conflict_padding(meeting_type: Option<&MeetingType>) -> Duration {
    match meeting_type {
        Some(mt) => mt.buffer_before() + mt.buffer_after(),
        None => Duration::zero(),
    }
}

use crate::domain::models::availability::AvailabilityWindow;
use crate::domain::models::booking::Booking;
use crate::domain::models::meeting_type::MeetingType;
use crate::domain::models::slot::Slot;
use crate::domain::services::conflict::has_buffered_conflict;
use crate::domain::services::time::step_slots;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Computes bookable slots for one host on one date. Pure over its inputs:
/// the confirmed-booking set is fetched once by the caller, and `now` is
/// injected so the notice cutoff is testable.
///
/// Windows are converted to UTC via their own IANA zone for the target date.
/// Overlapping windows may yield overlapping slots; that is host
/// misconfiguration and is passed through, not filtered.
pub fn generate_slots(
    meeting_type: &MeetingType,
    windows: &[AvailabilityWindow],
    confirmed_bookings: &[Booking],
    target_date: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<Slot> {
    let duration = meeting_type.duration();
    if meeting_type.duration_min <= 0 {
        return Vec::new();
    }

    let min_bookable = now + Duration::hours(meeting_type.min_notice_hours as i64);

    let mut slots = Vec::new();

    for window in windows {
        let Some((window_start, window_end)) = window_bounds_utc(window, target_date) else {
            continue;
        };

        for candidate_start in step_slots(window_start, window_end, duration) {
            if candidate_start < min_bookable {
                continue;
            }

            let candidate_end = candidate_start + duration;

            if has_buffered_conflict(
                meeting_type,
                confirmed_bookings,
                candidate_start,
                candidate_end,
                None,
            ) {
                continue;
            }

            slots.push(Slot {
                start_time: candidate_start,
                end_time: candidate_end,
                duration_min: meeting_type.duration_min,
            });
        }
    }

    slots.sort_by_key(|s| s.start_time);
    slots
}

/// Resolves a window's local HH:MM bounds to UTC instants on the given date.
/// Returns None when the times fail to parse or do not exist in the window's
/// zone on that date (DST gap); such windows contribute no slots.
pub fn window_bounds_utc(
    window: &AvailabilityWindow,
    date: NaiveDate,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let tz: Tz = match window.timezone.parse() {
        Ok(tz) => tz,
        Err(_) => {
            warn!(
                "Skipping window {}: unknown timezone {}",
                window.id, window.timezone
            );
            return None;
        }
    };

    let start = NaiveTime::parse_from_str(&window.start_time, "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(&window.end_time, "%H:%M").ok()?;

    let start_utc = tz
        .from_local_datetime(&date.and_time(start))
        .single()?
        .with_timezone(&Utc);
    let end_utc = tz
        .from_local_datetime(&date.and_time(end))
        .single()?
        .with_timezone(&Utc);

    if start_utc >= end_utc {
        return None;
    }

    Some((start_utc, end_utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::{Booking, GuestInfo, NewBookingParams};
    use chrono::TimeZone;

    fn window(day_of_week: i32, start: &str, end: &str, tz: &str) -> AvailabilityWindow {
        AvailabilityWindow::new(
            "host-1".into(),
            day_of_week,
            start.into(),
            end.into(),
            tz.into(),
        )
        .unwrap()
    }

    fn meeting_type(notice_hours: i32) -> MeetingType {
        MeetingType {
            id: "mt-1".into(),
            host_id: "host-1".into(),
            name: "Intro call".into(),
            duration_min: 30,
            buffer_before_min: 0,
            buffer_after_min: 0,
            max_booking_days: 30,
            min_notice_hours: notice_hours,
            is_active: true,
            is_public: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn every_slot_lies_inside_a_window_and_past_the_notice_cutoff() {
        let mt = meeting_type(1);
        let windows = vec![window(1, "09:00", "12:00", "UTC")];
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 9, 40, 0).unwrap();

        let slots = generate_slots(&mt, &windows, &[], date, now);

        assert!(!slots.is_empty());
        let cutoff = now + Duration::hours(1);
        let window_start = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        let window_end = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
        for slot in &slots {
            assert!(slot.start_time >= cutoff);
            assert!(slot.start_time >= window_start);
            assert!(slot.end_time <= window_end);
        }
        assert_eq!(slots[0].start_time, Utc.with_ymd_and_hms(2025, 6, 2, 10, 45, 0).unwrap());
    }

    #[test]
    fn confirmed_bookings_remove_overlapping_candidates() {
        let mt = meeting_type(0);
        let windows = vec![window(1, "09:00", "11:00", "UTC")];
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        let booked = Booking::new(NewBookingParams {
            host_id: "host-1".into(),
            meeting_type_id: "mt-1".into(),
            contact_id: None,
            guest: GuestInfo {
                name: "Guest".into(),
                email: "guest@example.com".into(),
            },
            start: Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap(),
            duration_min: 30,
        });

        let slots = generate_slots(&mt, &windows, &[booked], date, now);
        let starts: Vec<_> = slots.iter().map(|s| s.start_time).collect();

        assert_eq!(
            starts,
            vec![
                Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 6, 2, 9, 15, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 6, 2, 10, 30, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn windows_falling_in_a_dst_gap_are_skipped() {
        // 2025-03-09 02:30 does not exist in America/New_York.
        let w = window(0, "02:30", "03:30", "America/New_York");
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert!(window_bounds_utc(&w, date).is_none());
    }

    #[test]
    fn unknown_timezone_contributes_no_slots() {
        let w = window(1, "09:00", "17:00", "Not/AZone");
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert!(window_bounds_utc(&w, date).is_none());
    }
}

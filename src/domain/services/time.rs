use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Candidate starts advance on a fixed 15-minute grid regardless of meeting
/// duration. Design constant, not derived.
pub const SLOT_STEP_MINUTES: i64 = 15;

/// Lazy sequence of candidate start instants inside [window_start,
/// window_end]. A start is yielded only if the full meeting still fits
/// before window_end.
pub fn step_slots(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    duration: Duration,
) -> impl Iterator<Item = DateTime<Utc>> {
    std::iter::successors(Some(window_start), |cur| {
        Some(*cur + Duration::minutes(SLOT_STEP_MINUTES))
    })
    .take_while(move |start| *start + duration <= window_end)
}

/// Half-open interval overlap. The single source of truth for "conflict":
/// every place two intervals are compared goes through here.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Weekday index matching the availability window encoding: Sunday=0.
pub fn day_of_week(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookable candidate returned by slot listing. Instants are UTC; callers
/// render them in whatever zone the guest asked for.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Slot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_min: i32,
}

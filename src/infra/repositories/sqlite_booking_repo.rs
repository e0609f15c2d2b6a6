use crate::domain::models::booking::Booking;
use crate::domain::ports::BookingRepository;
use crate::error::SchedulingError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn find_confirmed_overlapping(
        &self,
        host_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, SchedulingError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE host_id = ? AND start_time < ? AND end_time > ? AND status = 'confirmed'
             ORDER BY start_time ASC"
        )
            .bind(host_id).bind(range_end).bind(range_start)
            .fetch_all(&self.pool).await.map_err(SchedulingError::from)
    }

    async fn find_by_code(
        &self,
        confirmation_code: &str,
    ) -> Result<Option<Booking>, SchedulingError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE confirmation_code = ?")
            .bind(confirmation_code)
            .fetch_optional(&self.pool).await.map_err(SchedulingError::from)
    }

    async fn insert(&self, booking: &Booking) -> Result<Booking, SchedulingError> {
        // The unique index on confirmation_code surfaces collisions as
        // SchedulingError::CodeCollision via the From<sqlx::Error> mapping.
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, host_id, meeting_type_id, contact_id, guest_name, guest_email, start_time, end_time, status, confirmation_code, cancellation_reason, cancelled_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.host_id).bind(&booking.meeting_type_id).bind(&booking.contact_id)
            .bind(&booking.guest_name).bind(&booking.guest_email)
            .bind(booking.start_time).bind(booking.end_time).bind(booking.status)
            .bind(&booking.confirmation_code).bind(&booking.cancellation_reason)
            .bind(booking.cancelled_at).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(SchedulingError::from)
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, SchedulingError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET start_time = ?, end_time = ?, status = ?, cancellation_reason = ?, cancelled_at = ?
             WHERE id = ?
             RETURNING *"
        )
            .bind(booking.start_time).bind(booking.end_time).bind(booking.status)
            .bind(&booking.cancellation_reason).bind(booking.cancelled_at)
            .bind(&booking.id)
            .fetch_one(&self.pool).await.map_err(SchedulingError::from)
    }
}

use crate::domain::models::availability::AvailabilityWindow;
use crate::domain::ports::AvailabilityRepository;
use crate::error::SchedulingError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAvailabilityRepo {
    pool: SqlitePool,
}

impl SqliteAvailabilityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, window: &AvailabilityWindow) -> Result<AvailabilityWindow, SchedulingError> {
        sqlx::query_as::<_, AvailabilityWindow>(
            "INSERT INTO availability_windows (id, host_id, day_of_week, start_time, end_time, timezone, is_active, deleted_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&window.id).bind(&window.host_id).bind(window.day_of_week)
            .bind(&window.start_time).bind(&window.end_time).bind(&window.timezone)
            .bind(window.is_active).bind(window.deleted_at).bind(window.created_at)
            .fetch_one(&self.pool).await.map_err(SchedulingError::from)
    }

    /// Soft delete: windows are tombstoned, never physically purged, so the
    /// booking history they produced stays auditable.
    pub async fn soft_delete(&self, id: &str) -> Result<(), SchedulingError> {
        let result = sqlx::query(
            "UPDATE availability_windows SET deleted_at = CURRENT_TIMESTAMP WHERE id = ? AND deleted_at IS NULL"
        )
            .bind(id)
            .execute(&self.pool).await.map_err(SchedulingError::from)?;
        if result.rows_affected() == 0 {
            return Err(SchedulingError::NotFound("Availability window not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepo {
    async fn find_active_windows(
        &self,
        host_id: &str,
        day_of_week: i32,
    ) -> Result<Vec<AvailabilityWindow>, SchedulingError> {
        sqlx::query_as::<_, AvailabilityWindow>(
            "SELECT * FROM availability_windows
             WHERE host_id = ? AND day_of_week = ? AND is_active = TRUE AND deleted_at IS NULL
             ORDER BY start_time ASC"
        )
            .bind(host_id).bind(day_of_week)
            .fetch_all(&self.pool).await.map_err(SchedulingError::from)
    }
}

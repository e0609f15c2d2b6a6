use crate::domain::models::meeting_type::MeetingType;
use crate::domain::ports::MeetingTypeRepository;
use crate::error::SchedulingError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteMeetingTypeRepo {
    pool: SqlitePool,
}

impl SqliteMeetingTypeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, meeting_type: &MeetingType) -> Result<MeetingType, SchedulingError> {
        sqlx::query_as::<_, MeetingType>(
            "INSERT INTO meeting_types (id, host_id, name, duration_min, buffer_before_min, buffer_after_min, max_booking_days, min_notice_hours, is_active, is_public, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&meeting_type.id).bind(&meeting_type.host_id).bind(&meeting_type.name)
            .bind(meeting_type.duration_min).bind(meeting_type.buffer_before_min).bind(meeting_type.buffer_after_min)
            .bind(meeting_type.max_booking_days).bind(meeting_type.min_notice_hours)
            .bind(meeting_type.is_active).bind(meeting_type.is_public).bind(meeting_type.created_at)
            .fetch_one(&self.pool).await.map_err(SchedulingError::from)
    }
}

#[async_trait]
impl MeetingTypeRepository for SqliteMeetingTypeRepo {
    async fn find_active_by_id(&self, id: &str) -> Result<Option<MeetingType>, SchedulingError> {
        sqlx::query_as::<_, MeetingType>(
            "SELECT * FROM meeting_types WHERE id = ? AND is_active = TRUE"
        )
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(SchedulingError::from)
    }
}

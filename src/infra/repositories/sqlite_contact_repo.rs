use crate::domain::models::contact::ContactRef;
use crate::domain::ports::ContactLookup;
use crate::error::SchedulingError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteContactRepo {
    pool: SqlitePool,
}

impl SqliteContactRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactLookup for SqliteContactRepo {
    async fn find_by_email(
        &self,
        email: &str,
        host_id: &str,
    ) -> Result<Option<ContactRef>, SchedulingError> {
        sqlx::query_as::<_, ContactRef>(
            "SELECT id, email FROM contacts WHERE host_id = ? AND email = ?"
        )
            .bind(host_id).bind(email)
            .fetch_optional(&self.pool).await.map_err(SchedulingError::from)
    }
}

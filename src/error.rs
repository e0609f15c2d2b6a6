use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Slot unavailable: {0}")]
    SlotUnavailable(String),
    #[error("Booking already cancelled: {0}")]
    AlreadyCancelled(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Confirmation code collision")]
    CodeCollision,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for SchedulingError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            let code = db_err.code().unwrap_or_default();

            // 2067 = SQLite Unique Constraint
            // 23505 = PostgreSQL Unique Violation
            if code == "2067" || code == "23505" {
                return SchedulingError::CodeCollision;
            }
        }
        SchedulingError::Database(e)
    }
}

use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::Config;
use crate::domain::services::booking_service::BookingService;
use crate::error::SchedulingError;
use crate::infra::clock::SystemClock;
use crate::infra::repositories::{
    sqlite_availability_repo::SqliteAvailabilityRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_contact_repo::SqliteContactRepo, sqlite_meeting_type_repo::SqliteMeetingTypeRepo,
};

pub async fn connect_sqlite(database_url: &str) -> Result<SqlitePool, SchedulingError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(SchedulingError::Database)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    // Single connection: SQLite allows one writer at a time anyway, and a
    // pool of WAL readers can serve snapshots that predate a commit made on
    // a sibling connection. The booking check-then-act sequence needs the
    // re-fetch to observe every committed write, so all statements share
    // one connection.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(SchedulingError::Database)?;

    sqlx::migrate!("./migrations/sqlite")
        .run(&pool)
        .await
        .map_err(|e| SchedulingError::Internal(format!("Migration failed: {}", e)))?;

    Ok(pool)
}

pub async fn bootstrap_engine(config: &Config) -> Result<BookingService, SchedulingError> {
    info!("Initializing SQLite connection...");
    let pool = connect_sqlite(&config.database_url).await?;
    Ok(build_engine(pool))
}

pub fn build_engine(pool: SqlitePool) -> BookingService {
    BookingService::new(
        Arc::new(SqliteAvailabilityRepo::new(pool.clone())),
        Arc::new(SqliteBookingRepo::new(pool.clone())),
        Arc::new(SqliteMeetingTypeRepo::new(pool.clone())),
        Arc::new(SqliteContactRepo::new(pool)),
        Arc::new(SystemClock),
    )
}

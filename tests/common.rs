use chrono::{DateTime, TimeZone, Utc};
use scheduling_engine::domain::models::availability::AvailabilityWindow;
use scheduling_engine::domain::models::booking::GuestInfo;
use scheduling_engine::domain::models::meeting_type::MeetingType;
use scheduling_engine::domain::ports::Clock;
use scheduling_engine::domain::services::booking_service::BookingService;
use scheduling_engine::infra::factory::connect_sqlite;
use scheduling_engine::infra::repositories::{
    sqlite_availability_repo::SqliteAvailabilityRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_contact_repo::SqliteContactRepo, sqlite_meeting_type_repo::SqliteMeetingTypeRepo,
};
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Fixed, settable clock so notice-window behavior is deterministic.
pub struct MockClock(Mutex<DateTime<Utc>>);

impl MockClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    #[allow(dead_code)]
    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// 2025-06-02 is a Monday; most tests book against a Monday window.
pub fn monday_8am() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn monday_at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
}

#[allow(dead_code)]
pub struct TestEngine {
    pub engine: BookingService,
    pub clock: Arc<MockClock>,
    pub pool: SqlitePool,
    pub availability_repo: Arc<SqliteAvailabilityRepo>,
    pub meeting_type_repo: Arc<SqliteMeetingTypeRepo>,
    db_filename: String,
}

impl TestEngine {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let pool = connect_sqlite(&db_url)
            .await
            .expect("Failed to set up test db");

        let clock = Arc::new(MockClock::new(monday_8am()));
        let availability_repo = Arc::new(SqliteAvailabilityRepo::new(pool.clone()));
        let meeting_type_repo = Arc::new(SqliteMeetingTypeRepo::new(pool.clone()));

        let engine = BookingService::new(
            availability_repo.clone(),
            Arc::new(SqliteBookingRepo::new(pool.clone())),
            meeting_type_repo.clone(),
            Arc::new(SqliteContactRepo::new(pool.clone())),
            clock.clone(),
        );

        Self {
            engine,
            clock,
            pool,
            availability_repo,
            meeting_type_repo,
            db_filename,
        }
    }

    /// Monday 09:00-17:00 UTC window for the host.
    #[allow(dead_code)]
    pub async fn seed_monday_window(&self, host_id: &str) -> AvailabilityWindow {
        self.seed_window(host_id, 1, "09:00", "17:00", "UTC").await
    }

    #[allow(dead_code)]
    pub async fn seed_window(
        &self,
        host_id: &str,
        day_of_week: i32,
        start: &str,
        end: &str,
        timezone: &str,
    ) -> AvailabilityWindow {
        let window = AvailabilityWindow::new(
            host_id.to_string(),
            day_of_week,
            start.to_string(),
            end.to_string(),
            timezone.to_string(),
        )
        .expect("Invalid test window");
        self.availability_repo
            .insert(&window)
            .await
            .expect("Failed to seed window")
    }

    #[allow(dead_code)]
    pub async fn seed_meeting_type(&self, meeting_type: &MeetingType) -> MeetingType {
        self.meeting_type_repo
            .insert(meeting_type)
            .await
            .expect("Failed to seed meeting type")
    }

    #[allow(dead_code)]
    pub async fn seed_contact(&self, host_id: &str, email: &str) -> String {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO contacts (id, host_id, email, name, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(host_id)
        .bind(email)
        .bind("Seeded Contact")
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .expect("Failed to seed contact");
        id
    }
}

/// 30-minute meeting, no buffers, 1 hour notice, 30-day horizon.
pub fn default_meeting_type(host_id: &str) -> MeetingType {
    MeetingType {
        id: Uuid::new_v4().to_string(),
        host_id: host_id.to_string(),
        name: "Intro call".to_string(),
        duration_min: 30,
        buffer_before_min: 0,
        buffer_after_min: 0,
        max_booking_days: 30,
        min_notice_hours: 1,
        is_active: true,
        is_public: true,
        created_at: Utc::now(),
    }
}

#[allow(dead_code)]
pub fn guest() -> GuestInfo {
    GuestInfo {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
    }
}

impl Drop for TestEngine {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

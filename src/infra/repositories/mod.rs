pub mod sqlite_availability_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_contact_repo;
pub mod sqlite_meeting_type_repo;

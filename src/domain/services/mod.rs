pub mod booking_service;
pub mod conflict;
pub mod slots;
pub mod time;

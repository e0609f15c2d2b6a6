pub mod availability;
pub mod booking;
pub mod contact;
pub mod meeting_type;
pub mod slot;

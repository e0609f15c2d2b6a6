use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Weak reference to a CRM contact. A booking never owns the contact's
/// lifecycle; the reference is enrichment only.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ContactRef {
    pub id: String,
    pub email: String,
}

//! Stored chart image models

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A rendered image written to the image directory
#[derive(Debug, Clone)]
pub struct Artifact {
    pub id: Uuid,
    pub image_bytes: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

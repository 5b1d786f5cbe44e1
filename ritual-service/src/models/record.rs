use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::User;

/// One completion of a ritual by a user. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RitualRecord {
    pub id: i64,
    pub ritual_id: i64,
    pub user_id: i64,
    pub image_url: Option<String>,
    pub review: Option<String>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRitualRecord {
    pub ritual_id: i64,
    pub user_id: i64,
    pub image_url: Option<String>,
    pub review: Option<String>,
}

/// A record together with the user who completed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RitualRecordWithUser {
    #[serde(flatten)]
    pub record: RitualRecord,
    pub user: User,
}

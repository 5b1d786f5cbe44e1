use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use super::User;

pub const DEFAULT_MINUTES: i32 = 30;

/// A recurring activity shared by one or more users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Ritual {
    pub id: i64,
    pub title: String,
    pub default_minutes: i32,
    pub rule: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRitual {
    pub title: String,
    pub default_minutes: i32,
    pub rule: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A ritual with its participants flattened out of the join table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RitualWithUsers {
    #[serde(flatten)]
    pub ritual: Ritual,
    pub users: Vec<User>,
}

/// One `ritual_users` row joined with its user.
#[derive(Debug, Clone, FromRow)]
pub struct RitualMember {
    pub ritual_id: i64,
    #[sqlx(flatten)]
    pub user: User,
}

/// Groups join rows under their rituals, keeping the ritual order and the
/// member order as given. Members of unknown rituals are dropped.
pub fn attach_users(rituals: Vec<Ritual>, members: Vec<RitualMember>) -> Vec<RitualWithUsers> {
    let mut by_ritual: HashMap<i64, Vec<User>> = HashMap::new();
    for member in members {
        by_ritual.entry(member.ritual_id).or_default().push(member.user);
    }

    rituals
        .into_iter()
        .map(|ritual| {
            let users = by_ritual.remove(&ritual.id).unwrap_or_default();
            RitualWithUsers { ritual, users }
        })
        .collect()
}

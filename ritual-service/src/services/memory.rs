//! In-process [`RitualStore`] with the same constraints as the SQL schema:
//! unique tokens, foreign keys on memberships and records, cascading deletes.

use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Reverse;
use tokio::sync::RwLock;

use super::store::{RitualStore, StoreError};
use crate::models::{
    attach_users, NewRitual, NewRitualRecord, NewUser, Ritual, RitualMember, RitualRecord,
    RitualRecordWithUser, RitualWithUsers, User,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    rituals: Vec<Ritual>,
    ritual_users: Vec<(i64, i64)>,
    records: Vec<RitualRecord>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn has_ritual(&self, id: i64) -> bool {
        self.rituals.iter().any(|r| r.id == id)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn ritual_count(&self) -> usize {
        self.tables.read().await.rituals.len()
    }
}

#[async_trait]
impl RitualStore for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.read().await;
        let mut users = tables.users.clone();
        users.sort_by_key(|u| Reverse((u.created_at, u.id)));
        Ok(users)
    }

    async fn find_user_by_token(&self, fcm_token: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.fcm_token == fcm_token)
            .cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.fcm_token == user.fcm_token) {
            return Err(StoreError::UniqueViolation(
                "users_fcm_token_key".to_string(),
            ));
        }

        let created = User {
            id: tables.next_id(),
            fcm_token: user.fcm_token.clone(),
            nickname: user.nickname.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn list_rituals(&self) -> Result<Vec<RitualWithUsers>, StoreError> {
        let tables = self.tables.read().await;

        let mut rituals = tables.rituals.clone();
        rituals.sort_by_key(|r| Reverse((r.created_at, r.id)));

        let mut members: Vec<RitualMember> = tables
            .ritual_users
            .iter()
            .filter_map(|&(ritual_id, user_id)| {
                tables.user(user_id).map(|user| RitualMember {
                    ritual_id,
                    user: user.clone(),
                })
            })
            .collect();
        members.sort_by_key(|m| (m.ritual_id, m.user.id));

        Ok(attach_users(rituals, members))
    }

    async fn insert_ritual(&self, ritual: &NewRitual) -> Result<Ritual, StoreError> {
        let mut tables = self.tables.write().await;
        let created = Ritual {
            id: tables.next_id(),
            title: ritual.title.clone(),
            default_minutes: ritual.default_minutes,
            rule: ritual.rule.clone(),
            start_date: ritual.start_date,
            end_date: ritual.end_date,
            created_at: Utc::now(),
        };
        tables.rituals.push(created.clone());
        Ok(created)
    }

    async fn insert_ritual_users(
        &self,
        ritual_id: i64,
        user_ids: &[i64],
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.has_ritual(ritual_id) {
            return Err(StoreError::ForeignKeyViolation(
                "ritual_users_ritual_id_fkey".to_string(),
            ));
        }
        for (pos, user_id) in user_ids.iter().enumerate() {
            if tables.user(*user_id).is_none() {
                return Err(StoreError::ForeignKeyViolation(
                    "ritual_users_user_id_fkey".to_string(),
                ));
            }
            let repeated = user_ids[..pos].contains(user_id)
                || tables.ritual_users.contains(&(ritual_id, *user_id));
            if repeated {
                return Err(StoreError::UniqueViolation(
                    "ritual_users_pkey".to_string(),
                ));
            }
        }

        tables
            .ritual_users
            .extend(user_ids.iter().map(|user_id| (ritual_id, *user_id)));
        Ok(())
    }

    async fn delete_ritual(&self, ritual_id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.rituals.retain(|r| r.id != ritual_id);
        tables.ritual_users.retain(|&(rid, _)| rid != ritual_id);
        tables.records.retain(|r| r.ritual_id != ritual_id);
        Ok(())
    }

    async fn insert_ritual_record(
        &self,
        record: &NewRitualRecord,
    ) -> Result<RitualRecord, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.has_ritual(record.ritual_id) {
            return Err(StoreError::ForeignKeyViolation(
                "ritual_records_ritual_id_fkey".to_string(),
            ));
        }
        if tables.user(record.user_id).is_none() {
            return Err(StoreError::ForeignKeyViolation(
                "ritual_records_user_id_fkey".to_string(),
            ));
        }

        let created = RitualRecord {
            id: tables.next_id(),
            ritual_id: record.ritual_id,
            user_id: record.user_id,
            image_url: record.image_url.clone(),
            review: record.review.clone(),
            completed_at: Utc::now(),
        };
        tables.records.push(created.clone());
        Ok(created)
    }

    async fn list_ritual_records(
        &self,
        ritual_id: i64,
    ) -> Result<Vec<RitualRecordWithUser>, StoreError> {
        let tables = self.tables.read().await;

        let mut records: Vec<RitualRecordWithUser> = tables
            .records
            .iter()
            .filter(|r| r.ritual_id == ritual_id)
            .filter_map(|record| {
                tables.user(record.user_id).map(|user| RitualRecordWithUser {
                    record: record.clone(),
                    user: user.clone(),
                })
            })
            .collect();
        records.sort_by_key(|r| Reverse((r.record.completed_at, r.record.id)));
        Ok(records)
    }
}

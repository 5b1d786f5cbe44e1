//! Storage seam for users, rituals, memberships and completion records.

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

use crate::models::{
    NewRitual, NewRitualRecord, NewUser, Ritual, RitualRecord, RitualRecordWithUser,
    RitualWithUsers, User,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("store error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation(db_err.message().to_string());
            }
        }
        StoreError::Backend(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

/// Table-scoped operations the HTTP layer needs. Listings are newest first.
#[async_trait]
pub trait RitualStore: Send + Sync {
    async fn health_check(&self) -> Result<(), StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Exact match on `fcm_token`; `None` when no row exists.
    async fn find_user_by_token(&self, fcm_token: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::UniqueViolation`] when the token is taken.
    async fn insert_user(&self, user: &NewUser) -> Result<User, StoreError>;

    async fn list_rituals(&self) -> Result<Vec<RitualWithUsers>, StoreError>;

    async fn insert_ritual(&self, ritual: &NewRitual) -> Result<Ritual, StoreError>;

    /// Inserts every membership row for `ritual_id` or none of them.
    async fn insert_ritual_users(&self, ritual_id: i64, user_ids: &[i64])
        -> Result<(), StoreError>;

    async fn delete_ritual(&self, ritual_id: i64) -> Result<(), StoreError>;

    async fn insert_ritual_record(
        &self,
        record: &NewRitualRecord,
    ) -> Result<RitualRecord, StoreError>;

    async fn list_ritual_records(
        &self,
        ritual_id: i64,
    ) -> Result<Vec<RitualRecordWithUser>, StoreError>;
}

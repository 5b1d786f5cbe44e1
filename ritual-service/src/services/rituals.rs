//! Multi-step operations over a [`RitualStore`].

use super::store::{RitualStore, StoreError};
use crate::models::{NewRitual, NewUser, Ritual, User};

/// Outcome of [`get_or_create_user`].
#[derive(Debug, Clone, PartialEq)]
pub struct UserLookup {
    pub user: User,
    pub created: bool,
}

/// Returns the user registered under `fcm_token`, creating it first if needed.
///
/// Two concurrent callers may both miss the lookup; the loser's insert hits
/// the unique token constraint and it returns the winner's row instead.
pub async fn get_or_create_user(
    store: &dyn RitualStore,
    fcm_token: &str,
    nickname: Option<String>,
) -> Result<UserLookup, StoreError> {
    if let Some(user) = store.find_user_by_token(fcm_token).await? {
        return Ok(UserLookup {
            user,
            created: false,
        });
    }

    let new_user = NewUser {
        fcm_token: fcm_token.to_string(),
        nickname,
    };

    match store.insert_user(&new_user).await {
        Ok(user) => Ok(UserLookup {
            user,
            created: true,
        }),
        Err(StoreError::UniqueViolation(constraint)) => {
            tracing::info!(%constraint, "User registered concurrently, returning existing row");
            let user = store.find_user_by_token(fcm_token).await?.ok_or_else(|| {
                StoreError::Backend(format!(
                    "user vanished after unique violation on {}",
                    constraint
                ))
            })?;
            Ok(UserLookup {
                user,
                created: false,
            })
        }
        Err(e) => Err(e),
    }
}

/// Creates a ritual and its memberships.
///
/// If the memberships cannot be written the ritual row is deleted again and
/// the membership error is returned. A failing delete is logged only.
pub async fn create_ritual(
    store: &dyn RitualStore,
    ritual: NewRitual,
    user_ids: &[i64],
) -> Result<Ritual, StoreError> {
    let user_ids = dedup_preserving_order(user_ids);
    let created = store.insert_ritual(&ritual).await?;

    if let Err(e) = store.insert_ritual_users(created.id, &user_ids).await {
        tracing::warn!(
            ritual_id = created.id,
            error = %e,
            "Failed to attach users, removing ritual"
        );
        if let Err(cleanup) = store.delete_ritual(created.id).await {
            tracing::error!(
                ritual_id = created.id,
                error = %cleanup,
                "Failed to remove orphaned ritual"
            );
        }
        return Err(e);
    }

    tracing::info!(
        ritual_id = created.id,
        users = user_ids.len(),
        "Ritual created"
    );
    Ok(created)
}

fn dedup_preserving_order(ids: &[i64]) -> Vec<i64> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }
    seen
}

pub mod redis;

use ::redis::{AsyncCommands, Client, cmd};
use uuid::Uuid;

use crate::db::models::CurrentUser;
use crate::error::AppError;

/// Seconds a resolved user stays cached before the auth middleware re-reads it.
pub const USER_CACHE_TTL: u64 = 300;

pub fn revoked_token_key(token_id: &str) -> String {
    format!("revoked_token:{}", token_id)
}

pub fn user_key(user_id: Uuid) -> String {
    format!("auth_user:{}", user_id)
}

/// Marks a token id as revoked until the token would have expired anyway.
pub async fn revoke_token(client: &Client, token_id: &str, ttl: u64) -> Result<(), AppError> {
    let mut conn = redis::connection(client).await?;
    let _: () = conn.set_ex(revoked_token_key(token_id), 1u8, ttl.max(1)).await?;
    Ok(())
}

pub async fn is_token_revoked(client: &Client, token_id: &str) -> Result<bool, AppError> {
    let mut conn = redis::connection(client).await?;
    let revoked: bool = conn.exists(revoked_token_key(token_id)).await?;
    Ok(revoked)
}

pub async fn cached_user(client: &Client, user_id: Uuid) -> Option<CurrentUser> {
    redis::get_cache(client, &user_key(user_id)).await
}

pub async fn cache_user(client: &Client, user: &CurrentUser) {
    if let Err(e) = redis::set_cache(client, &user_key(user.id), user, USER_CACHE_TTL).await {
        tracing::warn!(user_id = %user.id, error = %e, "Failed to cache user");
    }
}

pub async fn forget_user(client: &Client, user_id: Uuid) -> Result<(), AppError> {
    redis::delete_cache(client, &user_key(user_id)).await
}

pub async fn redis_health_check(client: &Client) -> Result<bool, AppError> {
    let mut conn = redis::connection(client).await?;
    let pong: String = cmd("PING").query_async(&mut conn).await?;
    Ok(pong == "PONG")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        assert_eq!(revoked_token_key("abc"), "revoked_token:abc");
        assert_eq!(
            user_key(Uuid::nil()),
            "auth_user:00000000-0000-0000-0000-000000000000"
        );
    }
}

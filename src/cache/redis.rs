use redis::AsyncCommands;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::AppError;

pub async fn connection(client: &redis::Client) -> Result<redis::aio::MultiplexedConnection, AppError> {
    Ok(client.get_multiplexed_async_connection().await?)
}

/// Cache reads are best effort: a miss and a broken entry look the same.
pub async fn get_cache<T: DeserializeOwned>(client: &redis::Client, key: &str) -> Option<T> {
    let mut conn = client.get_multiplexed_async_connection().await.ok()?;
    let value: Option<String> = conn.get(key).await.ok()?;
    serde_json::from_str(&value?).ok()
}

pub async fn set_cache<T: Serialize>(
    client: &redis::Client,
    key: &str,
    value: &T,
    ttl: u64,
) -> Result<(), AppError> {
    let json = serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize cache entry: {}", e)))?;
    let mut conn = connection(client).await?;
    let _: () = conn.set_ex(key, json, ttl).await?;
    Ok(())
}

pub async fn delete_cache(client: &redis::Client, key: &str) -> Result<(), AppError> {
    let mut conn = connection(client).await?;
    let _: i64 = conn.del(key).await?;
    Ok(())
}

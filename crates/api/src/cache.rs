//! Best-effort Redis response cache.
//!
//! Every operation is fallible-and-forgettable: a Redis error is logged at
//! `warn` and treated as a miss, never surfaced to the client. Without
//! `REDIS_URL` the [`Cache::Disabled`] variant makes every call a no-op.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;

#[derive(Clone)]
pub enum Cache {
    Redis(ConnectionManager),
    Disabled,
}

impl Cache {
    /// Connect from the `REDIS_URL` environment variable, if set.
    ///
    /// A connection failure at startup disables caching rather than aborting
    /// the server.
    pub async fn from_env() -> Self {
        let Ok(url) = std::env::var("REDIS_URL") else {
            return Cache::Disabled;
        };

        let client = match redis::Client::open(url) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid REDIS_URL, response cache disabled");
                return Cache::Disabled;
            }
        };

        match client.get_connection_manager().await {
            Ok(manager) => Cache::Redis(manager),
            Err(e) => {
                tracing::warn!(error = %e, "Redis unreachable, response cache disabled");
                Cache::Disabled
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Cache::Redis(_))
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let Cache::Redis(manager) = self else {
            return None;
        };
        let mut conn = manager.clone();
        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, key, "Cache read failed");
                None
            }
        }
    }

    pub async fn set(&self, key: &str, value: &str, ttl_secs: u64) {
        let Cache::Redis(manager) = self else {
            return;
        };
        let mut conn = manager.clone();
        if let Err(e) = conn.set_ex::<_, _, ()>(key, value, ttl_secs).await {
            tracing::warn!(error = %e, key, "Cache write failed");
        }
    }

    /// Delete every key starting with `prefix`. Used by admin mutations to
    /// drop stale public responses.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let Cache::Redis(manager) = self else {
            return;
        };
        let mut conn = manager.clone();
        let keys: Vec<String> = match conn.keys(format!("{prefix}*")).await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, prefix, "Cache key scan failed");
                return;
            }
        };
        if keys.is_empty() {
            return;
        }
        if let Err(e) = conn.del::<_, ()>(keys).await {
            tracing::warn!(error = %e, prefix, "Cache invalidation failed");
        }
    }
}

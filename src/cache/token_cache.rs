use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

/// Clave fija del token de autenticación
pub const TOKEN_CACHE_KEY: &str = "hp_express_auth_token";

/// Cache de token con TTL
///
/// Las operaciones no fallan: un backend caído se comporta como un MISS.
#[async_trait]
pub trait TokenCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64);
    async fn clear(&self, key: &str);
}

#[async_trait]
impl<T: TokenCache + ?Sized> TokenCache for Arc<T> {
    async fn get(&self, key: &str) -> Option<String> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) {
        (**self).set(key, value, ttl_seconds).await
    }

    async fn clear(&self, key: &str) {
        (**self).clear(key).await
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: i64,
}

/// Cache en memoria del proceso
#[derive(Clone, Default)]
pub struct MemoryTokenCache {
    inner: Arc<RwLock<HashMap<String, CachedToken>>>,
}

impl MemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segundos restantes de una entrada, si sigue vigente
    pub async fn ttl(&self, key: &str) -> Option<u64> {
        let now = Utc::now().timestamp();
        let entries = self.inner.read().await;
        entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| (entry.expires_at - now) as u64)
    }
}

#[async_trait]
impl TokenCache for MemoryTokenCache {
    async fn get(&self, key: &str) -> Option<String> {
        let now = Utc::now().timestamp();

        {
            let entries = self.inner.read().await;
            match entries.get(key) {
                Some(entry) if now < entry.expires_at => {
                    debug!("🔑 Token cache HIT para {}", key);
                    return Some(entry.value.clone());
                }
                Some(_) => debug!("⏰ Token cache EXPIRADO para {}", key),
                None => {
                    debug!("❌ Token cache MISS para {}", key);
                    return None;
                }
            }
        }

        let mut entries = self.inner.write().await;
        if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(key);
        }
        None
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) {
        let expires_at = Utc::now().timestamp() + ttl_seconds as i64;
        debug!("💾 Token cache SET para {} (TTL: {}s)", key, ttl_seconds);
        self.inner.write().await.insert(
            key.to_string(),
            CachedToken {
                value: value.to_string(),
                expires_at,
            },
        );
    }

    async fn clear(&self, key: &str) {
        debug!("🗑️ Token cache DELETE para {}", key);
        self.inner.write().await.remove(key);
    }
}

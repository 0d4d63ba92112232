use anyhow::Result;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use tracing::{debug, info, warn};

use super::token_cache::TokenCache;
use super::CacheConfig;

/// Cache de tokens en Redis, compartido entre procesos
#[derive(Clone)]
pub struct RedisTokenCache {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisTokenCache {
    /// Crear nuevo cliente Redis
    pub async fn new(config: CacheConfig) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager, config })
    }

    /// Generar clave de cache con prefijo
    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.config.key_prefix, key)
    }

    /// Verificar si Redis está conectado
    pub async fn is_connected(&self) -> bool {
        let mut conn = self.manager.clone();
        match redis::cmd("PING").query_async::<_, String>(&mut conn).await {
            Ok(response) => response == "PONG",
            Err(_) => false,
        }
    }
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    async fn get(&self, key: &str) -> Option<String> {
        let key = self.make_key(key);
        let mut conn = self.manager.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(value)) => {
                debug!("📥 Cache HIT para clave: {}", key);
                Some(value)
            }
            Ok(None) => {
                debug!("❌ Cache MISS para clave: {}", key);
                None
            }
            Err(e) => {
                warn!("⚠️ Error leyendo cache para clave {}: {}", key, e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) {
        if ttl_seconds == 0 {
            // SETEX rechaza TTL 0
            return;
        }

        let key = self.make_key(key);
        let mut conn = self.manager.clone();
        let result: RedisResult<()> = conn.set_ex(&key, value, ttl_seconds).await;

        match result {
            Ok(()) => debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl_seconds),
            Err(e) => warn!("⚠️ Error guardando en cache para clave {}: {}", key, e),
        }
    }

    async fn clear(&self, key: &str) {
        let key = self.make_key(key);
        let mut conn = self.manager.clone();
        let result: RedisResult<i64> = conn.del(&key).await;

        match result {
            Ok(count) => debug!("🗑️ Cache DELETE para clave: {} (eliminados: {})", key, count),
            Err(e) => warn!("⚠️ Error eliminando cache para clave {}: {}", key, e),
        }
    }
}

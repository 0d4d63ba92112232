//! Cache
//!
//! Este módulo contiene los caches del token de autenticación.

pub mod cache_config;
pub mod redis_client;
pub mod token_cache;

pub use cache_config::CacheConfig;
pub use redis_client::RedisTokenCache;
pub use token_cache::{MemoryTokenCache, TokenCache, TOKEN_CACHE_KEY};

//! Cliente de la API de HP Express (Hrvatska pošta, DXWebAPI)
//!
//! Autenticación con token cacheado, reintento único tras 401 y decodificación
//! tipada de los sobres de respuesta del transportista.

pub mod cache;
pub mod client;
pub mod clients;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use cache::{MemoryTokenCache, RedisTokenCache, TokenCache, TOKEN_CACHE_KEY};
pub use client::{HpExpressClient, HttpMethod};
pub use clients::{HttpResponse, HttpTransport, ReqwestTransport};
pub use config::{ApiMode, Credentials, Endpoints, EnvironmentConfig, SettingsProvider};
pub use utils::errors::{CarrierError, CarrierResult, TransportError, TransportErrorKind};

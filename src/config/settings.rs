//! Credenciales y modo de la API
//!
//! Las credenciales se leen una sola vez del proveedor de ajustes al
//! construir el cliente; no hay estado global.

use std::collections::HashMap;
use std::fmt;

/// Proveedor de ajustes clave/valor
pub trait SettingsProvider {
    fn get_all(&self) -> HashMap<String, String>;
}

impl SettingsProvider for HashMap<String, String> {
    fn get_all(&self) -> HashMap<String, String> {
        self.clone()
    }
}

/// Modo de la API: sandbox o producción
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    Test,
    Production,
}

impl ApiMode {
    pub fn auth_url(self) -> &'static str {
        match self {
            Self::Test => "https://dxwebapit.posta.hr:9000/api/authentication/client_auth",
            Self::Production => "https://dxwebapi.posta.hr:9000/api/authentication/client_auth",
        }
    }

    pub fn api_url(self) -> &'static str {
        match self {
            Self::Test => "https://dxwebapit.posta.hr:9020/api",
            Self::Production => "https://dxwebapi.posta.hr:9020/api",
        }
    }

    /// El sandbox usa certificados que no validan; solo producción verifica TLS
    pub fn verify_tls(self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_test(self) -> bool {
        matches!(self, Self::Test)
    }
}

/// URLs efectivas del cliente
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub auth_url: String,
    pub api_url: String,
}

impl Endpoints {
    pub fn for_mode(mode: ApiMode) -> Self {
        Self {
            auth_url: mode.auth_url().to_string(),
            api_url: mode.api_url().to_string(),
        }
    }

    /// `<host>/api/ping`, sin pasar por el prefijo de la API
    pub fn ping_url(&self) -> String {
        let base = self.api_url.trim_end_matches('/');
        let host = base.strip_suffix("/api").unwrap_or(base);
        format!("{}/api/ping", host)
    }
}

/// Credenciales del cliente
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub mode: ApiMode,
    pub username: String,
    pub password: String,
    pub customer_code: String,
}

impl Credentials {
    pub fn new(
        mode: ApiMode,
        username: impl Into<String>,
        password: impl Into<String>,
        customer_code: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            username: username.into(),
            password: password.into(),
            customer_code: customer_code.into(),
        }
    }

    /// Cargar desde ajustes: `test_mode` ("1" por defecto), `username`,
    /// `password` (en claro) y `cecode`
    pub fn from_settings(settings: &dyn SettingsProvider) -> Self {
        let mut values = settings.get_all();
        let test_mode = values.get("test_mode").map(String::as_str).unwrap_or("1") == "1";

        Self {
            mode: if test_mode { ApiMode::Test } else { ApiMode::Production },
            username: values.remove("username").unwrap_or_default(),
            password: values.remove("password").unwrap_or_default(),
            customer_code: values.remove("cecode").unwrap_or_default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("mode", &self.mode)
            .field("username", &self.username)
            .field("password", &"***")
            .field("customer_code", &self.customer_code)
            .finish()
    }
}

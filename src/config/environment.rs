//! Configuración de variables de entorno
//!
//! Este módulo lee los ajustes de HP Express del entorno para el binario y
//! los expone como `SettingsProvider`.

use std::collections::HashMap;
use std::env;

use base64::Engine;
use tracing::warn;

use super::settings::SettingsProvider;

/// Configuración del entorno
#[derive(Clone, Default)]
pub struct EnvironmentConfig {
    pub test_mode: bool,
    pub username: String,
    pub password: String,
    pub cecode: String,
    pub redis_url: Option<String>,
}

impl EnvironmentConfig {
    /// Leer `HP_EXPRESS_*` y `REDIS_URL`
    ///
    /// `HP_EXPRESS_PASSWORD_B64` se acepta porque así guarda el plugin la
    /// contraseña; `HP_EXPRESS_PASSWORD` en claro tiene prioridad.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let password = match lookup("HP_EXPRESS_PASSWORD").filter(|p| !p.is_empty()) {
            Some(plain) => plain,
            None => lookup("HP_EXPRESS_PASSWORD_B64")
                .map(|encoded| decode_password(&encoded))
                .unwrap_or_default(),
        };

        Self {
            test_mode: lookup("HP_EXPRESS_TEST_MODE")
                .map(|v| v.trim() != "0")
                .unwrap_or(true),
            username: lookup("HP_EXPRESS_USERNAME").unwrap_or_default(),
            password,
            cecode: lookup("HP_EXPRESS_CECODE").unwrap_or_default(),
            redis_url: lookup("REDIS_URL").filter(|u| !u.is_empty()),
        }
    }
}

fn decode_password(encoded: &str) -> String {
    match base64::engine::general_purpose::STANDARD.decode(encoded.trim()) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| {
            warn!("⚠️ HP_EXPRESS_PASSWORD_B64 no es UTF-8 válido");
            String::new()
        }),
        Err(e) => {
            warn!("⚠️ HP_EXPRESS_PASSWORD_B64 no es base64 válido: {}", e);
            String::new()
        }
    }
}

impl SettingsProvider for EnvironmentConfig {
    fn get_all(&self) -> HashMap<String, String> {
        HashMap::from([
            ("test_mode".to_string(), if self.test_mode { "1" } else { "0" }.to_string()),
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
            ("cecode".to_string(), self.cecode.clone()),
        ])
    }
}

use serde::{Deserialize, Serialize};

use super::lenient::{lenient_opt_i64, lenient_opt_string};

/// Request de autenticación contra `client_auth`
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response de autenticación
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(rename = "accessToken", default, deserialize_with = "lenient_opt_string")]
    pub access_token: Option<String>,
    /// Segundos de validez; el transportista lo manda a veces como string
    #[serde(rename = "expiresIn", default, deserialize_with = "lenient_opt_i64")]
    pub expires_in: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub message: Option<String>,
}

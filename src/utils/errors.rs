//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del cliente HP Express.
//! Cada variante lleva un mensaje que se puede mostrar tal cual al operador;
//! la causa de los errores de transporte queda en `source()` para los logs.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Tipo de fallo a nivel de transporte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Connect => write!(f, "connection failed"),
            Self::Other => write!(f, "request failed"),
        }
    }
}

/// Error de transporte HTTP (DNS, conexión, timeout...)
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind) -> Self {
        Self { kind, cause: None }
    }

    pub fn with_cause<E>(kind: TransportErrorKind, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            cause: Some(Box::new(cause)),
        }
    }

    /// Descripción de la causa subyacente, solo para logs
    pub fn cause_description(&self) -> Option<String> {
        self.cause.as_ref().map(|c| c.to_string())
    }
}

/// Errores principales del cliente
#[derive(Error, Debug)]
pub enum CarrierError {
    #[error("HP Express API credentials are not configured.")]
    MissingCredentials,

    #[error("HP Express API is unreachable: {0}")]
    Transport(#[from] TransportError),

    #[error("{0}")]
    AuthFailed(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{message}")]
    CarrierRejected { message: String, raw: Value },

    #[error("HP Express API response is missing '{0}'.")]
    MissingField(String),

    #[error("Invalid response from HP Express API: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Validation(String),
}

impl CarrierError {
    /// Código estable para la capa que muestra el error
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "no_credentials",
            Self::Transport(_) => "transport_error",
            Self::AuthFailed(_) => "auth_failed",
            Self::Api { .. } => "api_error",
            Self::CarrierRejected { .. } => "shipment_error",
            Self::MissingField(_) => "missing_field",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Validation(_) => "validation_error",
        }
    }

    /// Payload bruto del transportista, si lo hay
    pub fn raw_payload(&self) -> Option<&Value> {
        match self {
            Self::CarrierRejected { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Status HTTP para errores de la API
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type CarrierResult<T> = Result<T, CarrierError>;

/// Función helper para crear errores de validación
pub fn validation_error(message: &str) -> CarrierError {
    CarrierError::Validation(message.to_string())
}

//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y validación
//! de direcciones y teléfonos.

pub mod errors;
pub mod validation;

pub use errors::{CarrierError, CarrierResult, TransportError, TransportErrorKind};

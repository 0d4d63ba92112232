//! Configuración del proyecto
//!
//! Este módulo contiene las credenciales, el modo de la API y la lectura de
//! variables de entorno.

pub mod environment;
pub mod settings;

pub use environment::EnvironmentConfig;
pub use settings::{ApiMode, Credentials, Endpoints, SettingsProvider};

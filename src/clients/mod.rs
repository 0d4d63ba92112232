//! Clients - HTTP transport for external APIs
//!
//! This module contains the HTTP transport used to talk to HP Express.

pub mod http_transport;

pub use http_transport::{HttpResponse, HttpTransport, ReqwestTransport};

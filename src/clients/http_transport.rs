//! Transporte HTTP
//!
//! El cliente de HP Express no habla con `reqwest` directamente sino con el
//! trait `HttpTransport`, para poder sustituirlo en tests. Los fallos de
//! transporte (DNS, conexión, timeout) se devuelven como `TransportError`;
//! cualquier status HTTP, incluidos 4xx/5xx, es una respuesta normal.

use std::time::Duration;

use async_trait::async_trait;
use http::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::utils::errors::{TransportError, TransportErrorKind};

/// Respuesta HTTP cruda
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Cuerpo decodificado como JSON, si lo es
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &Value,
        timeout: Duration,
        tls_verify: bool,
    ) -> Result<HttpResponse, TransportError>;

    async fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Duration,
        tls_verify: bool,
    ) -> Result<HttpResponse, TransportError>;
}

/// Transporte sobre `reqwest`
///
/// Mantiene dos clientes: uno que verifica certificados y otro que no, para
/// el sandbox del transportista.
#[derive(Clone)]
pub struct ReqwestTransport {
    verified: Client,
    unverified: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let verified = Client::builder()
            .build()
            .map_err(|e| TransportError::with_cause(TransportErrorKind::Other, e))?;
        let unverified = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| TransportError::with_cause(TransportErrorKind::Other, e))?;

        Ok(Self { verified, unverified })
    }

    fn client(&self, tls_verify: bool) -> &Client {
        if tls_verify {
            &self.verified
        } else {
            &self.unverified
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<HttpResponse, TransportError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        debug!("📡 HP Express respondió HTTP {} ({} bytes)", status, body.len());
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &Value,
        timeout: Duration,
        tls_verify: bool,
    ) -> Result<HttpResponse, TransportError> {
        let payload = serde_json::to_vec(body)
            .map_err(|e| TransportError::with_cause(TransportErrorKind::Other, e))?;

        let request = self
            .client(tls_verify)
            .post(url)
            .headers(headers.clone())
            .timeout(timeout)
            .body(payload);

        self.send(request).await
    }

    async fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Duration,
        tls_verify: bool,
    ) -> Result<HttpResponse, TransportError> {
        let request = self
            .client(tls_verify)
            .get(url)
            .headers(headers.clone())
            .timeout(timeout);

        self.send(request).await
    }
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    let kind = if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    };
    TransportError::with_cause(kind, error)
}

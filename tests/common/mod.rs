#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use http::HeaderMap;
use serde_json::Value;

use hp_express_client::cache::{MemoryTokenCache, TokenCache};
use hp_express_client::{
    ApiMode, Credentials, HpExpressClient, HttpResponse, HttpTransport, TransportError,
    TransportErrorKind,
};

/// Llamada registrada por el transporte mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
    pub timeout: Duration,
    pub tls_verify: bool,
}

/// Transporte con respuestas guionizadas en orden
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportErrorKind>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn respond_json(&self, status: u16, body: Value) -> &Self {
        self.respond(status, body.to_string())
    }

    pub fn fail(&self, kind: TransportErrorKind) -> &Self {
        self.responses.lock().unwrap().push_back(Err(kind));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next(&self, call: RecordedCall) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(call);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(kind)) => Err(TransportError::with_cause(
                kind,
                std::io::Error::new(std::io::ErrorKind::Other, "scripted failure"),
            )),
            None => panic!("MockTransport: no scripted response left"),
        }
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &Value,
        timeout: Duration,
        tls_verify: bool,
    ) -> Result<HttpResponse, TransportError> {
        self.next(RecordedCall {
            method: "POST",
            url: url.to_string(),
            authorization: authorization(headers),
            body: Some(body.clone()),
            timeout,
            tls_verify,
        })
    }

    async fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Duration,
        tls_verify: bool,
    ) -> Result<HttpResponse, TransportError> {
        self.next(RecordedCall {
            method: "GET",
            url: url.to_string(),
            authorization: authorization(headers),
            body: None,
            timeout,
            tls_verify,
        })
    }
}

/// Cache en memoria que registra las operaciones
#[derive(Default)]
pub struct RecordingCache {
    inner: MemoryTokenCache,
    pub sets: Mutex<Vec<(String, String, u64)>>,
    pub clears: Mutex<usize>,
}

impl RecordingCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_ttls(&self) -> Vec<u64> {
        self.sets.lock().unwrap().iter().map(|(_, _, ttl)| *ttl).collect()
    }

    pub fn clear_count(&self) -> usize {
        *self.clears.lock().unwrap()
    }
}

#[async_trait]
impl TokenCache for RecordingCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) {
        self.sets
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string(), ttl_seconds));
        self.inner.set(key, value, ttl_seconds).await;
    }

    async fn clear(&self, key: &str) {
        *self.clears.lock().unwrap() += 1;
        self.inner.clear(key).await;
    }
}

pub fn test_credentials() -> Credentials {
    Credentials::new(ApiMode::Test, "shop", "s3cret", "CE123")
}

pub fn client_with(
    credentials: Credentials,
    cache: Arc<RecordingCache>,
    transport: Arc<MockTransport>,
) -> HpExpressClient {
    HpExpressClient::new(credentials, cache, transport)
}

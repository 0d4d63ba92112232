//! Cliente HTTP para HP Express (DXWebAPI)
//!
//! Este módulo contiene el cliente de la API de HP Express: obtiene y cachea
//! el token bearer, reintenta una sola vez cuando la API responde 401 y
//! traduce los sobres de respuesta del transportista a resultados tipados.

use std::sync::Arc;
use std::time::Duration;

use http::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{TokenCache, TOKEN_CACHE_KEY};
use crate::clients::{HttpResponse, HttpTransport};
use crate::config::{ApiMode, Credentials, Endpoints};
use crate::models::auth::{AuthRequest, AuthResponse};
use crate::models::delivery_point::{DeliveryPoint, DeliveryPointQuery, DeliveryPointRequest, DeliveryPointResponse};
use crate::models::label::{LabelQuery, LabelRequest, LabelResponse};
use crate::models::shipment::{
    CancelShipmentOrders, CreateShipmentOrders, CreatedShipment, ParcelReference, ShipmentOrderResult,
    ShipmentRequest,
};
use crate::models::tracking::{BarcodeRef, ShipmentStatus, ShipmentStatusRequest};
use crate::utils::errors::{CarrierError, CarrierResult};

pub const AUTH_TIMEOUT: Duration = Duration::from_secs(30);
pub const PING_TIMEOUT: Duration = Duration::from_secs(30);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Margen restado al `expiresIn` del transportista
pub const TOKEN_EXPIRY_BUFFER_SECS: i64 = 300;
/// TTL si la API no declara `expiresIn` (token de 4h menos el margen)
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 13_800;

pub const CREATE_SHIPMENT_ENDPOINT: &str = "/shipment/create_shipment_orders";
pub const CANCEL_SHIPMENT_ENDPOINT: &str = "/shipment/cancel_shipment_orders";
pub const SHIPMENT_STATUS_ENDPOINT: &str = "/shipment/fetch_shipment_status";
pub const SHIPPING_LABELS_ENDPOINT: &str = "/shipment/fetch_shipping_labels";
pub const DELIVERY_POINTS_ENDPOINT: &str = "/delivery_point/fetch_parcel_delivery_point";

/// Método HTTP de una llamada operativa
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Cliente de la API de HP Express
#[derive(Clone)]
pub struct HpExpressClient {
    credentials: Credentials,
    endpoints: Endpoints,
    cache: Arc<dyn TokenCache>,
    transport: Arc<dyn HttpTransport>,
}

impl HpExpressClient {
    /// Crear cliente con las URLs del modo de las credenciales
    pub fn new(
        credentials: Credentials,
        cache: Arc<dyn TokenCache>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let endpoints = Endpoints::for_mode(credentials.mode);
        Self {
            credentials,
            endpoints,
            cache,
            transport,
        }
    }

    /// Sustituir las URLs (p. ej. un proxy o un mock local)
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn mode(&self) -> ApiMode {
        self.credentials.mode
    }

    pub fn is_test_mode(&self) -> bool {
        self.credentials.mode.is_test()
    }

    /// Código de cliente (CECODE)
    pub fn customer_code(&self) -> &str {
        &self.credentials.customer_code
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn tls_verify(&self) -> bool {
        self.credentials.mode.verify_tls()
    }

    /// Obtener token de autenticación (cache primero)
    pub async fn get_token(&self) -> CarrierResult<String> {
        if let Some(token) = self.cache.get(TOKEN_CACHE_KEY).await {
            debug!("🔑 Usando token HP Express en caché");
            return Ok(token);
        }

        if !self.credentials.is_complete() {
            warn!("⚠️ Credenciales HP Express no configuradas");
            return Err(CarrierError::MissingCredentials);
        }

        info!("🔐 Autenticando contra HP Express ({:?})", self.credentials.mode);

        let body = serde_json::to_value(AuthRequest {
            username: &self.credentials.username,
            password: &self.credentials.password,
        })
        .map_err(|e| CarrierError::InvalidResponse(e.to_string()))?;

        let response = self
            .transport
            .post(&self.endpoints.auth_url, &json_headers(), &body, AUTH_TIMEOUT, self.tls_verify())
            .await
            .map_err(|e| {
                warn!("❌ Error de transporte en autenticación: {:?}", e.cause_description());
                CarrierError::Transport(e)
            })?;

        let auth: AuthResponse = match response.json() {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("⚠️ Respuesta de autenticación con formato inesperado: {}", e);
                AuthResponse::default()
            }),
            None => AuthResponse::default(),
        };

        let token = match auth.access_token.as_deref() {
            Some(token) if response.status == 200 && !token.is_empty() => token.to_string(),
            _ => {
                let message = auth
                    .message
                    .unwrap_or_else(|| "Authentication failed.".to_string());
                warn!("❌ Autenticación HP Express fallida (HTTP {}): {}", response.status, message);
                return Err(CarrierError::AuthFailed(message));
            }
        };

        match token_ttl(auth.expires_in) {
            Some(ttl) => self.cache.set(TOKEN_CACHE_KEY, &token, ttl).await,
            None => warn!(
                "⚠️ expiresIn={:?} no deja margen; el token no se cachea",
                auth.expires_in
            ),
        }

        info!("✅ Token HP Express obtenido");
        Ok(token)
    }

    /// Invalidar el token cacheado
    pub async fn clear_token(&self) {
        debug!("🗑️ Invalidando token HP Express");
        self.cache.clear(TOKEN_CACHE_KEY).await;
    }

    /// Llamada autenticada con un único reintento tras 401
    pub async fn request(
        &self,
        endpoint: &str,
        payload: &Value,
        method: HttpMethod,
    ) -> CarrierResult<Value> {
        let url = format!("{}{}", self.endpoints.api_url, endpoint);

        let token = self.get_token().await?;
        let mut response = self.send(&url, payload, method, &token).await?;

        if response.status == 401 {
            warn!("🔄 HP Express rechazó el token (401) en {}; reautenticando", endpoint);
            self.clear_token().await;
            let token = self.get_token().await?;
            response = self.send(&url, payload, method, &token).await?;
        }

        let decoded = response.json();

        if response.status != 200 {
            let message = decoded
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("API error (HTTP {})", response.status));
            warn!("❌ HP Express {} → HTTP {}: {}", endpoint, response.status, message);
            return Err(CarrierError::Api {
                status: response.status,
                message,
            });
        }

        decoded.ok_or_else(|| CarrierError::InvalidResponse(format!("{} returned a non-JSON body", endpoint)))
    }

    async fn send(
        &self,
        url: &str,
        payload: &Value,
        method: HttpMethod,
        token: &str,
    ) -> CarrierResult<HttpResponse> {
        let headers = bearer_headers(token)?;

        let result = match method {
            HttpMethod::Post => {
                self.transport
                    .post(url, &headers, payload, REQUEST_TIMEOUT, self.tls_verify())
                    .await
            }
            HttpMethod::Get => {
                self.transport
                    .get(url, &headers, REQUEST_TIMEOUT, self.tls_verify())
                    .await
            }
        };

        result.map_err(|e| {
            warn!("❌ Error de transporte en {}: {:?}", url, e.cause_description());
            CarrierError::Transport(e)
        })
    }

    async fn post_json<B: Serialize>(&self, endpoint: &str, body: &B) -> CarrierResult<Value> {
        let payload =
            serde_json::to_value(body).map_err(|e| CarrierError::InvalidResponse(e.to_string()))?;
        self.request(endpoint, &payload, HttpMethod::Post).await
    }

    /// Crear envío
    pub async fn create_shipment(
        &self,
        parcel: &ShipmentRequest,
        return_label: bool,
    ) -> CarrierResult<CreatedShipment> {
        debug!("📦 Creando envío {}", parcel.client_reference_number);

        let result = self
            .post_json(
                CREATE_SHIPMENT_ENDPOINT,
                &CreateShipmentOrders {
                    parcels: [parcel],
                    return_address_label: return_label,
                },
            )
            .await?;

        let raw_order = result
            .get("ShipmentOrdersList")
            .and_then(Value::as_array)
            .and_then(|orders| orders.first())
            .cloned()
            .ok_or_else(|| CarrierError::MissingField("ShipmentOrdersList".to_string()))?;

        let order: ShipmentOrderResult = decode(raw_order.clone(), "ShipmentOrdersList")?;

        if order.is_rejected() {
            let message = order
                .error_message
                .clone()
                .unwrap_or_else(|| "Shipment creation failed.".to_string());
            warn!("🚫 HP Express rechazó el envío {}: {}", parcel.client_reference_number, message);
            return Err(CarrierError::CarrierRejected {
                message,
                raw: raw_order,
            });
        }

        let barcode = order
            .first_barcode()
            .map(str::to_string)
            .ok_or_else(|| CarrierError::MissingField("barcode".to_string()))?;

        let label = result
            .get("ShipmentsLabel")
            .and_then(Value::as_str)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        info!("✅ Envío creado: {} ({})", barcode, parcel.client_reference_number);

        Ok(CreatedShipment {
            barcode,
            order,
            label,
        })
    }

    /// Cancelar envío por referencia de cliente
    pub async fn cancel_shipment(&self, client_reference_number: &str) -> CarrierResult<Vec<ShipmentOrderResult>> {
        let result = self
            .post_json(
                CANCEL_SHIPMENT_ENDPOINT,
                &CancelShipmentOrders {
                    parcels: [ParcelReference { client_reference_number }],
                },
            )
            .await?;

        let items = result
            .as_array()
            .ok_or_else(|| CarrierError::InvalidResponse("cancel response is not a list".to_string()))?;

        if let Some(first) = items.first() {
            let order: ShipmentOrderResult = decode(first.clone(), "cancel response")?;
            if order.is_rejected() {
                let message = order
                    .error_message
                    .unwrap_or_else(|| "Shipment cancellation failed.".to_string());
                warn!("🚫 HP Express rechazó la cancelación de {}: {}", client_reference_number, message);
                return Err(CarrierError::CarrierRejected {
                    message,
                    raw: first.clone(),
                });
            }
        }

        info!("🗑️ Envío cancelado: {}", client_reference_number);
        decode(result, "cancel response")
    }

    /// Estado de uno o varios envíos
    pub async fn get_shipment_status<S: AsRef<str>>(&self, barcodes: &[S]) -> CarrierResult<Vec<ShipmentStatus>> {
        let request = ShipmentStatusRequest {
            barcodes: barcodes
                .iter()
                .map(|b| BarcodeRef { barcode: b.as_ref() })
                .collect(),
        };

        let result = self.post_json(SHIPMENT_STATUS_ENDPOINT, &request).await?;
        decode(result, "shipment status")
    }

    /// Etiquetas de envío; la ausencia de `PackageLabel` la decide quien llama
    pub async fn get_shipping_labels(&self, query: &LabelQuery) -> CarrierResult<LabelResponse> {
        let result = self
            .post_json(SHIPPING_LABELS_ENDPOINT, &LabelRequest::from(query))
            .await?;
        decode(result, "shipping labels")
    }

    /// Oficinas y paketomati
    pub async fn get_delivery_points(&self, query: &DeliveryPointQuery) -> CarrierResult<Vec<DeliveryPoint>> {
        let result = self
            .post_json(DELIVERY_POINTS_ENDPOINT, &DeliveryPointRequest::from(query))
            .await?;
        let response: DeliveryPointResponse = decode(result, "delivery points")?;

        debug!("📍 {} puntos de entrega recibidos", response.points.len());
        Ok(response.points)
    }

    /// Comprobar disponibilidad de la API (sin autenticación)
    pub async fn ping(&self) -> CarrierResult<String> {
        let response = self
            .transport
            .get(&self.endpoints.ping_url(), &HeaderMap::new(), PING_TIMEOUT, self.tls_verify())
            .await?;
        Ok(response.body)
    }
}

/// TTL de cache para un `expiresIn` dado; `None` si no queda margen
pub fn token_ttl(expires_in: Option<i64>) -> Option<u64> {
    match expires_in {
        Some(seconds) => {
            let ttl = seconds - TOKEN_EXPIRY_BUFFER_SECS;
            (ttl > 0).then_some(ttl as u64)
        }
        None => Some(DEFAULT_TOKEN_TTL_SECS),
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn bearer_headers(token: &str) -> CarrierResult<HeaderMap> {
    let mut headers = json_headers();
    let value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| CarrierError::AuthFailed("Authentication token contains invalid characters.".to_string()))?;
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> CarrierResult<T> {
    serde_json::from_value(value)
        .map_err(|e| CarrierError::InvalidResponse(format!("unexpected {} format: {}", what, e)))
}

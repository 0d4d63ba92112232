//! Modelos de envío
//!
//! Mapean exactamente el objeto `parcel` que espera
//! `/shipment/create_shipment_orders` y los sobres de respuesta de
//! creación y cancelación.

use serde::{Deserialize, Serialize, Serializer};

use super::lenient::{lenient_opt_i64, lenient_opt_string, null_as_empty};

/// Quien paga el envío (1 = remitente)
pub const PAYED_BY_SENDER: u8 = 1;
/// Recogida en la dirección del remitente
pub const PICKUP_AT_ADDRESS: u8 = 1;
/// El código de barras lo asigna HP
pub const BARCODE_ASSIGNED_BY_CARRIER: u8 = 1;
/// `ResponseStatus` que indica rechazo del transportista
pub const RESPONSE_STATUS_FAILED: i64 = 1;

/// Tipo de entrega
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryType {
    Address = 1,
    PostOffice = 2,
    ParcelLocker = 3,
}

impl DeliveryType {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Address),
            2 => Some(Self::PostOffice),
            3 => Some(Self::ParcelLocker),
            _ => None,
        }
    }

    /// Las entregas en oficina y paketomat avisan por SMS
    pub fn requires_mobile(self) -> bool {
        matches!(self, Self::PostOffice | Self::ParcelLocker)
    }
}

impl Serialize for DeliveryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Tamaño de paquete para paketomat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParcelSize {
    #[serde(rename = "X")]
    ExtraSmall,
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl ParcelSize {
    pub fn code(self) -> &'static str {
        match self {
            Self::ExtraSmall => "X",
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "X" => Some(Self::ExtraSmall),
            "S" => Some(Self::Small),
            "M" => Some(Self::Medium),
            "L" => Some(Self::Large),
            _ => None,
        }
    }
}

/// Servicio adicional, serializado como `{"additional_service_id": n}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdditionalService {
    #[serde(rename = "additional_service_id")]
    pub id: u16,
}

impl AdditionalService {
    pub const PERSONAL_DELIVERY: Self = Self { id: 1 };
    pub const SATURDAY_DELIVERY: Self = Self { id: 3 };
    pub const RETURN_RECEIPT: Self = Self { id: 4 };
    pub const CASH_ON_DELIVERY: Self = Self { id: 9 };
    pub const SMS_TO_SENDER: Self = Self { id: 29 };
    pub const SMS_TO_RECIPIENT: Self = Self { id: 30 };
    pub const EMAIL_TO_SENDER: Self = Self { id: 31 };
    pub const EMAIL_TO_RECIPIENT: Self = Self { id: 32 };

    pub fn new(id: u16) -> Self {
        Self { id }
    }
}

/// Bloque del remitente
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sender {
    pub sender_name: String,
    pub sender_phone: String,
    pub sender_email: String,
    pub sender_street: String,
    pub sender_hnum: String,
    pub sender_hnum_suffix: String,
    pub sender_zip: String,
    pub sender_city: String,
}

/// Bloque del destinatario
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recipient {
    pub recipient_name: String,
    pub recipient_phone: String,
    pub recipient_email: String,
    pub recipient_street: String,
    pub recipient_hnum: String,
    pub recipient_hnum_suffix: String,
    pub recipient_zip: String,
    pub recipient_city: String,
    /// Código del paketomat (solo entrega en paketomat), siempre como string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_delivery_center: Option<String>,
}

/// Paquete dentro del envío
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub barcode: String,
    pub barcode_type: u8,
    pub barcode_client: String,
    pub weight: f64,
}

impl Package {
    /// Paquete con código de barras asignado por HP
    pub fn carrier_barcode(barcode_client: impl Into<String>, weight: f64) -> Self {
        Self {
            barcode: String::new(),
            barcode_type: BARCODE_ASSIGNED_BY_CARRIER,
            barcode_client: barcode_client.into(),
            weight,
        }
    }
}

/// Objeto `parcel` de la API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentRequest {
    pub client_reference_number: String,
    pub service: String,
    pub payed_by: u8,
    pub delivery_type: DeliveryType,
    pub pickup_type: u8,
    pub sender: Sender,
    pub recipient: Recipient,
    pub additional_services: Vec<AdditionalService>,
    pub packages: Vec<Package>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcel_size: Option<ParcelSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_value: Option<f64>,
}

impl ShipmentRequest {
    /// Asignar paketomat: el código va en el destinatario como string
    pub fn set_parcel_locker(&mut self, locker_code: &str, size: ParcelSize) {
        self.delivery_type = DeliveryType::ParcelLocker;
        self.parcel_size = Some(size);
        if !locker_code.is_empty() {
            self.recipient.recipient_delivery_center = Some(locker_code.to_string());
        }
    }

    pub fn add_service(&mut self, service: AdditionalService) {
        if !self.additional_services.contains(&service) {
            self.additional_services.push(service);
        }
    }
}

/// Cuerpo de `create_shipment_orders`
#[derive(Debug, Serialize)]
pub struct CreateShipmentOrders<'a> {
    pub parcels: [&'a ShipmentRequest; 1],
    pub return_address_label: bool,
}

/// Referencia usada por `cancel_shipment_orders`
#[derive(Debug, Serialize)]
pub struct ParcelReference<'a> {
    pub client_reference_number: &'a str,
}

/// Cuerpo de `cancel_shipment_orders`
#[derive(Debug, Serialize)]
pub struct CancelShipmentOrders<'a> {
    pub parcels: [ParcelReference<'a>; 1],
}

/// Paquete devuelto al crear
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedPackage {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub barcode: Option<String>,
}

/// Resultado por orden (creación o cancelación)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipmentOrderResult {
    #[serde(rename = "ResponseStatus", default, deserialize_with = "lenient_opt_i64")]
    pub response_status: Option<i64>,
    #[serde(rename = "ErrorMessage", default, deserialize_with = "lenient_opt_string")]
    pub error_message: Option<String>,
    #[serde(rename = "Packages", default, deserialize_with = "null_as_empty")]
    pub packages: Vec<CreatedPackage>,
}

impl ShipmentOrderResult {
    pub fn is_rejected(&self) -> bool {
        self.response_status == Some(RESPONSE_STATUS_FAILED)
    }

    pub fn first_barcode(&self) -> Option<&str> {
        self.packages
            .first()
            .and_then(|p| p.barcode.as_deref())
            .filter(|b| !b.is_empty())
    }
}

/// Resultado de una creación aceptada
#[derive(Debug, Clone)]
pub struct CreatedShipment {
    pub barcode: String,
    pub order: ShipmentOrderResult,
    /// PDF de etiquetas en base64, si se pidió `return_address_label`
    pub label: Option<String>,
}

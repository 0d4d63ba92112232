//! Servicio de envíos
//!
//! Construye el objeto `parcel` a partir de un pedido de la tienda y
//! orquesta crear, cancelar, etiquetas y estado sobre `HpExpressClient`.
//! La persistencia del pedido queda fuera: el servicio devuelve lo que el
//! llamante debe guardar.

use chrono::Utc;
use tracing::{debug, info};

use crate::client::HpExpressClient;
use crate::models::catalog::DEFAULT_SERVICE;
use crate::models::label::{LabelFormat, LabelQuery};
use crate::models::shipment::{
    AdditionalService, DeliveryType, Package, ParcelSize, Recipient, Sender, ShipmentRequest,
    PAYED_BY_SENDER, PICKUP_AT_ADDRESS,
};
use crate::models::tracking::PackageScan;
use crate::utils::errors::{validation_error, CarrierError, CarrierResult};
use crate::utils::validation::{format_phone, is_valid_mobile, parse_address, truncate_chars};

/// Datos del remitente (ajustes de la tienda)
#[derive(Debug, Clone, Default)]
pub struct SenderProfile {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub street: String,
    pub hnum: String,
    pub zip: String,
    pub city: String,
}

/// Datos del pedido necesarios para el envío
#[derive(Debug, Clone, Default)]
pub struct OrderDetails {
    pub order_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address_line: String,
    pub zip: String,
    pub city: String,
    /// El cliente paga contra reembolso
    pub paid_by_cod: bool,
    pub total: f64,
    /// Paketomat elegido en el checkout
    pub locker_code: Option<String>,
}

/// Opciones elegidas por el operador
#[derive(Debug, Clone)]
pub struct ShipmentOptions {
    pub service: u16,
    pub delivery_type: DeliveryType,
    pub parcel_size: ParcelSize,
    pub weight: f64,
    pub cod_enabled: bool,
}

impl Default for ShipmentOptions {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE,
            delivery_type: DeliveryType::Address,
            parcel_size: ParcelSize::Small,
            weight: 1.0,
            cod_enabled: false,
        }
    }
}

/// Lo que hay que guardar en el pedido tras crear el envío
#[derive(Debug, Clone)]
pub struct ShipmentRecord {
    pub barcode: String,
    pub reference: String,
    pub service: u16,
    pub delivery_type: DeliveryType,
    /// PDF en base64
    pub label: Option<String>,
}

/// Etiqueta lista para descargar
#[derive(Debug, Clone)]
pub struct ShippingLabel {
    pub data: String,
    pub format: LabelFormat,
}

/// Referencia de cliente `WC-<pedido>-<timestamp>`
pub fn client_reference(order_id: u64) -> String {
    format!("WC-{}-{}", order_id, Utc::now().timestamp())
}

/// Página pública de seguimiento de Hrvatska pošta
pub const TRACKING_BASE_URL: &str = "https://posiljka.posta.hr/tragom-posiljke/tracking/trackingdata";

/// Enlace de seguimiento para el cliente final
pub fn tracking_url(barcode: &str) -> String {
    format!("{}?barcode={}", TRACKING_BASE_URL, urlencoding::encode(barcode))
}

/// Construir el objeto `parcel` para un pedido
pub fn build_request(
    order: &OrderDetails,
    sender: &SenderProfile,
    options: &ShipmentOptions,
) -> CarrierResult<ShipmentRequest> {
    if sender.name.trim().is_empty() || sender.phone.trim().is_empty() {
        return Err(validation_error(
            "Sender details are not configured. Check the HP Express settings.",
        ));
    }

    if options.delivery_type.requires_mobile() && !is_valid_mobile(&order.phone) {
        return Err(validation_error(match options.delivery_type {
            DeliveryType::ParcelLocker => "Parcel locker delivery requires a valid Croatian mobile number.",
            _ => "Post office delivery requires a valid Croatian mobile number.",
        }));
    }

    let address = parse_address(&order.address_line);
    let full_name = format!("{} {}", order.first_name, order.last_name);

    let mut request = ShipmentRequest {
        client_reference_number: client_reference(order.order_id),
        service: options.service.to_string(),
        payed_by: PAYED_BY_SENDER,
        delivery_type: options.delivery_type,
        pickup_type: PICKUP_AT_ADDRESS,
        sender: Sender {
            sender_name: truncate_chars(&sender.name, 50),
            sender_phone: truncate_chars(&sender.phone, 25),
            sender_email: truncate_chars(&sender.email, 100),
            sender_street: truncate_chars(&sender.street, 50),
            sender_hnum: if sender.hnum.is_empty() { ".".to_string() } else { sender.hnum.clone() },
            sender_hnum_suffix: String::new(),
            sender_zip: sender.zip.clone(),
            sender_city: truncate_chars(&sender.city, 25),
        },
        recipient: Recipient {
            recipient_name: truncate_chars(&full_name, 50),
            recipient_phone: format_phone(&order.phone),
            recipient_email: truncate_chars(&order.email, 100),
            recipient_street: address.street,
            recipient_hnum: address.hnum,
            recipient_hnum_suffix: address.hnum_suffix,
            recipient_zip: order.zip.clone(),
            recipient_city: truncate_chars(&order.city, 25),
            recipient_delivery_center: None,
        },
        additional_services: Vec::new(),
        packages: vec![Package::carrier_barcode(order.order_id.to_string(), options.weight)],
        parcel_size: None,
        payment_value: None,
    };

    if options.delivery_type == DeliveryType::ParcelLocker {
        let locker = order.locker_code.as_deref().unwrap_or("");
        request.set_parcel_locker(locker, options.parcel_size);
    }

    if options.cod_enabled && order.paid_by_cod {
        request.payment_value = Some(order.total);
        request.add_service(AdditionalService::CASH_ON_DELIVERY);
    }

    request.add_service(AdditionalService::EMAIL_TO_RECIPIENT);

    Ok(request)
}

/// Orquestación de envíos sobre el cliente
pub struct ShipmentService {
    client: HpExpressClient,
    sender: SenderProfile,
}

impl ShipmentService {
    pub fn new(client: HpExpressClient, sender: SenderProfile) -> Self {
        Self { client, sender }
    }

    pub fn client(&self) -> &HpExpressClient {
        &self.client
    }

    /// Crear el envío de un pedido
    pub async fn create_for_order(
        &self,
        order: &OrderDetails,
        options: &ShipmentOptions,
    ) -> CarrierResult<ShipmentRecord> {
        let request = build_request(order, &self.sender, options)?;
        debug!("📦 Pedido {} → {}", order.order_id, request.client_reference_number);

        let created = self.client.create_shipment(&request, true).await?;

        info!("✅ Pedido {} enviado con código {}", order.order_id, created.barcode);

        Ok(ShipmentRecord {
            barcode: created.barcode,
            reference: request.client_reference_number,
            service: options.service,
            delivery_type: options.delivery_type,
            label: created.label,
        })
    }

    /// Cancelar por referencia de cliente
    pub async fn cancel(&self, reference: &str) -> CarrierResult<()> {
        if reference.is_empty() {
            return Err(validation_error("There is no shipment to cancel."));
        }
        self.client.cancel_shipment(reference).await?;
        Ok(())
    }

    /// Etiqueta de un envío; error si la API no la devuelve
    pub async fn fetch_label(&self, barcode: &str, format: LabelFormat) -> CarrierResult<ShippingLabel> {
        let response = self
            .client
            .get_shipping_labels(&LabelQuery::for_barcode(barcode, format))
            .await?;

        let data = response.into_label()?;

        Ok(ShippingLabel { data, format })
    }

    /// Último escaneo de un envío
    pub async fn latest_status(&self, barcode: &str) -> CarrierResult<PackageScan> {
        let statuses = self.client.get_shipment_status(&[barcode]).await?;

        statuses
            .first()
            .and_then(|status| status.latest_scan())
            .cloned()
            .ok_or_else(|| CarrierError::MissingField("PackageScansList".to_string()))
    }
}

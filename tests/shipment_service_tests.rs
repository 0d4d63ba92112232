mod common;

use serde_json::json;

use common::{client_with, test_credentials, MockTransport, RecordingCache};
use hp_express_client::cache::{TokenCache, TOKEN_CACHE_KEY};
use hp_express_client::models::label::LabelFormat;
use hp_express_client::models::shipment::{DeliveryType, ParcelSize};
use hp_express_client::services::{OrderDetails, SenderProfile, ShipmentOptions, ShipmentService};
use hp_express_client::CarrierError;

fn sender() -> SenderProfile {
    SenderProfile {
        name: "Web shop d.o.o.".to_string(),
        phone: "012345678".to_string(),
        email: "shop@example.hr".to_string(),
        street: "Ilica".to_string(),
        hnum: "1".to_string(),
        zip: "10000".to_string(),
        city: "Zagreb".to_string(),
    }
}

fn order() -> OrderDetails {
    OrderDetails {
        order_id: 1001,
        first_name: "Ivan".to_string(),
        last_name: "Kovač".to_string(),
        phone: "091 234 5678".to_string(),
        email: "ivan@example.hr".to_string(),
        address_line: "Savska cesta 41".to_string(),
        zip: "10000".to_string(),
        city: "Zagreb".to_string(),
        paid_by_cod: true,
        total: 120.5,
        locker_code: Some("10050".to_string()),
    }
}

async fn service_with(transport: std::sync::Arc<MockTransport>) -> ShipmentService {
    let cache = RecordingCache::new();
    cache.set(TOKEN_CACHE_KEY, "tok1", 600).await;
    ShipmentService::new(client_with(test_credentials(), cache, transport), sender())
}

#[tokio::test]
async fn test_create_locker_shipment_for_order() {
    let transport = MockTransport::new();
    transport.respond_json(
        200,
        json!({
            "ShipmentOrdersList": [{"ResponseStatus": 0, "Packages": [{"barcode": "HP123"}]}],
            "ShipmentsLabel": "JVBERi0="
        }),
    );
    let service = service_with(transport.clone()).await;

    let options = ShipmentOptions {
        delivery_type: DeliveryType::ParcelLocker,
        parcel_size: ParcelSize::Medium,
        cod_enabled: true,
        ..Default::default()
    };
    let record = service.create_for_order(&order(), &options).await.unwrap();

    assert_eq!(record.barcode, "HP123");
    assert!(record.reference.starts_with("WC-1001-"));
    assert_eq!(record.service, 38);
    assert_eq!(record.delivery_type, DeliveryType::ParcelLocker);
    assert_eq!(record.label.as_deref(), Some("JVBERi0="));

    let body = transport.calls()[0].body.clone().unwrap();
    let parcel = &body["parcels"][0];
    assert_eq!(body["return_address_label"], json!(true));
    assert_eq!(parcel["client_reference_number"], json!(record.reference));
    assert_eq!(parcel["service"], json!("38"));
    assert_eq!(parcel["delivery_type"], json!(3));
    assert_eq!(parcel["parcel_size"], json!("M"));
    assert_eq!(parcel["payment_value"], json!(120.5));
    assert_eq!(parcel["recipient"]["recipient_delivery_center"], json!("10050"));
    assert_eq!(parcel["recipient"]["recipient_phone"], json!("0912345678"));
    assert_eq!(
        parcel["additional_services"],
        json!([{"additional_service_id": 9}, {"additional_service_id": 32}])
    );
    assert_eq!(parcel["packages"][0]["barcode_client"], json!("1001"));
}

#[tokio::test]
async fn test_create_for_order_validation_makes_no_call() {
    let transport = MockTransport::new();
    let service = service_with(transport.clone()).await;

    let mut order = order();
    order.phone = "01 4567 890".to_string();
    let options = ShipmentOptions {
        delivery_type: DeliveryType::PostOffice,
        ..Default::default()
    };

    let err = service.create_for_order(&order, &options).await.unwrap_err();
    assert!(matches!(err, CarrierError::Validation(_)));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_create_for_order_carrier_rejection() {
    let transport = MockTransport::new();
    transport.respond_json(
        200,
        json!({"ShipmentOrdersList": [{"ResponseStatus": 1, "ErrorMessage": "Neispravan poštanski broj"}]}),
    );
    let service = service_with(transport).await;

    let err = service
        .create_for_order(&order(), &ShipmentOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Neispravan poštanski broj");
    assert_eq!(err.raw_payload().unwrap()["ResponseStatus"], json!(1));
}

#[tokio::test]
async fn test_cancel_without_reference() {
    let transport = MockTransport::new();
    let service = service_with(transport.clone()).await;

    let err = service.cancel("").await.unwrap_err();
    assert!(matches!(err, CarrierError::Validation(_)));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_cancel() {
    let transport = MockTransport::new();
    transport.respond_json(200, json!([{"ResponseStatus": 0}]));
    let service = service_with(transport.clone()).await;

    service.cancel("WC-1001-1700000000").await.unwrap();
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_fetch_label() {
    let transport = MockTransport::new();
    transport.respond_json(200, json!({"PackageLabel": "XlhB"}));
    let service = service_with(transport.clone()).await;

    let label = service.fetch_label("HP123", LabelFormat::Zpl).await.unwrap();
    assert_eq!(label.data, "XlhB");
    assert_eq!(label.format, LabelFormat::Zpl);
    assert_eq!(transport.calls()[0].body.as_ref().unwrap()["format"], json!(2));
}

#[tokio::test]
async fn test_fetch_label_missing() {
    let transport = MockTransport::new();
    transport.respond_json(200, json!({"PackageLabel": ""}));
    let service = service_with(transport).await;

    let err = service
        .fetch_label("HP123", LabelFormat::PdfCode39)
        .await
        .unwrap_err();
    assert!(matches!(&err, CarrierError::MissingField(f) if f == "PackageLabel"));
}

#[tokio::test]
async fn test_latest_status() {
    let transport = MockTransport::new();
    transport.respond_json(
        200,
        json!([{"PackageScansList": [
            {"Scan": "NOV", "ScanDescription": "Kreirana pošiljka", "ScanTime": "2024-03-01T08:00:00", "Center": "10000"},
            {"Scan": "DOS", "ScanDescription": "Uručeno", "ScanTime": "2024-03-02T13:10:00", "Center": "21000"}
        ]}]),
    );
    let service = service_with(transport).await;

    let scan = service.latest_status("HP123").await.unwrap();
    assert_eq!(scan.scan, "DOS");
    assert_eq!(scan.center, "21000");
}

#[tokio::test]
async fn test_latest_status_without_scans() {
    let transport = MockTransport::new();
    transport.respond_json(200, json!([]));
    let service = service_with(transport).await;

    let err = service.latest_status("HP123").await.unwrap_err();
    assert!(matches!(&err, CarrierError::MissingField(f) if f == "PackageScansList"));
}

use serde::{Deserialize, Serialize};

use super::lenient::{lenient_string, null_as_empty};

/// Código de barras tal como lo espera la API: `{"barcode": "..."}`
#[derive(Debug, Clone, Serialize)]
pub struct BarcodeRef<'a> {
    pub barcode: &'a str,
}

/// Cuerpo de `fetch_shipment_status`
#[derive(Debug, Serialize)]
pub struct ShipmentStatusRequest<'a> {
    pub barcodes: Vec<BarcodeRef<'a>>,
}

/// Escaneo de un paquete
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageScan {
    #[serde(rename = "Scan", default, deserialize_with = "lenient_string")]
    pub scan: String,
    #[serde(rename = "ScanDescription", default, deserialize_with = "lenient_string")]
    pub scan_description: String,
    #[serde(rename = "ScanTime", default, deserialize_with = "lenient_string")]
    pub scan_time: String,
    #[serde(rename = "Center", default, deserialize_with = "lenient_string")]
    pub center: String,
}

/// Estado de un envío (un elemento por código de barras)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipmentStatus {
    #[serde(rename = "PackageScansList", default, deserialize_with = "null_as_empty")]
    pub scans: Vec<PackageScan>,
}

impl ShipmentStatus {
    /// El último escaneo es el estado actual
    pub fn latest_scan(&self) -> Option<&PackageScan> {
        self.scans.last()
    }
}

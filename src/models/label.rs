use base64::Engine;
use serde::{Deserialize, Serialize, Serializer};

use super::tracking::BarcodeRef;
use crate::utils::errors::{CarrierError, CarrierResult};

/// Formato de etiqueta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFormat {
    /// PDF con CODE39
    #[default]
    PdfCode39 = 1,
    /// ZPL para impresoras térmicas
    Zpl = 2,
    /// PDF con CODE128
    PdfCode128 = 3,
}

impl LabelFormat {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::PdfCode39),
            2 => Some(Self::Zpl),
            3 => Some(Self::PdfCode128),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Zpl => "zpl",
            Self::PdfCode39 | Self::PdfCode128 => "pdf",
        }
    }
}

impl Serialize for LabelFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Parámetros de `fetch_shipping_labels`
#[derive(Debug, Clone, Default)]
pub struct LabelQuery {
    pub barcodes: Vec<String>,
    pub client_reference_number: Option<String>,
    pub format: LabelFormat,
    /// A4 con 4 etiquetas por página
    pub a4: bool,
}

impl LabelQuery {
    pub fn for_barcode(barcode: impl Into<String>, format: LabelFormat) -> Self {
        Self {
            barcodes: vec![barcode.into()],
            format,
            ..Default::default()
        }
    }
}

/// Cuerpo de `fetch_shipping_labels`
#[derive(Debug, Serialize)]
pub struct LabelRequest<'a> {
    #[serde(rename = "A4")]
    pub a4: bool,
    pub format: LabelFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_reference_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcodes: Option<Vec<BarcodeRef<'a>>>,
}

impl<'a> From<&'a LabelQuery> for LabelRequest<'a> {
    fn from(query: &'a LabelQuery) -> Self {
        let barcodes = (!query.barcodes.is_empty())
            .then(|| query.barcodes.iter().map(|b| BarcodeRef { barcode: b }).collect());

        Self {
            a4: query.a4,
            format: query.format,
            client_reference_number: query
                .client_reference_number
                .as_deref()
                .filter(|r| !r.is_empty()),
            barcodes,
        }
    }
}

/// Response de etiquetas
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelResponse {
    #[serde(rename = "PackageLabel", default)]
    pub package_label: Option<String>,
}

impl LabelResponse {
    /// Etiqueta en base64; error si la API no la devolvió
    pub fn into_label(self) -> CarrierResult<String> {
        self.package_label
            .filter(|l| !l.is_empty())
            .ok_or_else(|| CarrierError::MissingField("PackageLabel".to_string()))
    }
}

/// Decodificar una etiqueta en base64 a bytes
pub fn decode_label(encoded: &str) -> CarrierResult<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| CarrierError::InvalidResponse(format!("label is not valid base64: {}", e)))
}

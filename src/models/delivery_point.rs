//! Puntos de entrega (oficinas y paketomati)
//!
//! El transportista devuelve la longitud como `getLng` (sic) y a veces manda
//! coordenadas y códigos como números y a veces como strings, así que los
//! campos se decodifican de forma tolerante.

use serde::{Deserialize, Serialize};

use super::lenient::{lenient_f64, lenient_string, null_as_empty};

/// Filtro de tipo de instalación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FacilityType {
    #[default]
    #[serde(rename = "ALL")]
    All,
    /// Oficinas de correos
    #[serde(rename = "PU")]
    PostOffices,
    /// Paketomati
    #[serde(rename = "PAK")]
    ParcelLockers,
}

impl FacilityType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "ALL" => Some(Self::All),
            "PU" => Some(Self::PostOffices),
            "PAK" => Some(Self::ParcelLockers),
            _ => None,
        }
    }
}

/// Parámetros de búsqueda
#[derive(Debug, Clone, Default)]
pub struct DeliveryPointQuery {
    pub facility_type: FacilityType,
    pub search_text: String,
    /// Incluir también la semana siguiente
    pub next_week: bool,
}

/// Cuerpo de `fetch_parcel_delivery_point`
#[derive(Debug, Serialize)]
pub struct DeliveryPointRequest<'a> {
    #[serde(rename = "facilityType")]
    pub facility_type: FacilityType,
    #[serde(rename = "nextWeek")]
    pub next_week: u8,
    #[serde(rename = "searchText")]
    pub search_text: &'a str,
}

impl<'a> From<&'a DeliveryPointQuery> for DeliveryPointRequest<'a> {
    fn from(query: &'a DeliveryPointQuery) -> Self {
        Self {
            facility_type: query.facility_type,
            next_week: u8::from(query.next_week),
            search_text: &query.search_text,
        }
    }
}

/// Punto de entrega
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeliveryPoint {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub zip: String,
    #[serde(rename = "geoLat", default, deserialize_with = "lenient_f64")]
    pub lat: f64,
    #[serde(rename = "getLng", default, deserialize_with = "lenient_f64")]
    pub lng: f64,
}

impl DeliveryPoint {
    /// Coincidencia por nombre, ciudad, dirección (sin mayúsculas) o código postal
    pub fn matches(&self, search: &str) -> bool {
        let needle = search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&needle)
            || self.city.to_lowercase().contains(&needle)
            || self.address.to_lowercase().contains(&needle)
            || self.zip.contains(&needle)
    }
}

/// Response de puntos de entrega
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryPointResponse {
    #[serde(rename = "paketomatInfoList", default, deserialize_with = "null_as_empty")]
    pub points: Vec<DeliveryPoint>,
}

/// Filtrar la lista por texto libre
pub fn filter_delivery_points<'a>(points: &'a [DeliveryPoint], search: &str) -> Vec<&'a DeliveryPoint> {
    points.iter().filter(|p| p.matches(search)).collect()
}

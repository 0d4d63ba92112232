//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al contrato JSON de la API DXWebAPI de HP Express.

pub mod auth;
pub mod catalog;
pub mod delivery_point;
pub mod label;
mod lenient;
pub mod shipment;
pub mod tracking;

pub use delivery_point::{DeliveryPoint, DeliveryPointQuery, FacilityType};
pub use label::{LabelFormat, LabelQuery};
pub use shipment::{
    AdditionalService, CreatedShipment, DeliveryType, Package, ParcelSize, Recipient, Sender,
    ShipmentOrderResult, ShipmentRequest,
};
pub use tracking::{PackageScan, ShipmentStatus};

//! Services module
//!
//! Este módulo contiene la lógica de negocio sobre el cliente de HP Express:
//! construcción de envíos a partir de pedidos y su ciclo de vida.

pub mod shipment_service;

pub use shipment_service::{
    build_request, tracking_url, OrderDetails, SenderProfile, ShipmentOptions, ShipmentRecord, ShipmentService,
    ShippingLabel,
};

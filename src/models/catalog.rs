//! Catálogo de HP Express
//!
//! Servicios, tipos de entrega, tamaños de paketomat y servicios adicionales
//! con sus etiquetas originales.

/// Servicio por defecto (Paket 24 D+4)
pub const DEFAULT_SERVICE: u16 = 38;

pub const SERVICES: &[(u16, &str)] = &[
    (26, "Paket 24 D+1"),
    (29, "Paket 24 D+2"),
    (32, "Paket 24 D+3"),
    (38, "Paket 24 D+4"),
    (39, "EasyReturn D+3 (opcija 1)"),
    (40, "EasyReturn D+3 (opcija 2)"),
    (46, "Paletna pošiljka D+5"),
];

pub const DELIVERY_TYPES: &[(u8, &str)] = &[(1, "Adresa"), (2, "Pošta"), (3, "Paketomat")];

pub const PARCEL_SIZES: &[(&str, &str)] = &[
    ("X", "XS (9x16x64 cm)"),
    ("S", "S (9x38x64 cm)"),
    ("M", "M (19x38x64 cm)"),
    ("L", "L (39x38x64 cm)"),
];

pub const ADDITIONAL_SERVICES: &[(u16, &str)] = &[
    (1, "Osobna dostava"),
    (3, "Dostava subotom"),
    (4, "Povratnica (AR)"),
    (9, "Otkupna pošiljka (COD)"),
    (11, "Prikup subotom"),
    (29, "Obavijest pošiljatelju"),
    (30, "Obavijest primatelju"),
    (31, "Email pošiljatelju"),
    (32, "Email primatelju"),
    (38, "Nestandardni format"),
    (45, "EasyReturn (opcija 3)"),
    (46, "Osjetljiv sadržaj"),
    (47, "Konsolidirana pošiljka"),
    (54, "Povrat prazne euro-palete"),
];

pub fn service_name(code: u16) -> Option<&'static str> {
    SERVICES.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

pub fn delivery_type_name(code: u8) -> Option<&'static str> {
    DELIVERY_TYPES.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

pub fn parcel_size_name(code: &str) -> Option<&'static str> {
    PARCEL_SIZES.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

pub fn additional_service_name(code: u16) -> Option<&'static str> {
    ADDITIONAL_SERVICES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn is_known_service(code: u16) -> bool {
    service_name(code).is_some()
}

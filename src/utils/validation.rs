//! Utilidades de validación
//!
//! Helpers para direcciones y teléfonos croatas tal como los espera la API
//! de HP Express.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ADDRESS_RE: Regex =
        Regex::new(r"^(.+?)\s+(\d+)\s*([a-zA-Z/].*)?$").expect("valid address regex");
    static ref PHONE_CHARS_RE: Regex = Regex::new(r"[^\d+]").expect("valid phone regex");
    static ref COUNTRY_PREFIX_RE: Regex =
        Regex::new(r"^(\+385|00385|385)").expect("valid prefix regex");
    static ref MOBILE_RE: Regex = Regex::new(r"^09[125789]\d{6,7}$").expect("valid mobile regex");
}

/// Dirección separada en calle, número y sufijo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub street: String,
    pub hnum: String,
    pub hnum_suffix: String,
}

/// Truncar a `max` caracteres (no bytes)
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Separar "Ulica 123/A" en calle, número y sufijo
///
/// Si no hay número reconocible, la línea completa queda como calle y el
/// número es ".", que es lo que acepta el transportista.
pub fn parse_address(address: &str) -> ParsedAddress {
    let trimmed = address.trim();

    let (street, hnum, suffix) = match ADDRESS_RE.captures(trimmed) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str().trim()).unwrap_or(trimmed).to_string(),
            caps.get(2).map(|m| m.as_str()).unwrap_or(".").to_string(),
            caps.get(3).map(|m| m.as_str().trim()).unwrap_or("").to_string(),
        ),
        None => (address.to_string(), ".".to_string(), String::new()),
    };

    ParsedAddress {
        street: truncate_chars(&street, 75),
        hnum: truncate_chars(&hnum, 10),
        hnum_suffix: truncate_chars(&suffix, 10),
    }
}

/// Normalizar un teléfono croata al formato nacional (0...)
pub fn format_phone(phone: &str) -> String {
    let cleaned = PHONE_CHARS_RE.replace_all(phone, "");
    let local = COUNTRY_PREFIX_RE.replace(&cleaned, "0").into_owned();

    if local.starts_with('0') {
        local
    } else {
        format!("0{}", local)
    }
}

/// Validar móvil croata (091, 092, 095, 097, 098, 099)
pub fn is_valid_mobile(phone: &str) -> bool {
    MOBILE_RE.is_match(&format_phone(phone))
}

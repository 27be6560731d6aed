//! Enlaces de contacto por WhatsApp (`wa.me`)

use serde::Serialize;

use crate::utils::validation::phone_digits;

/// Enlace listo para abrir en el cliente
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappLink {
    pub whatsapp_url: String,
    pub phone_number: String,
}

/// Mensaje inicial que se propone al cliente
pub fn rental_inquiry(name: &str, model: &str) -> String {
    format!(
        "Hi, I'm interested in renting the {} {}. Is it available?",
        name, model
    )
}

/// Construir el deep link para un número y un mensaje
pub fn build_link(raw_number: &str, message: &str) -> WhatsappLink {
    let phone_number = phone_digits(raw_number);
    let whatsapp_url = format!(
        "https://wa.me/{}?text={}",
        phone_number,
        urlencoding::encode(message)
    );
    WhatsappLink {
        whatsapp_url,
        phone_number,
    }
}

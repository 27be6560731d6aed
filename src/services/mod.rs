//! Servicios de negocio
//!
//! Lógica sin dependencia de HTTP: disponibilidad de coches, reloj,
//! enlaces de WhatsApp y almacenamiento de fotos.

pub mod availability_service;
pub mod clock;
pub mod upload_service;
pub mod whatsapp_service;

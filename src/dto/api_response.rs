use serde::Serialize;

/// Mensaje devuelto por las rutas públicas cuando la base de datos no responde
pub const DB_OFFLINE_MESSAGE: &str = "Database not connected";

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Lista vacía con aviso (base de datos caída en rutas públicas)
    pub fn empty(message: &str) -> Self {
        Self::success_with_message(Vec::new(), message.to_string())
    }
}

// Response de operaciones de escritura del panel
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "photoUrl", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl MutationResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            id: None,
            photo_url: None,
        }
    }

    pub fn created(message: &str, id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::ok(message)
        }
    }

    pub fn uploaded(message: &str, photo_url: String) -> Self {
        Self {
            photo_url: Some(photo_url),
            ..Self::ok(message)
        }
    }
}

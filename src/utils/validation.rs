//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión tolerante de los valores "sucios" que llegan desde
//! formularios y filas antiguas (booleanos como "1", fechas vacías, etc.).

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;
use validator::ValidationError;

/// Formato de fecha aceptado en toda la API
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Interpretar un valor JSON como booleano tolerante.
///
/// Acepta `true/false`, `1/0`, `"1"/"0"`, `"true"/"false"`, `"yes"/"no"`.
/// Devuelve `None` si el valor no se puede interpretar.
pub fn loose_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Deserializador serde para `available`: ausente, `null` o en blanco equivale a `true`.
pub fn deserialize_loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(true),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(true),
        Some(v) => loose_bool(&v)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid boolean value: {}", v))),
    }
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    parse_date(value).ok_or_else(|| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Intentar leer una fecha `YYYY-MM-DD` o un timestamp RFC3339 (se toma su fecha)
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Fecha opcional estricta: vacío/null es `None`, formato inválido es error
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => validate_date(v).map(Some),
    }
}

/// Fecha opcional tolerante: cualquier valor ilegible se registra y se trata como ausente
pub fn lenient_date(field: &str, value: Option<&Value>) -> Option<NaiveDate> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => {
            let parsed = parse_date(s);
            if parsed.is_none() {
                tracing::warn!("⚠️ Fecha ilegible en '{}': {:?}, se ignora la restricción", field, s);
            }
            parsed
        }
        Some(other) => {
            tracing::warn!("⚠️ Tipo inesperado en '{}': {}, se ignora la restricción", field, other);
            None
        }
    }
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty"));
    }
    Ok(())
}

/// Dejar solo los dígitos de un número de teléfono
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = phone_digits(value);
    if clean_phone.len() < 8 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email (vacío permitido)
pub fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && !value.contains('@') {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Normalizar la lista de imágenes de un coche.
///
/// Acepta un arreglo JSON, un string con un arreglo JSON serializado,
/// o una lista separada por comas.
pub fn normalize_images(value: &Value) -> Vec<String> {
    let raw: Vec<String> = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Value::String(s) => match serde_json::from_str::<Vec<String>>(s) {
            Ok(list) => list,
            Err(_) => s.split(',').map(str::to_string).collect(),
        },
        _ => Vec::new(),
    };

    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Deserializador serde para `images`
pub fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(normalize_images).unwrap_or_default())
}

/// Interpretar un número que puede llegar como número JSON o como texto ("45000", " 7 ")
pub fn loose_number<T: FromStr>(value: &Value) -> Option<T> {
    match value {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Deserializador serde para campos numéricos de formularios
pub fn deserialize_loose_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Value::deserialize(deserializer)?;
    loose_number(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid number: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loose_bool_forms() {
        assert_eq!(loose_bool(&json!(true)), Some(true));
        assert_eq!(loose_bool(&json!(0)), Some(false));
        assert_eq!(loose_bool(&json!(1)), Some(true));
        assert_eq!(loose_bool(&json!("1")), Some(true));
        assert_eq!(loose_bool(&json!("TRUE")), Some(true));
        assert_eq!(loose_bool(&json!("false")), Some(false));
        assert_eq!(loose_bool(&json!("maybe")), None);
        assert_eq!(loose_bool(&json!([1])), None);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Flag {
        #[serde(default = "default_true", deserialize_with = "deserialize_loose_bool")]
        available: bool,
    }

    fn default_true() -> bool {
        true
    }

    #[test]
    fn test_blank_available_defaults_to_true() {
        let flag = |value: Value| serde_json::from_value::<Flag>(value).unwrap().available;
        assert!(flag(json!({})));
        assert!(flag(json!({ "available": null })));
        assert!(flag(json!({ "available": "" })));
        assert!(flag(json!({ "available": "  " })));
        assert!(!flag(json!({ "available": "0" })));
        assert!(!flag(json!({ "available": false })));
        assert!(serde_json::from_value::<Flag>(json!({ "available": "maybe" })).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(parse_date("2025-01-15"), Some(d));
        assert_eq!(parse_date(" 2025-01-15 "), Some(d));
        assert_eq!(parse_date("2025-01-15T10:30:00+00:00"), Some(d));
        assert_eq!(parse_date("15/01/2025"), None);
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
        assert!(parse_optional_date(Some("2025-02-30")).is_err());
        assert!(parse_optional_date(Some("2025-02-28")).unwrap().is_some());
    }

    #[test]
    fn test_lenient_date_ignores_garbage() {
        assert_eq!(lenient_date("start_date", Some(&json!("not a date"))), None);
        assert_eq!(lenient_date("start_date", Some(&json!(12345))), None);
        assert_eq!(lenient_date("start_date", Some(&json!(""))), None);
        assert_eq!(
            lenient_date("start_date", Some(&json!("2025-03-01"))),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
    }

    #[test]
    fn test_phone_digits() {
        assert_eq!(phone_digits("+250 788-123-456"), "250788123456");
        assert!(validate_phone("+250 788 123 456").is_ok());
        assert!(validate_phone("12-34").is_err());
    }

    #[test]
    fn test_normalize_images() {
        assert_eq!(
            normalize_images(&json!(["/a.jpg", " ", "/b.jpg"])),
            vec!["/a.jpg", "/b.jpg"]
        );
        assert_eq!(
            normalize_images(&json!("[\"/a.jpg\",\"/b.jpg\"]")),
            vec!["/a.jpg", "/b.jpg"]
        );
        assert_eq!(
            normalize_images(&json!("/a.jpg, /b.jpg,")),
            vec!["/a.jpg", "/b.jpg"]
        );
        assert!(normalize_images(&json!(null)).is_empty());
    }

    #[test]
    fn test_loose_number() {
        assert_eq!(loose_number::<i32>(&json!(2020)), Some(2020));
        assert_eq!(loose_number::<i32>(&json!(" 5 ")), Some(5));
        assert_eq!(
            loose_number::<rust_decimal::Decimal>(&json!("45000.50")),
            Some(rust_decimal::Decimal::new(4_500_050, 2))
        );
        assert_eq!(loose_number::<i32>(&json!("five")), None);
        assert_eq!(loose_number::<i32>(&json!(null)), None);
    }
}

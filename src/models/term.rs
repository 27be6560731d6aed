//! Modelo de Term (condiciones de alquiler)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Term principal - mapea exactamente a la tabla terms
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Term {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTerm {
    pub title: String,
    pub content: String,
    pub display_order: i32,
}

impl Term {
    pub fn from_new(id: i64, new: NewTerm, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            display_order: new.display_order,
            created_at,
        }
    }
}

use serde::Deserialize;
use validator::Validate;

use crate::models::NewTerm;
use crate::utils::errors::AppResult;
use crate::utils::validation::{deserialize_loose_number, validate_not_empty};

fn default_display_order() -> i32 {
    0
}

// Request del panel para crear o reemplazar una condición de alquiler
#[derive(Debug, Deserialize, Validate)]
pub struct TermPayload {
    #[validate(custom = "validate_not_empty")]
    pub title: String,

    #[validate(custom = "validate_not_empty")]
    pub content: String,

    #[serde(default = "default_display_order", deserialize_with = "deserialize_loose_number")]
    pub display_order: i32,
}

impl TermPayload {
    pub fn into_new_term(self) -> AppResult<NewTerm> {
        self.validate()?;
        Ok(NewTerm {
            title: self.title.trim().to_string(),
            content: self.content,
            display_order: self.display_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_payload() {
        let payload: TermPayload =
            serde_json::from_value(json!({ "title": "Deposit", "content": "50%", "display_order": "2" }))
                .unwrap();
        assert_eq!(payload.into_new_term().unwrap().display_order, 2);

        let payload: TermPayload =
            serde_json::from_value(json!({ "title": "Deposit", "content": " " })).unwrap();
        assert!(payload.into_new_term().is_err());
    }
}

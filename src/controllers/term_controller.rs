use std::sync::Arc;

use crate::controllers::require_database;
use crate::dto::api_response::{ApiResponse, MutationResponse, DB_OFFLINE_MESSAGE};
use crate::dto::term_dto::TermPayload;
use crate::models::Term;
use crate::repositories::{DatabaseHealth, TermRepository};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct TermController {
    repository: Arc<dyn TermRepository>,
    health: Arc<dyn DatabaseHealth>,
}

impl TermController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.repos.terms.clone(),
            health: state.repos.health.clone(),
        }
    }

    pub async fn list_public(&self) -> AppResult<ApiResponse<Vec<Term>>> {
        if !self.health.is_connected().await {
            return Ok(ApiResponse::empty(DB_OFFLINE_MESSAGE));
        }
        Ok(ApiResponse::success(self.repository.list_ordered().await?))
    }

    pub async fn list_admin(&self) -> AppResult<ApiResponse<Vec<Term>>> {
        require_database(self.health.as_ref()).await?;
        Ok(ApiResponse::success(self.repository.list_ordered().await?))
    }

    pub async fn create(&self, payload: TermPayload) -> AppResult<MutationResponse> {
        require_database(self.health.as_ref()).await?;
        let term = self.repository.create(payload.into_new_term()?).await?;
        Ok(MutationResponse::created("Term added successfully", term.id))
    }

    pub async fn update(&self, id: i64, payload: TermPayload) -> AppResult<MutationResponse> {
        require_database(self.health.as_ref()).await?;
        self.repository
            .update(id, payload.into_new_term()?)
            .await?
            .ok_or_else(|| not_found_error("Term", id))?;
        Ok(MutationResponse::ok("Term updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> AppResult<MutationResponse> {
        require_database(self.health.as_ref()).await?;
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Term", id));
        }
        Ok(MutationResponse::ok("Term deleted successfully"))
    }
}

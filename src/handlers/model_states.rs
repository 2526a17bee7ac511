use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use super::ErrorResponse;
use crate::models::{ModelId, ModelState, ModelStates};
use crate::state::AppState;
use crate::store::FetchStatus;

#[derive(Serialize)]
pub struct ModelStatesResponse {
    pub initialized: bool,
    pub models: Option<ModelStates>,
    pub last_fetch: FetchStatus,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub count: usize,
    pub last_fetch: FetchStatus,
}

pub async fn list_model_states(State(state): State<AppState>) -> Json<ModelStatesResponse> {
    let models = state.store.model_states();
    Json(ModelStatesResponse {
        initialized: models.is_some(),
        models,
        last_fetch: state.store.last_fetch(),
    })
}

pub async fn refresh(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.fetch_data().await {
        Ok(count) => Ok(Json(RefreshResponse {
            count,
            last_fetch: state.store.last_fetch(),
        })),
        Err(e) => Err((
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: e.to_string(),
                hint: Some(format!(
                    "Check that the model backend is reachable at {}",
                    state.store.endpoint().models_list_url()
                )),
            }),
        )),
    }
}

pub async fn update_model_state(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(model_state): Json<ModelState>,
) -> Result<Json<ModelState>, (StatusCode, Json<ErrorResponse>)> {
    if model_state.key() != ModelId::from(id.as_str()) {
        warn!(
            "[modelstore] Rejected update: path id {} does not match body id {}",
            id, model_state.id
        );
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Model id mismatch".to_string(),
                hint: Some(format!("Body id must equal path id '{}'", id)),
            }),
        ));
    }

    state.store.update_single(model_state.clone());
    Ok(Json(model_state))
}

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub render_mode: String,
    pub initialized: bool,
    pub models_total: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: format!("modelstore-v{}", env!("CARGO_PKG_VERSION")),
        render_mode: state.config.render_mode.as_str().to_string(),
        initialized: state.store.is_initialized(),
        models_total: state.store.len(),
    })
}

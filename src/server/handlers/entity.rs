use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

use crate::{
    Result,
    logging::RequestLogRecord,
    resource::EntityKind,
    server::{
        params::{EntityParams, required},
        state::AppState,
    },
};

/// Handle GET /song requests.
pub async fn handle_song(
    State(state): State<AppState>,
    Query(params): Query<EntityParams>,
) -> Result<Json<Value>> {
    fetch_entity(&state, "/song", EntityKind::Song, &params).await
}

/// Handle GET /album requests.
pub async fn handle_album(
    State(state): State<AppState>,
    Query(params): Query<EntityParams>,
) -> Result<Json<Value>> {
    fetch_entity(&state, "/album", EntityKind::Album, &params).await
}

async fn fetch_entity(
    state: &AppState,
    endpoint: &str,
    kind: EntityKind,
    params: &EntityParams,
) -> Result<Json<Value>> {
    let seokey = required(params.seokey.as_deref(), "seokey")?;
    tracing::info!("{} request: {}", kind.as_str(), seokey);

    let record = RequestLogRecord::new(endpoint, kind.as_str(), seokey);

    match state.relay.entity(kind, seokey).await {
        Ok(body) => {
            record.with_response(200).emit();
            Ok(Json(body))
        }
        Err(e) => {
            record.with_error(&e).emit();
            Err(e)
        }
    }
}

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

use crate::{
    Result,
    logging::RequestLogRecord,
    relay::ListingRequest,
    resource::ResourceKind,
    server::{
        params::{ListingParams, SearchParams, required},
        state::AppState,
    },
};

/// Handle GET /search requests.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>> {
    let keyword = required(params.q.as_deref(), "q")?;
    let request = ListingRequest::new(ResourceKind::Search, keyword)
        .with_paging(params.page, params.limit)
        .with_country(params.country);

    fetch_listing(&state, "/search", request).await
}

/// Handle GET /artist/tracks requests.
pub async fn handle_artist_tracks(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Value>> {
    let request = listing_request(ResourceKind::ArtistTracks, params)?;
    fetch_listing(&state, "/artist/tracks", request).await
}

/// Handle GET /artist/albums requests.
pub async fn handle_artist_albums(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Value>> {
    let request = listing_request(ResourceKind::ArtistAlbums, params)?;
    fetch_listing(&state, "/artist/albums", request).await
}

/// Handle GET /label/albums requests.
pub async fn handle_label_albums(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Value>> {
    let request = listing_request(ResourceKind::LabelAlbums, params)?;
    fetch_listing(&state, "/label/albums", request).await
}

fn listing_request(kind: ResourceKind, params: ListingParams) -> Result<ListingRequest> {
    let seokey = required(params.seokey.as_deref(), "seokey")?;
    Ok(ListingRequest::new(kind, seokey)
        .with_paging(params.page, params.limit)
        .with_sort(params.sort))
}

async fn fetch_listing(
    state: &AppState,
    endpoint: &str,
    request: ListingRequest,
) -> Result<Json<Value>> {
    tracing::info!("{} request: {}", request.kind.as_str(), request.lookup);

    let record = RequestLogRecord::new(endpoint, request.kind.as_str(), &request.lookup)
        .with_paging(request.page.as_deref(), request.limit.as_deref());

    match state.relay.listing(&request).await {
        Ok(listing) => {
            record.with_plan(&listing.plan).with_response(200).emit();
            Ok(Json(listing.body))
        }
        Err(e) => {
            record.with_error(&e).emit();
            Err(e)
        }
    }
}

use axum::{
    Json, Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handlers::{
        handle_album, handle_artist_albums, handle_artist_tracks, handle_label_albums,
        handle_search, handle_song,
    },
    state::AppState,
};
use crate::config::Config;

/// Create the application router.
pub fn create_router(config: &Config) -> anyhow::Result<Router> {
    let state = AppState::new(config)?;

    let cors = if config.cors_allowed_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(config.cors_allowed_origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    };

    let app = Router::new()
        .route("/search", get(handle_search))
        .route("/song", get(handle_song))
        .route("/album", get(handle_album))
        .route("/artist/tracks", get(handle_artist_tracks))
        .route("/artist/albums", get(handle_artist_albums))
        .route("/label/albums", get(handle_label_albums))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn test_router() -> Router {
        let config = Config::from_lookup(|name| match name {
            // Unroutable, so a stray upstream call fails fast instead of hitting the network
            "UPSTREAM_BASE_URL" => Some("http://127.0.0.1:9/apiv2".to_string()),
            _ => None,
        })
        .unwrap();
        create_router(&config).unwrap()
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = test_router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_seokey_is_rejected() {
        let uris = [
            "/song",
            "/album?seokey=",
            "/artist/tracks?page=1",
            "/label/albums?seokey=%20",
        ];
        for uri in uris {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["code"], "MISSING_PARAMETER");
        }
    }

    #[tokio::test]
    async fn test_missing_keyword_is_rejected() {
        let (status, body) = get_json("/search?page=2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required parameter: q");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let (status, body) = get_json("/song?seokey=tum-hi-ho").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "UPSTREAM_FAILED");
    }

    #[test]
    fn test_invalid_cors_origin_is_an_error() {
        let config = Config::from_lookup(|name| match name {
            "CORS_ALLOWED_ORIGIN" => Some("bad\norigin".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(create_router(&config).is_err());
    }
}

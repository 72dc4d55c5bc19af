//! Route gateway: merges the endpoint subrouters and wraps them in the
//! CORS, header and request-tracing layers shared by every response.

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::AppState;

mod health;
mod predict;
mod thresholds;

// ---

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(predict::router())
        .merge(health::router())
        .merge(thresholds::router())
        // CorsLayer only adds these on preflight; every response should carry them.
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        id = %Uuid::new_v4(),
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                // ApiError already logs every failed response once.
                .on_failure(()),
        )
        .with_state(state)
}

/// Permissive CORS. Answers every OPTIONS request itself, before routing.
fn cors_layer() -> CorsLayer {
    // ---
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

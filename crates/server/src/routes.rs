use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::boundary::{self, REQUEST_ID_HEADER};
use crate::state::AppState;

pub mod products;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn request_span(req: &Request<Body>) -> tracing::Span {
    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %request_id,
    )
}

/// Build the full application router: product routes, health, and the middleware stack.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get).put(products::update).delete(products::delete),
        )
        .with_state(state);

    // Layers wrap outward: the last one added sees the request first.
    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(CatchPanicLayer::custom(boundary::panic_response))
        .layer(middleware::from_fn(boundary::error_boundary))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header, Method, StatusCode};
    use serde_json::{json, Value};
    use service::product::repo::InMemoryProductRepository;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        build_router(AppState::new(Arc::new(InMemoryProductRepository::new())), CorsLayer::very_permissive())
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(res: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok_and_carries_request_id() {
        let res = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(&REQUEST_ID_HEADER));
        assert_eq!(body_json(res).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn create_sets_location_header() {
        let res = app()
            .oneshot(json_request(
                Method::POST,
                "/products",
                json!({"name": "Widget", "description": "D", "price": 9.99}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers()[header::LOCATION], "/products/1");
        let body = body_json(res).await;
        assert_eq!(body["productID"], 1);
        assert_eq!(body["price"], json!(9.99));
    }

    #[tokio::test]
    async fn update_with_mismatched_id_is_rejected_with_empty_body() {
        let res = app()
            .oneshot(json_request(
                Method::PUT,
                "/products/1",
                json!({"productID": 2, "name": "A", "description": "", "price": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn non_numeric_path_id_is_bad_request() {
        let res = app()
            .oneshot(Request::get("/products/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_is_a_validation_failure() {
        let res = app()
            .oneshot(
                Request::post("/products")
                    .body(Body::from(r#"{"name":"A","price":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["error"], "Validation Error");
        assert_eq!(body["violations"][0]["field"], "body");
    }
}

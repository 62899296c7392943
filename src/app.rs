use axum::http::{header, HeaderValue};
use axum::{routing::get, Router};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{health_handler, lookup_handler};
use crate::routes;
use crate::state::AppState;

/// Build the application router
///
/// The lookup ignores the request path, so it also answers under an API
/// Gateway stage prefix such as `/prod/` or a named resource. Every response,
/// including errors, carries `Access-Control-Allow-Origin: *` so a page on
/// another origin can read it.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::LOOKUP, get(lookup_handler))
        .route(routes::HEALTH, get(health_handler))
        .fallback(get(lookup_handler))
        .with_state(state)
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
pub(crate) fn test_state(store: crate::store::MemoryStore) -> AppState {
    use std::sync::Arc;

    let config = crate::config::Config {
        table_name: "demo-table".to_string(),
        dynamodb_endpoint: None,
        service_port: 3000,
        service_host: "0.0.0.0".to_string(),
    };

    AppState {
        store: Arc::new(store),
        config: Arc::new(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    /// API Gateway REST proxy event for `GET /` on the `prod` stage
    const APIGW_PROD_EVENT: &str = r#"{
        "resource": "/",
        "path": "/",
        "httpMethod": "GET",
        "headers": {
            "Accept": "*/*",
            "Host": "wt6mne2s9k.execute-api.us-west-2.amazonaws.com",
            "User-Agent": "curl/7.64.1",
            "X-Forwarded-Proto": "https"
        },
        "multiValueHeaders": {
            "Accept": ["*/*"],
            "Host": ["wt6mne2s9k.execute-api.us-west-2.amazonaws.com"],
            "User-Agent": ["curl/7.64.1"],
            "X-Forwarded-Proto": ["https"]
        },
        "queryStringParameters": {},
        "multiValueQueryStringParameters": {},
        "pathParameters": {},
        "stageVariables": {},
        "requestContext": {
            "accountId": "123456789012",
            "resourceId": "us4z18",
            "stage": "prod",
            "requestId": "41b45ea3-70b5-11e6-b7bd-69b5aaebc7d9",
            "identity": {
                "sourceIp": "192.168.100.1",
                "userAgent": "curl/7.64.1"
            },
            "resourcePath": "/",
            "httpMethod": "GET",
            "apiId": "wt6mne2s9k",
            "path": "/prod/"
        },
        "body": null,
        "isBase64Encoded": false
    }"#;

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_answers_any_get_path() {
        for uri in ["/prod/", "/prod/value", "/value"] {
            let response = router(test_state(MemoryStore::new().with_record("demo", "X")))
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "uri {}", uri);
            assert_eq!(
                response.headers().get("access-control-allow-origin").unwrap(),
                "*"
            );
            assert_eq!(body_string(response).await, r#"{"value":"X"}"#);
        }
    }

    #[tokio::test]
    async fn test_lambda_event_with_stage_prefix_reaches_lookup() {
        let request = lambda_http::request::from_str(APIGW_PROD_EVENT).unwrap();
        assert_eq!(request.uri().path(), "/prod/");

        let response = router(test_state(MemoryStore::new().with_record("demo", "X")))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(body_string(response).await, r#"{"value":"X"}"#);
    }

    #[tokio::test]
    async fn test_unsupported_method_still_allows_any_origin() {
        let response = router(test_state(MemoryStore::new()))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_openapi_document_lists_lookup_path() {
        let response = router(test_state(MemoryStore::new()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(routes::OPENAPI_JSON)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["paths"].get("/").is_some());
        assert!(doc["paths"].get("/health").is_some());
    }
}

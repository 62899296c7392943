use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::LookupResponse;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "dynamo-demo-lookup API",
        version = "1.0.0",
        description = "Reads the demo record from a DynamoDB table and returns it as JSON"
    ),
    paths(
        handlers::health::health_handler,
        handlers::lookup::lookup_handler
    ),
    components(
        schemas(
            LookupResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "lookup", description = "Demo record lookup")
    )
)]
pub struct ApiDoc;

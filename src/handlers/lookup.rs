use crate::error::{ApiError, ErrorResponse};
use crate::models::{LookupResponse, DEMO_KEY, NO_VALUE_FOUND};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET / handler - Read the demo record
///
/// A missing record is a successful lookup reporting "No value found".
#[utoipa::path(
    get,
    path = routes::LOOKUP,
    responses(
        (status = 200, description = "Record value, or \"No value found\"", body = LookupResponse),
        (status = 500, description = "Store read failed", body = ErrorResponse)
    ),
    tag = "lookup"
)]
pub async fn lookup_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<LookupResponse>), ApiError> {
    let value = match state.store.get_item(DEMO_KEY).await? {
        Some(record) => {
            tracing::info!(
                "Successfully retrieved record with id: {} from table: {}",
                record.id,
                state.config.table_name
            );
            record.value
        }
        None => {
            tracing::info!(
                "Record not found with id: {} in table: {}",
                DEMO_KEY,
                state.config.table_name
            );
            NO_VALUE_FOUND.to_string()
        }
    };

    Ok((StatusCode::OK, Json(LookupResponse { value })))
}

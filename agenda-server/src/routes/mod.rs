pub mod appointments;

use agenda_core::AgendaError;
use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(appointments::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A request body that failed to parse is invalid input, not a 422
pub(crate) fn bad_body(rejection: JsonRejection) -> AgendaError {
    AgendaError::Validation(rejection.body_text())
}

/// Convert agenda errors to HTTP responses
pub struct AppError(AgendaError);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0 {
            AgendaError::Validation(_) => StatusCode::BAD_REQUEST,
            AgendaError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<AgendaError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

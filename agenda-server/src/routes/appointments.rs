//! Appointment endpoints

use agenda_core::{AgendaError, AppointmentRequest, DateRange, Occurrence, OccurrenceId};
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};

use crate::routes::{AppError, bad_body};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route(
            "/api/appointments/{id}",
            put(update_appointment).delete(delete_appointment),
        )
}

#[derive(Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// GET /api/appointments?from=&to= - Occurrences overlapping [from, to)
async fn list_appointments(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<Occurrence>>, AppError> {
    let (Some(from), Some(to)) = (query.from.as_deref(), query.to.as_deref()) else {
        return Err(AgendaError::Validation("'from' and 'to' are required".into()).into());
    };
    let range = DateRange::from_args(from, to)?;

    Ok(Json(state.agenda.list(&range).await?))
}

/// POST /api/appointments - Create an appointment (or a whole series)
///
/// Responds with the first created occurrence.
async fn create_appointment(
    State(state): State<AppState>,
    body: Result<Json<AppointmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.map_err(bad_body)?;
    let first = state
        .agenda
        .create(&req)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AgendaError::Validation("no occurrences generated".into()))?;

    let location = format!("/api/appointments/{}", first.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(first),
    ))
}

/// PUT /api/appointments/:id - Edit an occurrence and the rest of its series
async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<AppointmentRequest>, JsonRejection>,
) -> Result<Json<Occurrence>, AppError> {
    let Json(req) = body.map_err(bad_body)?;
    let updated = state.agenda.update(&OccurrenceId::from(id), &req).await?;
    Ok(Json(updated))
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    pub scope: Option<String>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}

/// DELETE /api/appointments/:id?scope=single|following|all
async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state
        .agenda
        .delete(&OccurrenceId::from(id), query.scope.as_deref())
        .await?;
    Ok(Json(DeleteResponse { deleted }))
}

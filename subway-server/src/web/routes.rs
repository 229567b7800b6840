//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{Distance, LineId, StationId};
use crate::store::StoreError;

use super::dto::*;
use super::extract::{AppJson, AppPath, AppQuery};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations).post(create_station))
        .route("/stations/:id", delete(delete_station))
        .route("/lines", get(list_lines).post(create_line))
        .route(
            "/lines/:id",
            get(get_line).put(update_line).delete(delete_line),
        )
        .route(
            "/lines/:id/sections",
            post(add_section).get(list_sections).delete(remove_station),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn parse_distance(raw: i64) -> Result<Distance, AppError> {
    Distance::try_from(raw).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

async fn create_station(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateStationRequest>,
) -> Result<(StatusCode, Json<StationResponse>), AppError> {
    let station = state.store.create_station(&req.name).await?;
    Ok((StatusCode::CREATED, Json(station.into())))
}

async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResponse>> {
    let stations = state.store.list_stations().await;
    Json(stations.into_iter().map(Into::into).collect())
}

async fn delete_station(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> Result<StatusCode, AppError> {
    state.store.delete_station(StationId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_line(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateLineRequest>,
) -> Result<(StatusCode, Json<LineResponse>), AppError> {
    let distance = parse_distance(req.distance)?;
    let line = state
        .store
        .create_line(
            &req.name,
            &req.color,
            StationId(req.up_station_id),
            StationId(req.down_station_id),
            distance,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(line.into())))
}

async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineResponse>>, AppError> {
    let lines = state.store.list_lines().await?;
    Ok(Json(lines.into_iter().map(Into::into).collect()))
}

async fn get_line(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<LineResponse>, AppError> {
    let line = state.store.get_line(LineId(id)).await?;
    Ok(Json(line.into()))
}

async fn update_line(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
    AppJson(req): AppJson<UpdateLineRequest>,
) -> Result<Json<LineResponse>, AppError> {
    let line = state
        .store
        .update_line(LineId(id), &req.name, &req.color)
        .await?;
    Ok(Json(line.into()))
}

async fn delete_line(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> Result<StatusCode, AppError> {
    state.store.delete_line(LineId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a section and return the line with its updated station order.
async fn add_section(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
    AppJson(req): AppJson<SectionRequest>,
) -> Result<Json<LineResponse>, AppError> {
    let distance = parse_distance(req.distance)?;
    let line = state
        .store
        .add_section(
            LineId(id),
            StationId(req.up_station_id),
            StationId(req.down_station_id),
            distance,
        )
        .await?;
    Ok(Json(line.into()))
}

async fn list_sections(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<Vec<SectionResponse>>, AppError> {
    let sections = state.store.line_sections(LineId(id)).await?;
    Ok(Json(sections.into_iter().map(Into::into).collect()))
}

async fn remove_station(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
    AppQuery(query): AppQuery<RemoveStationQuery>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .remove_station(LineId(id), StationId(query.station_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        let message = e.to_string();
        match e {
            StoreError::StationNotFound(_) | StoreError::LineNotFound(_) => {
                AppError::NotFound { message }
            }
            StoreError::DuplicateStationName(_)
            | StoreError::DuplicateLineName(_)
            | StoreError::StationInUse { .. } => AppError::Conflict { message },
            StoreError::EmptyName(_) | StoreError::Section(_) => AppError::BadRequest { message },
            StoreError::Snapshot { .. } => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use fyyur_db::AppState;
use fyyur_schedule::{Area, SearchResults, Store, VenueDetail, VenueForm};
use serde::Serialize;
use std::sync::Arc;

use super::{error_response, ApiError, SearchRequest};

#[derive(Debug, Serialize)]
pub struct VenueEditResponse {
    pub id: i32,
    #[serde(flatten)]
    pub form: VenueForm,
}

/// GET /api/venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Area>>, ApiError> {
    let areas = Store::new(&state.db)
        .venue_areas(Utc::now())
        .await
        .map_err(error_response)?;
    Ok(Json(areas))
}

/// POST /api/venues
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Json(form): Json<VenueForm>,
) -> Result<(StatusCode, Json<VenueDetail>), ApiError> {
    let input = form.validate().map_err(|e| error_response(e.into()))?;
    let store = Store::new(&state.db);
    let created = store.create_venue(input).await.map_err(error_response)?;
    let detail = store
        .venue_detail(created.id, Utc::now())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// POST /api/venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResults>, ApiError> {
    let results = Store::new(&state.db)
        .search_venues(body.search_term.trim(), Utc::now())
        .await
        .map_err(error_response)?;
    Ok(Json(results))
}

/// GET /api/venues/{id}
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>, ApiError> {
    let detail = Store::new(&state.db)
        .venue_detail(id, Utc::now())
        .await
        .map_err(error_response)?;
    Ok(Json(detail))
}

/// GET /api/venues/{id}/edit
pub async fn edit_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<VenueEditResponse>, ApiError> {
    let venue = Store::new(&state.db).venue(id).await.map_err(error_response)?;
    Ok(Json(VenueEditResponse {
        id: venue.id,
        form: VenueForm::from(&venue),
    }))
}

/// PUT /api/venues/{id}
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(form): Json<VenueForm>,
) -> Result<Json<VenueDetail>, ApiError> {
    let input = form.validate().map_err(|e| error_response(e.into()))?;
    let store = Store::new(&state.db);
    store.update_venue(id, input).await.map_err(error_response)?;
    let detail = store
        .venue_detail(id, Utc::now())
        .await
        .map_err(error_response)?;
    Ok(Json(detail))
}

/// DELETE /api/venues/{id}
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    Store::new(&state.db)
        .delete_venue(id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

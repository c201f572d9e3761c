use axum::{extract::State, http::StatusCode, Json};
use fyyur_db::entities::show;
use fyyur_db::AppState;
use fyyur_schedule::summary::iso_timestamp;
use fyyur_schedule::{Scheduled, ShowForm, ShowListing, Store};
use serde::Serialize;
use std::sync::Arc;

use super::{error_response, ApiError};

#[derive(Debug, Serialize)]
pub struct ShowResponse {
    pub id: i32,
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: String,
}

impl From<show::Model> for ShowResponse {
    fn from(s: show::Model) -> Self {
        Self {
            start_time: iso_timestamp(s.start_time()),
            id: s.id,
            venue_id: s.venue_id,
            artist_id: s.artist_id,
        }
    }
}

/// GET /api/shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowListing>>, ApiError> {
    let listings = Store::new(&state.db)
        .show_listings()
        .await
        .map_err(error_response)?;
    Ok(Json(listings))
}

/// POST /api/shows
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ShowForm>,
) -> Result<(StatusCode, Json<ShowResponse>), ApiError> {
    let input = form.validate().map_err(|e| error_response(e.into()))?;
    let created = Store::new(&state.db)
        .create_show(input)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ShowResponse::from(created))))
}

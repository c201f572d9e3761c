use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use fyyur_db::entities::artist;
use fyyur_db::AppState;
use fyyur_schedule::{ArtistDetail, ArtistForm, SearchResults, Store};
use serde::Serialize;
use std::sync::Arc;

use super::{error_response, ApiError, SearchRequest};

#[derive(Debug, Serialize)]
pub struct ArtistListItem {
    pub id: i32,
    pub name: String,
}

impl From<artist::Model> for ArtistListItem {
    fn from(a: artist::Model) -> Self {
        Self {
            id: a.id,
            name: a.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtistEditResponse {
    pub id: i32,
    #[serde(flatten)]
    pub form: ArtistForm,
}

/// GET /api/artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistListItem>>, ApiError> {
    let artists = Store::new(&state.db).artists().await.map_err(error_response)?;
    Ok(Json(artists.into_iter().map(ArtistListItem::from).collect()))
}

/// POST /api/artists
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ArtistForm>,
) -> Result<(StatusCode, Json<ArtistDetail>), ApiError> {
    let input = form.validate().map_err(|e| error_response(e.into()))?;
    let store = Store::new(&state.db);
    let created = store.create_artist(input).await.map_err(error_response)?;
    let detail = store
        .artist_detail(created.id, Utc::now())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// POST /api/artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResults>, ApiError> {
    let results = Store::new(&state.db)
        .search_artists(body.search_term.trim(), Utc::now())
        .await
        .map_err(error_response)?;
    Ok(Json(results))
}

/// GET /api/artists/{id}
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let detail = Store::new(&state.db)
        .artist_detail(id, Utc::now())
        .await
        .map_err(error_response)?;
    Ok(Json(detail))
}

/// GET /api/artists/{id}/edit
pub async fn edit_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistEditResponse>, ApiError> {
    let artist = Store::new(&state.db).artist(id).await.map_err(error_response)?;
    Ok(Json(ArtistEditResponse {
        id: artist.id,
        form: ArtistForm::from(&artist),
    }))
}

/// PUT /api/artists/{id}
pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(form): Json<ArtistForm>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let input = form.validate().map_err(|e| error_response(e.into()))?;
    let store = Store::new(&state.db);
    store.update_artist(id, input).await.map_err(error_response)?;
    let detail = store
        .artist_detail(id, Utc::now())
        .await
        .map_err(error_response)?;
    Ok(Json(detail))
}

use axum::Json;
use fyyur_schedule::{Choice, Genre, State};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChoicesResponse {
    pub genres: Vec<Choice>,
    pub states: Vec<Choice>,
}

/// GET /api/choices
pub async fn list_choices() -> Json<ChoicesResponse> {
    Json(ChoicesResponse {
        genres: Genre::choices(),
        states: State::choices(),
    })
}

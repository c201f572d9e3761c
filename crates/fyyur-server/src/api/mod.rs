pub mod artists;
pub mod choices;
pub mod shows;
pub mod venues;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fyyur_db::AppState;
use fyyur_schedule::{FieldError, ScheduleError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub search_term: String,
}

/// Map a scheduling error onto its HTTP status and body.
pub fn error_response(err: ScheduleError) -> ApiError {
    let (status, error, fields) = match err {
        ScheduleError::Validation(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid submission".to_string(),
            errors.fields,
        ),
        ScheduleError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string(), Vec::new()),
        ScheduleError::DuplicateKey(_) | ScheduleError::FailedPrecondition(_) => {
            (StatusCode::CONFLICT, err.to_string(), Vec::new())
        }
        ScheduleError::DataIntegrity(_) | ScheduleError::Database(_) => {
            tracing::error!("request failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
                Vec::new(),
            )
        }
    };
    (status, Json(ErrorResponse { error, fields }))
}

/// Routes mounted under `/api`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/choices", get(choices::list_choices))
        .route(
            "/venues",
            get(venues::list_venues).post(venues::create_venue),
        )
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/{id}",
            get(venues::get_venue)
                .put(venues::update_venue)
                .delete(venues::delete_venue),
        )
        .route("/venues/{id}/edit", get(venues::edit_venue))
        .route(
            "/artists",
            get(artists::list_artists).post(artists::create_artist),
        )
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/{id}",
            get(artists::get_artist).put(artists::update_artist),
        )
        .route("/artists/{id}/edit", get(artists::edit_artist))
        .route("/shows", get(shows::list_shows).post(shows::create_show))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use fyyur_migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use tower_http::cors::CorsLayer;

    async fn test_app() -> Router {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let state = Arc::new(AppState { db });
        crate::app(state, CorsLayer::new())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn venue_body(name: &str, city: &str, state: &str) -> Value {
        json!({
            "name": name,
            "city": city,
            "state": state,
            "address": "1015 Folsom Street",
            "phone": "1231-123-1234",
            "image_link": "https://images.example.com/venue.jpg",
            "genres": ["Jazz", "Reggae"],
            "facebook_link": "https://www.facebook.com/venue",
            "website": "",
            "seeking_talent": true,
            "seeking_description": "Looking for local artists."
        })
    }

    fn artist_body(name: &str) -> Value {
        json!({
            "name": name,
            "city": "San Francisco",
            "state": "CA",
            "phone": "3261-234-5000",
            "genres": ["Rock_n_Roll"],
            "facebook_link": "https://www.facebook.com/artist"
        })
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_security_headers_are_set() {
        let app = test_app().await;
        let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(resp.headers()[header::X_FRAME_OPTIONS], "DENY");
    }

    #[tokio::test]
    async fn test_choices() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/choices", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["genres"].as_array().unwrap().len(), 19);
        assert_eq!(body["states"].as_array().unwrap().len(), 51);
    }

    #[tokio::test]
    async fn test_venue_lifecycle() {
        let app = test_app().await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/venues",
            Some(venue_body("The Musical Hop", "San Francisco", "CA")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["genres"], json!(["Jazz", "Reggae"]));
        assert!(created["website"].is_null());
        let id = created["id"].as_i64().unwrap();

        let (status, areas) = send(&app, Method::GET, "/api/venues", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(areas[0]["city"], "San Francisco");
        assert_eq!(areas[0]["venues"][0]["num_upcoming_shows"], 0);

        let (status, form) = send(&app, Method::GET, &format!("/api/venues/{id}/edit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(form["id"], id);
        assert_eq!(form["name"], "The Musical Hop");

        let mut edit = venue_body("The Musical Hop", "San Francisco", "CA");
        edit["phone"] = json!("4155-555-0000");
        let (status, updated) = send(&app, Method::PUT, &format!("/api/venues/{id}"), Some(edit)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["phone"], "4155-555-0000");

        let (status, _) = send(&app, Method::DELETE, &format!("/api/venues/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::GET, &format!("/api/venues/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_venue_reports_every_field() {
        let app = test_app().await;
        let mut body = venue_body("", "San Francisco", "ZZ");
        body["phone"] = json!("555-1234");
        let (status, resp) = send(&app, Method::POST, "/api/venues", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let fields: Vec<&str> = resp["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["name", "state", "phone"]);
    }

    #[tokio::test]
    async fn test_duplicate_venue_conflicts() {
        let app = test_app().await;
        let body = venue_body("The Musical Hop", "San Francisco", "CA");
        let (status, _) = send(&app, Method::POST, "/api/venues", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, resp) = send(&app, Method::POST, "/api/venues", Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(resp["error"].as_str().unwrap().starts_with("duplicate key"));
    }

    #[tokio::test]
    async fn test_search_venues_and_artists() {
        let app = test_app().await;
        for (name, city, state) in [
            ("The Musical Hop", "San Francisco", "CA"),
            ("The Dueling Pianos Bar", "New York", "NY"),
            ("Park Square Live Music & Coffee", "San Francisco", "CA"),
        ] {
            send(&app, Method::POST, "/api/venues", Some(venue_body(name, city, state))).await;
        }
        send(&app, Method::POST, "/api/artists", Some(artist_body("Guns N Petals"))).await;

        let (status, results) = send(
            &app,
            Method::POST,
            "/api/venues/search",
            Some(json!({"search_term": "  Music "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(results["count"], 2);

        let (_, results) = send(&app, Method::POST, "/api/venues/search", Some(json!({}))).await;
        assert_eq!(results["count"], 3);

        let (_, results) = send(
            &app,
            Method::POST,
            "/api/artists/search",
            Some(json!({"search_term": "petals"})),
        )
        .await;
        assert_eq!(results["count"], 1);
        assert_eq!(results["data"][0]["name"], "Guns N Petals");
    }

    #[tokio::test]
    async fn test_show_booking() {
        let app = test_app().await;
        let (_, venue) = send(
            &app,
            Method::POST,
            "/api/venues",
            Some(venue_body("The Musical Hop", "San Francisco", "CA")),
        )
        .await;
        let (status, artist) = send(&app, Method::POST, "/api/artists", Some(artist_body("Guns N Petals"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let venue_id = venue["id"].as_i64().unwrap();
        let artist_id = artist["id"].as_i64().unwrap();

        let show = json!({
            "venue_id": venue_id.to_string(),
            "artist_id": artist_id,
            "start_time": "2099-05-21 21:30:00"
        });
        let (status, created) = send(&app, Method::POST, "/api/shows", Some(show.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["start_time"], "2099-05-21T21:30:00.000Z");

        let (status, _) = send(&app, Method::POST, "/api/shows", Some(show)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, listing) = send(&app, Method::GET, "/api/shows", None).await;
        assert_eq!(listing.as_array().unwrap().len(), 1);
        assert_eq!(listing[0]["artist_name"], "Guns N Petals");

        let (_, detail) = send(&app, Method::GET, &format!("/api/artists/{artist_id}"), None).await;
        assert_eq!(detail["upcoming_shows_count"], 1);
        assert_eq!(detail["upcoming_shows"][0]["venue_name"], "The Musical Hop");

        // A venue with shows cannot be deleted.
        let (status, _) = send(&app, Method::DELETE, &format!("/api/venues/{venue_id}"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, _) = send(&app, Method::GET, &format!("/api/venues/{venue_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_show_with_unknown_artist() {
        let app = test_app().await;
        let (_, venue) = send(
            &app,
            Method::POST,
            "/api/venues",
            Some(venue_body("The Musical Hop", "San Francisco", "CA")),
        )
        .await;
        let show = json!({
            "venue_id": venue["id"],
            "artist_id": 404,
            "start_time": "2099-05-21T21:30:00Z"
        });
        let (status, resp) = send(&app, Method::POST, "/api/shows", Some(show)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(resp["fields"][0]["field"], "artist_id");
    }

    #[tokio::test]
    async fn test_artist_edit_and_list() {
        let app = test_app().await;
        let (_, artist) = send(&app, Method::POST, "/api/artists", Some(artist_body("Matt Quevedo"))).await;
        let id = artist["id"].as_i64().unwrap();

        let (status, form) = send(&app, Method::GET, &format!("/api/artists/{id}/edit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(form["genres"], json!(["Rock_n_Roll"]));

        let mut edit = artist_body("Matt Quevedo");
        edit["seeking_venue"] = json!(true);
        let (status, updated) = send(&app, Method::PUT, &format!("/api/artists/{id}"), Some(edit)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["seeking_venue"], true);

        let (_, list) = send(&app, Method::GET, "/api/artists", None).await;
        assert_eq!(list, json!([{"id": id, "name": "Matt Quevedo"}]));

        let (status, _) = send(&app, Method::GET, "/api/artists/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_response_statuses() {
        let (status, _) = error_response(ScheduleError::NotFound("venue 1".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = error_response(ScheduleError::FailedPrecondition("shows".into()));
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, Json(body)) = error_response(ScheduleError::DataIntegrity("show 1".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "internal server error");
    }
}

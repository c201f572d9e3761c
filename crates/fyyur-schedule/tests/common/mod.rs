// Shared fixtures for store integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use fyyur_migration::{Migrator, MigratorTrait};
use fyyur_schedule::{ArtistInput, Genre, ShowInput, State, VenueInput};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory SQLite database with the schema applied.
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// The instant tests treat as "now".
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
}

pub fn venue_input(name: &str, city: &str, state: State) -> VenueInput {
    VenueInput {
        name: name.into(),
        city: city.into(),
        state,
        address: "1015 Folsom Street".into(),
        phone: "1231-123-1234".into(),
        image_link: "https://images.example.com/venue.jpg".into(),
        genres: vec![Genre::Jazz, Genre::Reggae],
        facebook_link: "https://www.facebook.com/venue".into(),
        website: None,
        seeking_talent: true,
        seeking_description: Some("Looking for local artists.".into()),
    }
}

pub fn artist_input(name: &str) -> ArtistInput {
    ArtistInput {
        name: name.into(),
        city: "San Francisco".into(),
        state: State::CA,
        phone: "3261-234-5000".into(),
        image_link: Some("https://images.example.com/artist.jpg".into()),
        genres: vec![Genre::RockNRoll],
        facebook_link: "https://www.facebook.com/artist".into(),
        website: None,
        seeking_venue: false,
        seeking_description: None,
    }
}

pub fn show_input(venue_id: i32, artist_id: i32, start_time: DateTime<Utc>) -> ShowInput {
    ShowInput {
        venue_id,
        artist_id,
        start_time,
    }
}

//! Denormalized per-show display records.

use chrono::{DateTime, SecondsFormat, Utc};
use fyyur_db::entities::{artist, show, venue};
use serde::Serialize;
use std::collections::HashMap;

use crate::classify::Scheduled;
use crate::error::ScheduleError;

/// A show as seen from its venue's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show as seen from its artist's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueAppearance {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

/// A row of the show index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2019-05-21T21:30:00.000Z`.
pub fn iso_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn lookup<'a, T>(
    index: &'a HashMap<i32, T>,
    id: i32,
    show: &show::Model,
    kind: &str,
) -> Result<&'a T, ScheduleError> {
    index.get(&id).ok_or_else(|| {
        tracing::error!(show_id = show.id, missing_id = id, kind, "show references a missing record");
        ScheduleError::DataIntegrity(format!("show {} references missing {kind} {id}", show.id))
    })
}

pub fn summarize_for_venue(
    show: &show::Model,
    artists: &HashMap<i32, artist::Model>,
) -> Result<ArtistAppearance, ScheduleError> {
    let artist = lookup(artists, show.artist_id, show, "artist")?;
    Ok(ArtistAppearance {
        artist_id: artist.id,
        artist_name: artist.name.clone(),
        artist_image_link: artist.image_link.clone(),
        start_time: iso_timestamp(show.start_time()),
    })
}

pub fn summarize_for_artist(
    show: &show::Model,
    venues: &HashMap<i32, venue::Model>,
) -> Result<VenueAppearance, ScheduleError> {
    let venue = lookup(venues, show.venue_id, show, "venue")?;
    Ok(VenueAppearance {
        venue_id: venue.id,
        venue_name: venue.name.clone(),
        venue_image_link: venue.image_link.clone(),
        start_time: iso_timestamp(show.start_time()),
    })
}

pub fn show_listing(
    show: &show::Model,
    venues: &HashMap<i32, venue::Model>,
    artists: &HashMap<i32, artist::Model>,
) -> Result<ShowListing, ScheduleError> {
    let venue = lookup(venues, show.venue_id, show, "venue")?;
    let artist = lookup(artists, show.artist_id, show, "artist")?;
    Ok(ShowListing {
        venue_id: venue.id,
        venue_name: venue.name.clone(),
        artist_id: artist.id,
        artist_name: artist.name.clone(),
        artist_image_link: artist.image_link.clone(),
        start_time: iso_timestamp(show.start_time()),
    })
}

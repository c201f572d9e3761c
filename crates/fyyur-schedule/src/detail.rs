//! Venue and artist pages: the record plus its past and upcoming shows.

use chrono::{DateTime, Utc};
use fyyur_db::entities::{artist, show, venue};
use serde::Serialize;
use std::collections::HashMap;

use crate::choices::genre_labels;
use crate::classify::partition;
use crate::error::ScheduleError;
use crate::summary::{summarize_for_artist, summarize_for_venue, ArtistAppearance, VenueAppearance};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: String,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    /// `shows` are the venue's shows; `artists` must hold every artist they
    /// reference.
    pub fn build(
        venue: venue::Model,
        shows: &[show::Model],
        artists: &HashMap<i32, artist::Model>,
        now: DateTime<Utc>,
    ) -> Result<Self, ScheduleError> {
        let split = partition(shows, now);
        let past_shows = split
            .past
            .iter()
            .map(|s| summarize_for_venue(s, artists))
            .collect::<Result<Vec<_>, _>>()?;
        let upcoming_shows = split
            .upcoming
            .iter()
            .map(|s| summarize_for_venue(s, artists))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: venue.id,
            genres: genre_labels(&venue.genres),
            name: venue.name,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn build(
        artist: artist::Model,
        shows: &[show::Model],
        venues: &HashMap<i32, venue::Model>,
        now: DateTime<Utc>,
    ) -> Result<Self, ScheduleError> {
        let split = partition(shows, now);
        let past_shows = split
            .past
            .iter()
            .map(|s| summarize_for_artist(s, venues))
            .collect::<Result<Vec<_>, _>>()?;
        let upcoming_shows = split
            .upcoming
            .iter()
            .map(|s| summarize_for_artist(s, venues))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: artist.id,
            genres: genre_labels(&artist.genres),
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::tests::{make_show, reference_now};
    use crate::search::tests::make_venue;
    use crate::summary::tests::make_artist;
    use chrono::Duration;

    #[test]
    fn test_venue_detail_splits_shows() {
        let now = reference_now();
        let venue = make_venue(1, "The Musical Hop", "San Francisco", "CA");
        let shows = vec![
            make_show(1, 1, 4, now - Duration::days(10)),
            make_show(2, 1, 5, now + Duration::days(10)),
            make_show(3, 1, 4, now + Duration::days(20)),
            make_show(4, 1, 5, now),
        ];
        let artists = HashMap::from([(4, make_artist(4, "Guns N Petals")), (5, make_artist(5, "Matt Quevedo"))]);

        let detail = VenueDetail::build(venue, &shows, &artists, now).unwrap();
        assert_eq!(detail.genres, vec!["Jazz", "Folk"]);
        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 2);
        assert_eq!(detail.past_shows[0].artist_name, "Guns N Petals");
        assert_eq!(detail.upcoming_shows[0].artist_name, "Matt Quevedo");
        assert_eq!(detail.upcoming_shows[1].artist_name, "Guns N Petals");
    }

    #[test]
    fn test_venue_detail_without_shows() {
        let venue = make_venue(1, "The Dueling Pianos Bar", "New York", "NY");
        let detail = VenueDetail::build(venue, &[], &HashMap::new(), reference_now()).unwrap();
        assert!(detail.past_shows.is_empty());
        assert!(detail.upcoming_shows.is_empty());
        assert_eq!(detail.past_shows_count, 0);
        assert_eq!(detail.upcoming_shows_count, 0);
    }

    #[test]
    fn test_venue_detail_surfaces_dangling_artist() {
        let now = reference_now();
        let venue = make_venue(1, "The Musical Hop", "San Francisco", "CA");
        let shows = vec![make_show(1, 1, 99, now + Duration::days(1))];
        let err = VenueDetail::build(venue, &shows, &HashMap::new(), now).unwrap_err();
        assert!(matches!(err, ScheduleError::DataIntegrity(_)));
    }

    #[test]
    fn test_artist_detail_splits_shows() {
        let now = reference_now();
        let artist = make_artist(6, "The Wild Sax Band");
        let shows = vec![
            make_show(1, 3, 6, now + Duration::days(1)),
            make_show(2, 3, 6, now + Duration::days(8)),
        ];
        let venues = HashMap::from([(3, make_venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"))]);

        let detail = ArtistDetail::build(artist, &shows, &venues, now).unwrap();
        assert_eq!(detail.genres, vec!["Rock n Roll"]);
        assert_eq!(detail.past_shows_count, 0);
        assert_eq!(detail.upcoming_shows_count, 2);
        assert!(detail.upcoming_shows.iter().all(|s| s.venue_id == 3));
    }

    #[test]
    fn test_detail_serialization_has_counts() {
        let venue = make_venue(1, "The Musical Hop", "San Francisco", "CA");
        let detail = VenueDetail::build(venue, &[], &HashMap::new(), reference_now()).unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["past_shows_count"], 0);
        assert_eq!(json["upcoming_shows_count"], 0);
        assert!(json["website"].is_null());
    }
}

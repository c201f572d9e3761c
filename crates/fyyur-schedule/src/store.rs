//! Database access for venues, artists and shows.
//!
//! Reads go straight to the pool. Every write opens a transaction; returning
//! early with an error drops the transaction, which rolls it back.

use chrono::{DateTime, Utc};
use fyyur_db::entities::{artist, show, venue};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};

use crate::areas::{group_by_area, Area};
use crate::choices::join_genres;
use crate::classify::{counts_for, ShowCounts};
use crate::conflict::is_unique_show;
use crate::detail::{ArtistDetail, VenueDetail};
use crate::error::{ScheduleError, ValidationErrors};
use crate::forms::{ArtistInput, ShowInput, VenueInput};
use crate::search::{search_by_name, summarize_matches, SearchResults};
use crate::summary::{iso_timestamp, show_listing, ShowListing};

pub struct Store<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> Store<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    // ─── Reads ──────────────────────────────────────────────────────────

    pub async fn venues(&self) -> Result<Vec<venue::Model>, ScheduleError> {
        Ok(venue::Entity::find()
            .order_by_asc(venue::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn venue(&self, id: i32) -> Result<venue::Model, ScheduleError> {
        venue::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| ScheduleError::NotFound(format!("venue {id}")))
    }

    pub async fn artists(&self) -> Result<Vec<artist::Model>, ScheduleError> {
        Ok(artist::Entity::find()
            .order_by_asc(artist::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn artist(&self, id: i32) -> Result<artist::Model, ScheduleError> {
        artist::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| ScheduleError::NotFound(format!("artist {id}")))
    }

    /// All shows, by start time then id.
    pub async fn shows(&self) -> Result<Vec<show::Model>, ScheduleError> {
        Ok(show::Entity::find()
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn shows_for_venue(&self, venue_id: i32) -> Result<Vec<show::Model>, ScheduleError> {
        Ok(show::Entity::find()
            .filter(show::Column::VenueId.eq(venue_id))
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn shows_for_artist(&self, artist_id: i32) -> Result<Vec<show::Model>, ScheduleError> {
        Ok(show::Entity::find()
            .filter(show::Column::ArtistId.eq(artist_id))
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .all(self.db)
            .await?)
    }

    async fn venues_by_id(
        &self,
        ids: impl IntoIterator<Item = i32>,
    ) -> Result<HashMap<i32, venue::Model>, ScheduleError> {
        let ids: BTreeSet<i32> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let found = venue::Entity::find()
            .filter(venue::Column::Id.is_in(ids))
            .all(self.db)
            .await?;
        Ok(found.into_iter().map(|v| (v.id, v)).collect())
    }

    async fn artists_by_id(
        &self,
        ids: impl IntoIterator<Item = i32>,
    ) -> Result<HashMap<i32, artist::Model>, ScheduleError> {
        let ids: BTreeSet<i32> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let found = artist::Entity::find()
            .filter(artist::Column::Id.is_in(ids))
            .all(self.db)
            .await?;
        Ok(found.into_iter().map(|a| (a.id, a)).collect())
    }

    /// Venues whose name contains `term`, ignoring case, in id order.
    ///
    /// Matching runs in Rust over the full collection; SQL `LOWER` folds
    /// case differently from `str::to_lowercase` outside ASCII.
    pub async fn find_venues_by_name(&self, term: &str) -> Result<Vec<venue::Model>, ScheduleError> {
        let venues = self.venues().await?;
        Ok(search_by_name(&venues, term).into_iter().cloned().collect())
    }

    pub async fn find_artists_by_name(&self, term: &str) -> Result<Vec<artist::Model>, ScheduleError> {
        let artists = self.artists().await?;
        Ok(search_by_name(&artists, term).into_iter().cloned().collect())
    }

    // ─── Aggregates ─────────────────────────────────────────────────────

    pub async fn counts_for_venue(&self, id: i32, now: DateTime<Utc>) -> Result<ShowCounts, ScheduleError> {
        self.venue(id).await?;
        let shows = self.shows_for_venue(id).await?;
        Ok(counts_for(&shows, now))
    }

    pub async fn counts_for_artist(&self, id: i32, now: DateTime<Utc>) -> Result<ShowCounts, ScheduleError> {
        self.artist(id).await?;
        let shows = self.shows_for_artist(id).await?;
        Ok(counts_for(&shows, now))
    }

    pub async fn venue_detail(&self, id: i32, now: DateTime<Utc>) -> Result<VenueDetail, ScheduleError> {
        let venue = self.venue(id).await?;
        let shows = self.shows_for_venue(id).await?;
        let artists = self.artists_by_id(shows.iter().map(|s| s.artist_id)).await?;
        VenueDetail::build(venue, &shows, &artists, now)
    }

    pub async fn artist_detail(&self, id: i32, now: DateTime<Utc>) -> Result<ArtistDetail, ScheduleError> {
        let artist = self.artist(id).await?;
        let shows = self.shows_for_artist(id).await?;
        let venues = self.venues_by_id(shows.iter().map(|s| s.venue_id)).await?;
        ArtistDetail::build(artist, &shows, &venues, now)
    }

    pub async fn show_listings(&self) -> Result<Vec<ShowListing>, ScheduleError> {
        let shows = self.shows().await?;
        let venues = self.venues_by_id(shows.iter().map(|s| s.venue_id)).await?;
        let artists = self.artists_by_id(shows.iter().map(|s| s.artist_id)).await?;
        shows
            .iter()
            .map(|s| show_listing(s, &venues, &artists))
            .collect()
    }

    pub async fn venue_areas(&self, now: DateTime<Utc>) -> Result<Vec<Area>, ScheduleError> {
        let venues = self.venues().await?;
        let shows = self.shows().await?;
        Ok(group_by_area(&venues, &shows, now))
    }

    pub async fn search_venues(&self, term: &str, now: DateTime<Utc>) -> Result<SearchResults, ScheduleError> {
        let found = self.find_venues_by_name(term).await?;
        let shows = self.shows().await?;
        let matches: Vec<&venue::Model> = found.iter().collect();
        Ok(summarize_matches(&matches, &shows, now))
    }

    pub async fn search_artists(&self, term: &str, now: DateTime<Utc>) -> Result<SearchResults, ScheduleError> {
        let found = self.find_artists_by_name(term).await?;
        let shows = self.shows().await?;
        let matches: Vec<&artist::Model> = found.iter().collect();
        Ok(summarize_matches(&matches, &shows, now))
    }

    // ─── Writes ─────────────────────────────────────────────────────────

    pub async fn create_venue(&self, input: VenueInput) -> Result<venue::Model, ScheduleError> {
        let txn = self.db.begin().await?;
        let clash = venue::Entity::find()
            .filter(venue::Column::Name.eq(input.name.as_str()))
            .filter(venue::Column::City.eq(input.city.as_str()))
            .filter(venue::Column::State.eq(input.state.code()))
            .filter(venue::Column::Address.eq(input.address.as_str()))
            .one(&txn)
            .await?;
        let duplicate = || format!("venue '{}' already exists at {}, {}", input.name, input.address, input.city);
        if clash.is_some() {
            return Err(ScheduleError::DuplicateKey(duplicate()));
        }

        let created = venue::ActiveModel {
            id: NotSet,
            name: Set(input.name.clone()),
            city: Set(input.city.clone()),
            state: Set(input.state.code().to_string()),
            address: Set(input.address.clone()),
            phone: Set(input.phone.clone()),
            image_link: Set(input.image_link.clone()),
            facebook_link: Set(input.facebook_link.clone()),
            genres: Set(join_genres(&input.genres)),
            website: Set(input.website.clone()),
            seeking_talent: Set(input.seeking_talent),
            seeking_description: Set(input.seeking_description.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&txn)
        .await
        .map_err(|e| ScheduleError::from_write(e, duplicate))?;
        txn.commit().await?;

        tracing::info!(venue_id = created.id, name = %created.name, "venue created");
        Ok(created)
    }

    pub async fn update_venue(&self, id: i32, input: VenueInput) -> Result<venue::Model, ScheduleError> {
        let txn = self.db.begin().await?;
        let existing = venue::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ScheduleError::NotFound(format!("venue {id}")))?;
        let clash = venue::Entity::find()
            .filter(venue::Column::Id.ne(id))
            .filter(venue::Column::Name.eq(input.name.as_str()))
            .filter(venue::Column::City.eq(input.city.as_str()))
            .filter(venue::Column::State.eq(input.state.code()))
            .filter(venue::Column::Address.eq(input.address.as_str()))
            .one(&txn)
            .await?;
        let duplicate = || format!("venue '{}' already exists at {}, {}", input.name, input.address, input.city);
        if clash.is_some() {
            return Err(ScheduleError::DuplicateKey(duplicate()));
        }

        let mut active: venue::ActiveModel = existing.into();
        active.name = Set(input.name.clone());
        active.city = Set(input.city.clone());
        active.state = Set(input.state.code().to_string());
        active.address = Set(input.address.clone());
        active.phone = Set(input.phone.clone());
        active.image_link = Set(input.image_link.clone());
        active.facebook_link = Set(input.facebook_link.clone());
        active.genres = Set(join_genres(&input.genres));
        active.website = Set(input.website.clone());
        active.seeking_talent = Set(input.seeking_talent);
        active.seeking_description = Set(input.seeking_description.clone());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| ScheduleError::from_write(e, duplicate))?;
        txn.commit().await?;

        tracing::info!(venue_id = id, "venue updated");
        Ok(updated)
    }

    /// Delete a venue that has no shows.
    pub async fn delete_venue(&self, id: i32) -> Result<(), ScheduleError> {
        let txn = self.db.begin().await?;
        if venue::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(ScheduleError::NotFound(format!("venue {id}")));
        }
        let booked = show::Entity::find()
            .filter(show::Column::VenueId.eq(id))
            .count(&txn)
            .await?;
        if booked > 0 {
            tracing::warn!(venue_id = id, shows = booked, "refusing to delete venue with shows");
            return Err(ScheduleError::FailedPrecondition(format!(
                "venue {id} still has {booked} show(s)"
            )));
        }

        venue::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| ScheduleError::from_write(e, || format!("venue {id}")))?;
        txn.commit().await?;

        tracing::info!(venue_id = id, "venue deleted");
        Ok(())
    }

    pub async fn create_artist(&self, input: ArtistInput) -> Result<artist::Model, ScheduleError> {
        let txn = self.db.begin().await?;
        let clash = artist::Entity::find()
            .filter(artist::Column::Name.eq(input.name.as_str()))
            .one(&txn)
            .await?;
        if clash.is_some() {
            return Err(ScheduleError::DuplicateKey(format!(
                "artist '{}' already exists",
                input.name
            )));
        }

        let created = artist::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            city: Set(input.city),
            state: Set(input.state.code().to_string()),
            phone: Set(input.phone),
            genres: Set(join_genres(&input.genres)),
            image_link: Set(input.image_link),
            facebook_link: Set(input.facebook_link),
            website: Set(input.website),
            seeking_venue: Set(input.seeking_venue),
            seeking_description: Set(input.seeking_description),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        tracing::info!(artist_id = created.id, name = %created.name, "artist created");
        Ok(created)
    }

    /// Edits may rename an artist onto an existing name; only creation
    /// checks names.
    pub async fn update_artist(&self, id: i32, input: ArtistInput) -> Result<artist::Model, ScheduleError> {
        let txn = self.db.begin().await?;
        let existing = artist::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ScheduleError::NotFound(format!("artist {id}")))?;

        let mut active: artist::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.city = Set(input.city);
        active.state = Set(input.state.code().to_string());
        active.phone = Set(input.phone);
        active.genres = Set(join_genres(&input.genres));
        active.image_link = Set(input.image_link);
        active.facebook_link = Set(input.facebook_link);
        active.website = Set(input.website);
        active.seeking_venue = Set(input.seeking_venue);
        active.seeking_description = Set(input.seeking_description);

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(artist_id = id, "artist updated");
        Ok(updated)
    }

    /// Book a show. Unknown venue or artist ids are field errors, since
    /// they come from the submitted form.
    pub async fn create_show(&self, input: ShowInput) -> Result<show::Model, ScheduleError> {
        let ShowInput {
            venue_id,
            artist_id,
            start_time,
        } = input;
        let txn = self.db.begin().await?;

        let mut errors = ValidationErrors::default();
        if venue::Entity::find_by_id(venue_id).one(&txn).await?.is_none() {
            errors.push("venue_id", format!("No venue with id {venue_id}."));
        }
        if artist::Entity::find_by_id(artist_id).one(&txn).await?.is_none() {
            errors.push("artist_id", format!("No artist with id {artist_id}."));
        }
        if !errors.is_empty() {
            return Err(ScheduleError::Validation(errors));
        }

        let booked = show::Entity::find()
            .filter(show::Column::VenueId.eq(venue_id))
            .filter(show::Column::ArtistId.eq(artist_id))
            .all(&txn)
            .await?;
        let duplicate = || {
            format!(
                "artist {artist_id} is already booked at venue {venue_id} for {}",
                iso_timestamp(start_time)
            )
        };
        if !is_unique_show(venue_id, artist_id, start_time, &booked) {
            return Err(ScheduleError::DuplicateKey(duplicate()));
        }

        let created = show::ActiveModel {
            id: NotSet,
            venue_id: Set(venue_id),
            artist_id: Set(artist_id),
            start_time: Set(start_time.fixed_offset()),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&txn)
        .await
        .map_err(|e| ScheduleError::from_write(e, duplicate))?;
        txn.commit().await?;

        tracing::info!(show_id = created.id, venue_id, artist_id, "show created");
        Ok(created)
    }
}

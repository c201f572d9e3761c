//! Past/upcoming classification of shows relative to a reference instant.
//!
//! Nothing here is cached: callers pass the instant they consider "now" and
//! get a fresh answer every time.

use chrono::{DateTime, Utc};
use fyyur_db::entities::{artist, show, venue};
use serde::Serialize;
use std::collections::HashMap;

/// Anything with a start time.
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

impl Scheduled for show::Model {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time.with_timezone(&Utc)
    }
}

/// A venue or artist: something shows are booked against.
pub trait ShowOwner {
    fn id(&self) -> i32;
    fn name(&self) -> &str;
    /// The id of the owner of this kind that `show` belongs to.
    fn owner_of(show: &show::Model) -> i32;
}

impl ShowOwner for venue::Model {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn owner_of(show: &show::Model) -> i32 {
        show.venue_id
    }
}

impl ShowOwner for artist::Model {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn owner_of(show: &show::Model) -> i32 {
        show.artist_id
    }
}

/// Shows split around a reference instant. Both halves keep input order.
#[derive(Debug)]
pub struct Partition<'a, T> {
    pub past: Vec<&'a T>,
    pub upcoming: Vec<&'a T>,
}

impl<T> Partition<'_, T> {
    pub fn counts(&self) -> ShowCounts {
        ShowCounts {
            past: self.past.len(),
            upcoming: self.upcoming.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShowCounts {
    pub past: usize,
    pub upcoming: usize,
}

/// Split `shows` into those strictly before `now` and those strictly after.
///
/// A show starting exactly at `now` lands in neither half.
pub fn partition<'a, T, I>(shows: I, now: DateTime<Utc>) -> Partition<'a, T>
where
    T: Scheduled + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for show in shows {
        let start = show.start_time();
        if start < now {
            past.push(show);
        } else if start > now {
            upcoming.push(show);
        }
    }
    Partition { past, upcoming }
}

pub fn counts_for<'a, T, I>(shows: I, now: DateTime<Utc>) -> ShowCounts
where
    T: Scheduled + 'a,
    I: IntoIterator<Item = &'a T>,
{
    partition(shows, now).counts()
}

/// Group shows by their owner of kind `O`.
pub fn shows_by_owner<O: ShowOwner>(shows: &[show::Model]) -> HashMap<i32, Vec<&show::Model>> {
    let mut grouped: HashMap<i32, Vec<&show::Model>> = HashMap::new();
    for show in shows {
        grouped.entry(O::owner_of(show)).or_default().push(show);
    }
    grouped
}

/// Upcoming show count for one owner, given shows grouped by [`shows_by_owner`].
pub fn upcoming_for(
    grouped: &HashMap<i32, Vec<&show::Model>>,
    owner_id: i32,
    now: DateTime<Utc>,
) -> usize {
    grouped
        .get(&owner_id)
        .map(|shows| counts_for(shows.iter().copied(), now).upcoming)
        .unwrap_or(0)
}

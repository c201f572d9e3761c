//! Case-insensitive name search over venues and artists.

use chrono::{DateTime, Utc};
use fyyur_db::entities::show;
use serde::Serialize;

use crate::classify::{shows_by_owner, upcoming_for, ShowOwner};

/// A venue or artist with its upcoming show count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

/// Case-insensitive substring match. The empty term matches every name.
pub fn matches_name(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Entities whose name contains `term`, in collection order.
pub fn search_by_name<'a, T: ShowOwner>(collection: &'a [T], term: &str) -> Vec<&'a T> {
    collection
        .iter()
        .filter(|e| matches_name(e.name(), term))
        .collect()
}

/// Attach upcoming counts to search matches. `shows` may contain shows of
/// other entities; only those owned by a match are counted.
pub fn summarize_matches<T: ShowOwner>(
    matches: &[&T],
    shows: &[show::Model],
    now: DateTime<Utc>,
) -> SearchResults {
    let grouped = shows_by_owner::<T>(shows);
    let data: Vec<EntitySummary> = matches
        .iter()
        .map(|e| EntitySummary {
            id: e.id(),
            name: e.name().to_string(),
            num_upcoming_shows: upcoming_for(&grouped, e.id(), now),
        })
        .collect();

    SearchResults {
        count: data.len(),
        data,
    }
}

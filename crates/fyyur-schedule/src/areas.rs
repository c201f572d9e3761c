//! The venue index, grouped by city and state.

use chrono::{DateTime, Utc};
use fyyur_db::entities::{show, venue};
use serde::Serialize;

use crate::classify::{shows_by_owner, upcoming_for};
use crate::search::EntitySummary;

/// Venues sharing a city and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

/// Group venues by (city, state). Areas appear in the order their first
/// venue does; venues keep their order within an area.
pub fn group_by_area(
    venues: &[venue::Model],
    shows: &[show::Model],
    now: DateTime<Utc>,
) -> Vec<Area> {
    let grouped = shows_by_owner::<venue::Model>(shows);
    let mut areas: Vec<Area> = Vec::new();

    for v in venues {
        let summary = EntitySummary {
            id: v.id,
            name: v.name.clone(),
            num_upcoming_shows: upcoming_for(&grouped, v.id, now),
        };
        match areas
            .iter_mut()
            .find(|a| a.city == v.city && a.state == v.state)
        {
            Some(area) => area.venues.push(summary),
            None => areas.push(Area {
                city: v.city.clone(),
                state: v.state.clone(),
                venues: vec![summary],
            }),
        }
    }

    areas
}

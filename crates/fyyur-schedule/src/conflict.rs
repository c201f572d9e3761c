//! Duplicate-booking check for shows.

use chrono::{DateTime, Utc};
use fyyur_db::entities::show;

use crate::classify::Scheduled;

/// Whether a show for (`venue_id`, `artist_id`, `start_time`) may be booked
/// alongside `existing`.
///
/// Two shows clash only when venue, artist and start instant all match; the
/// same start time at another venue or with another artist is fine.
pub fn is_unique_show<'a, I>(
    venue_id: i32,
    artist_id: i32,
    start_time: DateTime<Utc>,
    existing: I,
) -> bool
where
    I: IntoIterator<Item = &'a show::Model>,
{
    !existing.into_iter().any(|s| {
        s.venue_id == venue_id && s.artist_id == artist_id && s.start_time() == start_time
    })
}

//! Show scheduling domain: classifying shows as past or upcoming, building
//! the display records for venues and artists, validating submitted forms,
//! and the store that reads and writes them.

pub mod areas;
pub mod choices;
pub mod classify;
pub mod conflict;
pub mod detail;
pub mod error;
pub mod forms;
pub mod search;
pub mod store;
pub mod summary;

pub use areas::{group_by_area, Area};
pub use choices::{Choice, Genre, State};
pub use classify::{counts_for, partition, Partition, Scheduled, ShowCounts, ShowOwner};
pub use conflict::is_unique_show;
pub use detail::{ArtistDetail, VenueDetail};
pub use error::{FieldError, ScheduleError, ValidationErrors};
pub use forms::{ArtistForm, ArtistInput, FormId, ShowForm, ShowInput, VenueForm, VenueInput};
pub use search::{search_by_name, EntitySummary, SearchResults};
pub use store::Store;
pub use summary::{ArtistAppearance, ShowListing, VenueAppearance};

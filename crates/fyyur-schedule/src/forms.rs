//! Submitted venue, artist and show forms and their validation.
//!
//! A form is decoded leniently (every field defaults) so that missing
//! fields are reported alongside the other field errors instead of failing
//! decoding. `validate` turns a form into a typed input or the full list of
//! field errors.

use chrono::{DateTime, NaiveDateTime, Utc};
use fyyur_db::entities::{artist, venue};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::choices::{split_genres, Genre, State};
use crate::error::ValidationErrors;

const PHONE_PATTERN: &str = r"^\d{4}-\d{3}-\d{4}$";
const PHONE_MESSAGE: &str = "Valid phone number format is xxxx-xxx-xxxx";
const REQUIRED: &str = "This field is required.";
const INVALID_URL: &str = "Invalid URL.";
const INVALID_STATE: &str = "Invalid state.";
const INVALID_GENRES: &str = "Invalid genres.";
const INVALID_INTEGER: &str = "Not a valid integer value.";
const INVALID_DATETIME: &str = "Not a valid datetime value.";

/// Naive layouts accepted for a show's start time, read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

// ─── Venue ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: State,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<Genre>,
    pub facebook_link: String,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn validate(self) -> Result<VenueInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = required(&mut errors, "name", &self.name);
        let city = required(&mut errors, "city", &self.city);
        let state = check_state(&mut errors, &self.state);
        let address = required(&mut errors, "address", &self.address);
        let phone = check_phone(&mut errors, &self.phone);
        let image_link = required_url(&mut errors, "image_link", &self.image_link);
        let genres = check_genres(&mut errors, &self.genres);
        let facebook_link = required_url(&mut errors, "facebook_link", &self.facebook_link);
        let website = optional_url(&mut errors, "website", self.website.as_deref());

        match (state, genres) {
            (Some(state), Some(genres)) if errors.is_empty() => Ok(VenueInput {
                name,
                city,
                state,
                address,
                phone,
                image_link,
                genres,
                facebook_link,
                website,
                seeking_talent: self.seeking_talent,
                seeking_description: optional_text(self.seeking_description.as_deref()),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&venue::Model> for VenueForm {
    fn from(v: &venue::Model) -> Self {
        Self {
            name: v.name.clone(),
            city: v.city.clone(),
            state: v.state.clone(),
            address: v.address.clone(),
            phone: v.phone.clone(),
            image_link: v.image_link.clone(),
            genres: genre_codes(&v.genres),
            facebook_link: v.facebook_link.clone(),
            website: v.website.clone(),
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description.clone(),
        }
    }
}

// ─── Artist ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: State,
    pub phone: String,
    pub image_link: Option<String>,
    pub genres: Vec<Genre>,
    pub facebook_link: String,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn validate(self) -> Result<ArtistInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = required(&mut errors, "name", &self.name);
        let city = required(&mut errors, "city", &self.city);
        let state = check_state(&mut errors, &self.state);
        let phone = check_phone(&mut errors, &self.phone);
        let image_link = optional_url(&mut errors, "image_link", self.image_link.as_deref());
        let genres = check_genres(&mut errors, &self.genres);
        let facebook_link = required_url(&mut errors, "facebook_link", &self.facebook_link);
        let website = optional_url(&mut errors, "website", self.website.as_deref());

        match (state, genres) {
            (Some(state), Some(genres)) if errors.is_empty() => Ok(ArtistInput {
                name,
                city,
                state,
                phone,
                image_link,
                genres,
                facebook_link,
                website,
                seeking_venue: self.seeking_venue,
                seeking_description: optional_text(self.seeking_description.as_deref()),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&artist::Model> for ArtistForm {
    fn from(a: &artist::Model) -> Self {
        Self {
            name: a.name.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            phone: a.phone.clone(),
            image_link: a.image_link.clone(),
            genres: genre_codes(&a.genres),
            facebook_link: a.facebook_link.clone(),
            website: a.website.clone(),
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description.clone(),
        }
    }
}

// ─── Show ───────────────────────────────────────────────────────────────

/// An id field as submitted: a JSON number or the text of a form input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FormId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShowForm {
    pub venue_id: Option<FormId>,
    pub artist_id: Option<FormId>,
    pub start_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowInput {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DateTime<Utc>,
}

impl ShowForm {
    pub fn validate(self) -> Result<ShowInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let venue_id = check_id(&mut errors, "venue_id", self.venue_id.as_ref());
        let artist_id = check_id(&mut errors, "artist_id", self.artist_id.as_ref());
        let start_time = match optional_text(self.start_time.as_deref()) {
            None => {
                errors.push("start_time", REQUIRED);
                None
            }
            Some(raw) => {
                let parsed = parse_start_time(&raw);
                if parsed.is_none() {
                    errors.push("start_time", INVALID_DATETIME);
                }
                parsed
            }
        };

        match (venue_id, artist_id, start_time) {
            (Some(venue_id), Some(artist_id), Some(start_time)) => Ok(ShowInput {
                venue_id,
                artist_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

/// RFC 3339, or a naive date-time taken as UTC.
pub fn parse_start_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

// ─── Field checks ───────────────────────────────────────────────────────

fn required(errors: &mut ValidationErrors, field: &'static str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, REQUIRED);
    }
    value.to_string()
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn check_phone(errors: &mut ValidationErrors, value: &str) -> String {
    let phone = required(errors, "phone", value);
    if !phone.is_empty() && !phone_is_valid(&phone) {
        errors.push("phone", PHONE_MESSAGE);
    }
    phone
}

fn phone_is_valid(phone: &str) -> bool {
    match Regex::new(PHONE_PATTERN) {
        Ok(re) => re.is_match(phone),
        Err(e) => {
            tracing::error!("invalid phone regex: {e}");
            false
        }
    }
}

/// Absolute http(s) URL with a host.
fn is_web_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false)
}

fn required_url(errors: &mut ValidationErrors, field: &'static str, value: &str) -> String {
    let value = required(errors, field, value);
    if !value.is_empty() && !is_web_url(&value) {
        errors.push(field, INVALID_URL);
    }
    value
}

fn optional_url(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
) -> Option<String> {
    let value = optional_text(value)?;
    if !is_web_url(&value) {
        errors.push(field, INVALID_URL);
    }
    Some(value)
}

fn check_state(errors: &mut ValidationErrors, value: &str) -> Option<State> {
    let code = value.trim();
    if code.is_empty() {
        errors.push("state", REQUIRED);
        return None;
    }
    let state = State::from_code(code);
    if state.is_none() {
        errors.push("state", INVALID_STATE);
    }
    state
}

fn check_genres(errors: &mut ValidationErrors, values: &[String]) -> Option<Vec<Genre>> {
    if values.iter().all(|v| v.trim().is_empty()) {
        errors.push("genres", REQUIRED);
        return None;
    }
    let mut genres: Vec<Genre> = Vec::with_capacity(values.len());
    for code in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        match Genre::from_code(code) {
            Some(g) if !genres.contains(&g) => genres.push(g),
            Some(_) => {}
            None => {
                errors.push("genres", INVALID_GENRES);
                return None;
            }
        }
    }
    Some(genres)
}

fn check_id(errors: &mut ValidationErrors, field: &'static str, value: Option<&FormId>) -> Option<i32> {
    let parsed = match value {
        None => {
            errors.push(field, REQUIRED);
            return None;
        }
        Some(FormId::Text(s)) if s.trim().is_empty() => {
            errors.push(field, REQUIRED);
            return None;
        }
        Some(FormId::Number(n)) => i32::try_from(*n).ok(),
        Some(FormId::Text(s)) => s.trim().parse::<i32>().ok(),
    };
    if parsed.is_none() {
        errors.push(field, INVALID_INTEGER);
    }
    parsed
}

fn genre_codes(column: &str) -> Vec<String> {
    split_genres(column)
        .into_iter()
        .map(|g| g.code().to_string())
        .collect()
}

//! Wire records exchanged with the terebi backend.
//!
//! Everything here is validated at the client boundary: a response that
//! does not deserialize into these shapes is a [`crate::ApiError::Parse`],
//! never untyped data handed to the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a search response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowSearchResult {
    pub id: i64,
    pub name: String,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
}

/// The show-details aggregate: show metadata plus all seasons/episodes.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowWithEpisodes {
    pub id: i64,
    pub name: String,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
    /// May contain markup; strip before display.
    pub summary: Option<String>,
    /// Display order is server order.
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<Season>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Season {
    pub season_number: u32,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// Episode ids are unique across a show, regardless of season.
#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub id: i64,
    pub season: u32,
    pub number: u32,
    pub name: String,
    /// May contain markup; strip before display.
    pub summary: Option<String>,
    /// Calendar date string, e.g. "2008-01-20".
    pub airdate: Option<String>,
}

/// A free-text comment scoped to a show or (when `episode_id` is set)
/// to a single episode. Created server-side; the client never edits text.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub show_id: i64,
    pub episode_id: Option<i64>,
    pub text: String,
    #[serde(with = "flexible_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Request body for comment creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment<'a> {
    pub text: &'a str,
}

/// One entry of the per-show watched list. Older servers send bare
/// `{episode_id}` rows, so the flag defaults to true.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchedMark {
    pub episode_id: i64,
    #[serde(default = "default_true")]
    pub watched: bool,
}

/// Response of a mark/unmark call. Extra fields (`status`, `success`)
/// are tolerated and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchedToggle {
    #[serde(default = "default_true")]
    pub watched: bool,
}

/// A generated text blurb for a show or episode. Not persisted;
/// regenerated on each explicit request.
#[derive(Debug, Clone, Deserialize)]
pub struct Insight {
    pub insight: String,
    pub source: String,
}

fn default_true() -> bool {
    true
}

/// Accepts both RFC 3339 timestamps and the naive `YYYY-MM-DDTHH:MM:SS`
/// form the backend emits, treating the latter as UTC.
mod flexible_datetime {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

use serde::{Deserialize, Serialize};

pub mod mood;

pub use mood::{GenreId, Mood};

/// Base URL for poster images at card size
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Local asset served when a title has no poster
pub const POSTER_PLACEHOLDER: &str = "assets/img/placeholder.png";

/// Whether a title is a movie or a TV series
///
/// Doubles as the path segment in TMDB detail URLs, so the wire
/// representation is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Parses the URL/path form ("movie" or "tv")
    pub fn parse(s: &str) -> Option<MediaKind> {
        match s {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Tv),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized title card ready for rendering
///
/// Carries everything a client needs to show the card and navigate to the
/// detail view: a non-empty id, a display title, a resolved poster URL and
/// the media kind for routing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayItem {
    pub id: u64,
    pub title: String,
    pub poster_url: String,
    pub media_kind: MediaKind,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw list entry as TMDB returns it
///
/// Movies carry `title`/`release_date`, TV series carry `name`/
/// `first_air_date`. Multi-search entries additionally carry `media_type`,
/// which may name a non-title record such as a person.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiListItem {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// One page of list results
#[derive(Debug, Clone, Deserialize)]
pub struct ApiListPage {
    #[serde(default)]
    pub results: Vec<ApiListItem>,
}

impl ApiListItem {
    /// Normalizes a raw entry into a display card
    ///
    /// `default_kind` supplies the media kind for endpoints whose payloads
    /// carry no `media_type` (discover, popular, trending, similar). Entries
    /// whose `media_type` is neither movie nor tv normalize to `None`.
    pub fn into_display(self, default_kind: MediaKind) -> Option<DisplayItem> {
        let media_kind = match self.media_type.as_deref() {
            Some("movie") => MediaKind::Movie,
            Some("tv") => MediaKind::Tv,
            Some(_) => return None,
            None => default_kind,
        };

        let title = self.title.or(self.name).unwrap_or_default();

        let poster_url = match self.poster_path {
            Some(path) => format!("{}{}", IMAGE_BASE_URL, path),
            None => POSTER_PLACEHOLDER.to_string(),
        };

        Some(DisplayItem {
            id: self.id,
            title,
            poster_url,
            media_kind,
        })
    }
}

/// Normalizes a page of raw entries, dropping non-title records
pub fn to_display_list(items: Vec<ApiListItem>, default_kind: MediaKind) -> Vec<DisplayItem> {
    items
        .into_iter()
        .filter_map(|item| item.into_display(default_kind))
        .collect()
}

/// A video attached to a title (trailers, teasers, clips)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiVideo {
    pub key: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiVideos {
    #[serde(default)]
    pub results: Vec<ApiVideo>,
}

/// Raw detail payload from `/{kind}/{id}?append_to_response=videos,similar`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTitleDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub videos: Option<ApiVideos>,
    #[serde(default)]
    pub similar: Option<ApiListPage>,
}

/// Normalized detail view for one title
///
/// A missing trailer is a normal state, not an error. Similar titles are
/// capped at five, matching what the detail page renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleDetails {
    pub id: u64,
    pub media_kind: MediaKind,
    pub title: String,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub overview: Option<String>,
    pub poster_url: String,
    pub trailer_url: Option<String>,
    pub similar: Vec<DisplayItem>,
}

/// Number of similar titles exposed on the detail view
pub const SIMILAR_LIMIT: usize = 5;

impl TitleDetails {
    /// Normalizes a raw detail payload
    ///
    /// The trailer is the first attached video whose type is "Trailer",
    /// exposed as a YouTube embed URL. Similar entries inherit `kind`,
    /// since TMDB's similar lists carry no `media_type`.
    pub fn from_api(details: ApiTitleDetails, kind: MediaKind) -> Self {
        let title = details.title.or(details.name).unwrap_or_default();
        let release_date = details.release_date.or(details.first_air_date);

        let poster_url = match details.poster_path {
            Some(path) => format!("{}{}", IMAGE_BASE_URL, path),
            None => POSTER_PLACEHOLDER.to_string(),
        };

        let trailer_url = details
            .videos
            .map(|videos| videos.results)
            .unwrap_or_default()
            .into_iter()
            .find(|video| video.video_type == "Trailer")
            .map(|video| format!("https://www.youtube.com/embed/{}", video.key));

        let similar = details
            .similar
            .map(|page| page.results)
            .unwrap_or_default()
            .into_iter()
            .take(SIMILAR_LIMIT)
            .filter_map(|item| item.into_display(kind))
            .collect();

        TitleDetails {
            id: details.id,
            media_kind: kind,
            title,
            release_date,
            vote_average: details.vote_average,
            overview: details.overview,
            poster_url,
            trailer_url,
            similar,
        }
    }
}

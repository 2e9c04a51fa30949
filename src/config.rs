//! Operator settings and per-caller preferences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Default Giphy API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.giphy.com/v1";

/// Default number of GIFs fetched per search.
pub const DEFAULT_GIF_LIMIT: u32 = 6;

/// Default result language.
pub const DEFAULT_GIF_LANG: &str = "en";

/// Content rating filter understood by Giphy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[default]
    #[serde(rename = "g")]
    G,
    #[serde(rename = "pg")]
    Pg,
    #[serde(rename = "pg-13")]
    Pg13,
    #[serde(rename = "r")]
    R,
}

impl Rating {
    /// Returns the wire value sent to Giphy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::G => "g",
            Rating::Pg => "pg",
            Rating::Pg13 => "pg-13",
            Rating::R => "r",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `g`, `pg`, `pg-13`, `r`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid content rating '{0}' (expected one of: g, pg, pg-13, r)")]
pub struct InvalidRating(pub String);

impl FromStr for Rating {
    type Err = InvalidRating;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "g" => Ok(Rating::G),
            "pg" => Ok(Rating::Pg),
            "pg-13" => Ok(Rating::Pg13),
            "r" => Ok(Rating::R),
            other => Err(InvalidRating(other.to_string())),
        }
    }
}

/// Operator-level configuration.
///
/// Set once before the tool is used. The search path only ever reads it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valves {
    /// API key for Giphy. Empty means unconfigured.
    #[serde(rename = "GIPHY_API_KEY", default)]
    giphy_api_key: String,
    /// Base URL for the Giphy API.
    #[serde(rename = "API_BASE_URL", default = "default_api_base_url")]
    api_base_url: String,
    /// Number of GIFs to retrieve per search.
    #[serde(
        rename = "GIF_LIMIT",
        default = "default_gif_limit",
        deserialize_with = "deserialize_gif_limit"
    )]
    gif_limit: u32,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_gif_limit() -> u32 {
    DEFAULT_GIF_LIMIT
}

fn deserialize_gif_limit<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let limit = u32::deserialize(deserializer)?;
    Ok(normalize_limit(limit))
}

fn normalize_limit(limit: u32) -> u32 {
    if limit == 0 {
        DEFAULT_GIF_LIMIT
    } else {
        limit
    }
}

impl fmt::Debug for Valves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.has_api_key() { "<redacted>" } else { "" };
        f.debug_struct("Valves")
            .field("giphy_api_key", &key)
            .field("api_base_url", &self.api_base_url)
            .field("gif_limit", &self.gif_limit)
            .finish()
    }
}

impl Default for Valves {
    fn default() -> Self {
        Self {
            giphy_api_key: String::new(),
            api_base_url: default_api_base_url(),
            gif_limit: DEFAULT_GIF_LIMIT,
        }
    }
}

impl Valves {
    /// Creates settings with the given API key and default everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            giphy_api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    /// Sets the result limit. Zero falls back to the default.
    pub fn with_gif_limit(mut self, limit: u32) -> Self {
        self.gif_limit = normalize_limit(limit);
        self
    }

    pub fn api_key(&self) -> &str {
        &self.giphy_api_key
    }

    pub fn base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn gif_limit(&self) -> u32 {
        self.gif_limit
    }

    /// Whether an API key has been supplied.
    pub fn has_api_key(&self) -> bool {
        !self.giphy_api_key.is_empty()
    }
}

/// Caller preferences, rebuilt from the caller context on every search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserValves {
    /// Language(s) for search results, e.g. `en` or `en,fr`.
    #[serde(rename = "GIF_LANG")]
    pub gif_lang: String,
    /// Content rating for GIFs.
    #[serde(rename = "GIF_RATING")]
    pub gif_rating: Rating,
}

impl Default for UserValves {
    fn default() -> Self {
        Self {
            gif_lang: DEFAULT_GIF_LANG.to_string(),
            gif_rating: Rating::default(),
        }
    }
}

impl UserValves {
    /// Sets the language list.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.gif_lang = lang.into();
        self
    }

    /// Sets the content rating.
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.gif_rating = rating;
        self
    }

    /// Coerces untyped caller data into preferences.
    ///
    /// Reads the nested `valves` object. Each field is checked on its own and
    /// anything missing or malformed keeps its default, so this never fails.
    pub fn from_user(user: &Value) -> Self {
        let mut valves = Self::default();

        let Some(map) = user.get("valves").and_then(Value::as_object) else {
            return valves;
        };

        if let Some(raw) = map.get("GIF_LANG") {
            match raw.as_str() {
                Some(lang) if !lang.trim().is_empty() => valves.gif_lang = lang.to_string(),
                _ => debug!("Ignoring invalid GIF_LANG {}, using '{}'", raw, DEFAULT_GIF_LANG),
            }
        }

        if let Some(raw) = map.get("GIF_RATING") {
            match raw.as_str().map(str::parse::<Rating>) {
                Some(Ok(rating)) => valves.gif_rating = rating,
                _ => debug!("Ignoring invalid GIF_RATING {}, using 'g'", raw),
            }
        }

        valves
    }
}

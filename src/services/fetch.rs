//! OMDb metadata lookup: one blocking GET per add action, no retries, no
//! caching. Every failure maps to a [`FetchError`] the add flow can report
//! before falling back to manual entry.

use crate::config::ApiConfig;
use serde::Deserialize;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("metadata service has no match for '{0}'")]
    NoMatch(String),
    #[error("metadata request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unusable metadata for '{title}': {reason}")]
    Payload { title: String, reason: String },
}

/// Attribute set an enriched add starts from; the user never types these.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieAttributes {
    pub rating: f64,
    pub year: i32,
    pub poster_url: Option<String>,
    pub imdb_id: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbPayload {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
}

pub struct OmdbClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api: &ApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: api.base_url.clone(),
            api_key: api.api_key.clone(),
        })
    }

    pub fn fetch(&self, title: &str) -> Result<MovieAttributes, FetchError> {
        let payload: OmdbPayload = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()?
            .error_for_status()?
            .json()?;

        if !payload.response.eq_ignore_ascii_case("true") {
            log::debug!(
                "omdb miss for '{}': {}",
                title,
                payload.error.as_deref().unwrap_or("no reason given")
            );
            return Err(FetchError::NoMatch(title.to_string()));
        }

        let rating = parse_rating(payload.imdb_rating.as_deref()).ok_or_else(|| {
            FetchError::Payload {
                title: title.to_string(),
                reason: "missing or non-numeric rating".to_string(),
            }
        })?;
        let year =
            parse_year(payload.year.as_deref()).ok_or_else(|| FetchError::Payload {
                title: title.to_string(),
                reason: "missing or non-numeric year".to_string(),
            })?;

        Ok(MovieAttributes {
            rating,
            year,
            poster_url: real_value(payload.poster),
            imdb_id: real_value(payload.imdb_id),
            country: real_value(payload.country),
        })
    }
}

/// OMDb signals "no data" with the literal string "N/A".
fn real_value(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty() && v != "N/A")
}

fn parse_rating(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|r| r.parse::<f64>().ok())
}

/// Takes the leading run of digits: series come back as year ranges like
/// "2010-2015" and the first year is the release.
fn parse_year(raw: Option<&str>) -> Option<i32> {
    let digits: String = raw?.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() != 4 {
        return None;
    }
    digits.parse().ok()
}

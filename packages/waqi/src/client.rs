//! WAQI HTTP client.

use std::time::Duration;

use crate::feed::{self, WaqiFeed};
use crate::{WaqiError, retry};

/// Default WAQI API root.
pub const DEFAULT_BASE_URL: &str = "https://api.waqi.info";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the WAQI feed and search endpoints.
#[derive(Debug, Clone)]
pub struct WaqiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl WaqiClient {
    /// Creates a client for `base_url` authenticating with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`WaqiError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: &str) -> Result<Self, WaqiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Creates a client from `WAQI_TOKEN` and the optional `WAQI_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`WaqiError::MissingToken`] if `WAQI_TOKEN` is unset or
    /// empty.
    pub fn from_env() -> Result<Self, WaqiError> {
        let token = std::env::var("WAQI_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(WaqiError::MissingToken)?;
        let base_url =
            std::env::var("WAQI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self::new(&base_url, &token)
    }

    /// URL of the feed nearest to a coordinate.
    #[must_use]
    pub fn geo_feed_url(&self, lat: f64, lon: f64) -> String {
        format!("{}/feed/geo:{lat};{lon}/", self.base_url)
    }

    /// URL of a specific station's feed.
    #[must_use]
    pub fn station_feed_url(&self, uid: i64) -> String {
        format!("{}/feed/@{uid}/", self.base_url)
    }

    /// URL of the station search endpoint.
    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}/search/", self.base_url)
    }

    /// Fetches the live feed for a ward.
    ///
    /// With a usable `keyword` the station is looked up by name first; if
    /// the search comes back empty or with an API error the nearest station
    /// to `(lat, lon)` is used instead.
    ///
    /// # Errors
    ///
    /// Returns [`WaqiError`] if an HTTP request fails or the feed cannot be
    /// parsed.
    #[allow(clippy::future_not_send)]
    pub async fn fetch_feed(
        &self,
        lat: f64,
        lon: f64,
        keyword: Option<&str>,
    ) -> Result<WaqiFeed, WaqiError> {
        let station_url = match keyword.and_then(crate::keyword::search_keyword) {
            Some(locality) => self.search_station_url(&locality).await?,
            None => None,
        };

        let feed_url = station_url.unwrap_or_else(|| self.geo_feed_url(lat, lon));

        log::debug!("Fetching WAQI feed {feed_url}");
        let body = retry::send_json(|| {
            self.client
                .get(&feed_url)
                .query(&[("token", self.token.as_str())])
        })
        .await?;

        let feed = feed::parse_feed(&body);
        if let Err(e) = &feed {
            log::error!("WAQI feed error: {e}");
        }
        feed
    }

    /// Searches stations by locality and returns the feed URL of the best
    /// match, or `None` if nothing usable was found.
    #[allow(clippy::future_not_send)]
    async fn search_station_url(&self, locality: &str) -> Result<Option<String>, WaqiError> {
        let body = retry::send_json(|| {
            self.client
                .get(self.search_url())
                .query(&[("token", self.token.as_str()), ("keyword", locality)])
        })
        .await?;

        let stations = match feed::parse_search(&body) {
            Ok(stations) => stations,
            Err(WaqiError::Api { message }) => {
                log::warn!("WAQI search for {locality} failed: {message}");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(feed::pick_station(&stations).map(|best| {
            log::info!("Found station for {locality}: {}", best.station.name);
            self.station_feed_url(best.uid)
        }))
    }
}

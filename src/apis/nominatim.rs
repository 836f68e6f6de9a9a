use std::{
    cell::Cell,
    thread,
    time::{Duration, Instant},
};

use serde::Deserialize;
use tracing::{debug, error, info, warn};
use ureq::Agent;

use crate::{
    error::{Error, Result},
    settings::Settings,
    types::BoundingBox,
};

// https://nominatim.org/release-docs/latest/api/Search/

//------------------------------------------------------------------------------
// Functions
//------------------------------------------------------------------------------

/// Resolves free text place names to bounding boxes through Nominatim.
///
/// Requests made through one geocoder are spaced by at least the configured
/// interval, as the public instance's usage policy asks.
pub struct Geocoder {
    url: String,
    user_agent: String,
    min_interval: Duration,
    last_request: Cell<Option<Instant>>,
    agent: Agent,
}

impl Geocoder {
    pub fn new(settings: &Settings) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(settings.geocode_timeout()))
            .build();
        Geocoder {
            url: settings.nominatim_url.clone(),
            user_agent: settings.user_agent.clone(),
            min_interval: settings.geocode_min_interval(),
            last_request: Cell::new(None),
            agent: config.into(),
        }
    }

    fn throttle(&self) {
        if let Some(last) = self.last_request.get() {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!("Waiting {:?} before the next geocoding request", wait);
                thread::sleep(wait);
            }
        }
        self.last_request.set(Some(Instant::now()));
    }

    pub fn lookup(&self, name: &str) -> Result<BoundingBox> {
        info!("Looking up bounding box for country: {}", name);
        self.throttle();

        let mut response = self
            .agent
            .get(&self.url)
            .header("User-Agent", self.user_agent.as_str())
            .query("q", name)
            .query("format", "json")
            .query("limit", "1")
            .query("addressdetails", "1")
            .query("extratags", "1")
            .query("namedetails", "1")
            .call()?;
        let body = response.body_mut().read_to_string()?;
        let results: Vec<SearchResult> = serde_json::from_str(&body)?;

        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| Error::Geocode(format!("No results found for country: {}", name)))?;

        if let Some(address) = &result.address {
            if !address.contains_key("country") {
                warn!("Result for '{}' doesn't appear to be a country", name);
            }
        }

        let bbox = result.bounding_box()?;
        info!(
            "Found bounding box for {}",
            result.display_name.as_deref().unwrap_or(name)
        );
        info!("Bounding box: {}", bbox);
        Ok(bbox)
    }

    /// [`Geocoder::lookup`] with failures logged and turned into `None`.
    pub fn resolve(&self, name: &str) -> Option<BoundingBox> {
        match self.lookup(name) {
            Ok(bbox) => Some(bbox),
            Err(e) => {
                error!("Error fetching country data: {}", e);
                None
            }
        }
    }
}

//------------------------------------------------------------------------------
// Types
//------------------------------------------------------------------------------

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    pub display_name: Option<String>,
    /// `[south, north, west, east]`, as strings.
    pub boundingbox: Option<Vec<String>>,
    pub address: Option<serde_json::Map<String, serde_json::Value>>,
}

impl SearchResult {
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        let raw = self.boundingbox.as_ref().ok_or_else(|| {
            Error::Geocode(format!(
                "No bounding box found for: {}",
                self.display_name.as_deref().unwrap_or("unknown place")
            ))
        })?;
        let values = raw
            .iter()
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|e| Error::Geocode(format!("bad bounding box value '{}': {}", v, e)))
            })
            .collect::<Result<Vec<f64>>>()?;
        match values.as_slice() {
            &[south, north, west, east] => BoundingBox::new(south, west, north, east),
            _ => Err(Error::Geocode(format!(
                "expected 4 bounding box values, got {}",
                values.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorders_nominatim_box() {
        let data = r#"[{
            "place_id": 1,
            "display_name": "Nederland",
            "boundingbox": ["50.7503838", "53.7253321", "1.9193492", "7.2274985"],
            "address": { "country": "Nederland", "country_code": "nl" }
        }]"#;
        let results: Vec<SearchResult> = serde_json::from_str(data).unwrap();
        let bbox = results[0].bounding_box().unwrap();
        assert_eq!(bbox.south, 50.7503838);
        assert_eq!(bbox.north, 53.7253321);
        assert_eq!(bbox.west, 1.9193492);
        assert_eq!(bbox.east, 7.2274985);
    }

    #[test]
    fn missing_or_short_box_fails() {
        let missing = SearchResult { display_name: Some("Atlantis".into()), ..Default::default() };
        assert!(matches!(missing.bounding_box(), Err(Error::Geocode(_))));

        let short = SearchResult { boundingbox: Some(vec!["1".into(), "2".into()]), ..Default::default() };
        assert!(matches!(short.bounding_box(), Err(Error::Geocode(_))));

        let garbage = SearchResult {
            boundingbox: Some(vec!["a".into(), "2".into(), "3".into(), "4".into()]),
            ..Default::default()
        };
        assert!(matches!(garbage.bounding_box(), Err(Error::Geocode(_))));
    }
}

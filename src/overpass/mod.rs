mod client;
mod query;

use std::time::Duration;

pub use client::parse_overpass_response;
pub use query::*;
use ureq::Agent;

use crate::settings::Settings;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass.kumi.systems/api/interpreter";

#[derive(Clone)]
pub struct OverpassClient {
    url: String,
    user_agent: String,
    retries: u32,
    retry_pause: Duration,
    agent: Agent,
}

impl OverpassClient {
    /// A client without a client side timeout. Overpass enforces its own through `[timeout:..]`.
    pub fn new(url: &str) -> Self {
        let settings = Settings {
            overpass_url: url.to_string(),
            ..Settings::default()
        };
        OverpassClient::from_settings(&settings)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let config = Agent::config_builder()
            .timeout_global(settings.overpass_timeout())
            .http_status_as_error(false)
            .build();
        let agent: Agent = config.into();
        OverpassClient {
            agent,
            url: settings.overpass_url.clone(),
            user_agent: settings.user_agent.clone(),
            retries: settings.overpass_retries,
            retry_pause: Duration::from_secs(5),
        }
    }

    pub fn with_retries(mut self, retries: u32, pause: Duration) -> Self {
        self.retries = retries;
        self.retry_pause = pause;
        self
    }
}

use tracing::{debug, error, info, warn};

use super::OverpassClient;
use crate::{
    error::{Error, Result},
    types::OverpassResponse,
};

impl OverpassClient {
    /// Runs `query` against the interpreter.
    ///
    /// A 429 is retried only as many times as the client was configured for.
    pub fn query(&self, query: &str) -> Result<OverpassResponse> {
        let mut attempts = 0;
        loop {
            debug!("POST {}", self.url);
            let mut response = self
                .agent
                .post(&self.url)
                .header("User-Agent", self.user_agent.as_str())
                .send(query)?;

            let status = response.status();
            if status == 200 {
                // Country sized answers easily exceed ureq's default body limit.
                let body = response
                    .body_mut()
                    .with_config()
                    .limit(u64::MAX)
                    .read_to_string()?;
                return parse_overpass_response(&body);
            } else if status == 429 && attempts < self.retries {
                attempts += 1;
                warn!(
                    "Rate limited, waiting {} seconds (retry {}/{})",
                    self.retry_pause.as_secs(),
                    attempts,
                    self.retries
                );
                std::thread::sleep(self.retry_pause);
            } else {
                return Err(Error::Overpass(format!("interpreter responded with status {}", status)));
            }
        }
    }

    /// Like [`OverpassClient::query`], but failures are logged and come back as
    /// an empty response. Callers cannot tell them apart from zero matches.
    pub fn fetch(&self, query: &str) -> OverpassResponse {
        info!("Fetching industrial land use data from OpenStreetMap...");
        match self.query(query) {
            Ok(response) => {
                info!(
                    "Found {} ways and {} relations",
                    response.ways().count(),
                    response.relations().count()
                );
                response
            }
            Err(e) => {
                error!("Error querying Overpass API: {}", e);
                OverpassResponse::default()
            }
        }
    }
}

pub fn parse_overpass_response(data: &str) -> Result<OverpassResponse> {
    let response: OverpassResponse = serde_json::from_str(data)?;
    if let Some(remark) = response.remark.as_deref() {
        if remark.contains("error") {
            return Err(Error::Overpass(remark.to_string()));
        }
        info!("Overpass remark: {}", remark);
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_remark_fails() {
        let data = r#"{ "elements": [], "remark": "runtime error: Query timed out in \"query\" at line 3 after 3001 seconds." }"#;
        match parse_overpass_response(data) {
            Err(Error::Overpass(msg)) => assert!(msg.contains("timed out")),
            other => panic!("expected an Overpass error, got {:?}", other),
        }
    }

    #[test]
    fn harmless_remark_is_kept() {
        let data = r#"{ "elements": [], "remark": "note: partial areas" }"#;
        let response = parse_overpass_response(data).unwrap();
        assert!(response.elements.is_empty());
    }

    #[test]
    fn malformed_json_fails() {
        assert!(matches!(parse_overpass_response("<html>"), Err(Error::Json(_))));
    }
}

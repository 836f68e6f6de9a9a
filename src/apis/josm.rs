use std::path::Path;

use tracing::{info, warn};
use ureq::Agent;

use crate::{settings::Settings, types::BoundingBox};

/// A request understood by JOSM's remote control plugin.
/// https://josm.openstreetmap.de/wiki/Help/RemoteControlCommands
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCommand {
    LoadAndZoom(BoundingBox),
    Import { url: String },
}

impl RemoteCommand {
    /// Zooms to `bbox` when one is known, otherwise imports the exported file.
    pub fn for_export(bbox: Option<&BoundingBox>, file: &Path) -> Self {
        match bbox {
            Some(bbox) => RemoteCommand::LoadAndZoom(*bbox),
            None => {
                let absolute = std::fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf());
                RemoteCommand::Import { url: format!("file://{}", absolute.display()) }
            }
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            RemoteCommand::LoadAndZoom(_) => "load_and_zoom",
            RemoteCommand::Import { .. } => "import",
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            RemoteCommand::LoadAndZoom(bbox) => vec![
                ("left", bbox.west.to_string()),
                ("bottom", bbox.south.to_string()),
                ("right", bbox.east.to_string()),
                ("top", bbox.north.to_string()),
            ],
            RemoteCommand::Import { url } => vec![("url", url.clone())],
        }
    }
}

pub struct JosmRemote {
    base_url: String,
    agent: Agent,
}

impl JosmRemote {
    pub fn new(settings: &Settings) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(settings.josm_timeout()))
            .http_status_as_error(false)
            .build();
        JosmRemote {
            base_url: settings.josm_url.trim_end_matches('/').to_string(),
            agent: config.into(),
        }
    }

    fn endpoint(&self, command: &RemoteCommand) -> String {
        format!("{}/{}", self.base_url, command.path())
    }

    /// The command as a readable URL. Parameters are not percent-encoded here,
    /// [`JosmRemote::open`] encodes them on the wire.
    pub fn url(&self, command: &RemoteCommand) -> String {
        let query = command
            .params()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.endpoint(command), query)
    }

    /// Sends `command` to a running JOSM. Only a 200 counts as success.
    pub fn open(&self, command: &RemoteCommand) -> bool {
        info!("JOSM Remote Control URL: {}", self.url(command));
        info!("Make sure JOSM is running with remote control enabled (Preferences → Remote Control)");

        let request = command
            .params()
            .into_iter()
            .fold(self.agent.get(self.endpoint(command)), |req, (k, v)| req.query(k, v));

        match request.call() {
            Ok(response) if response.status() == 200 => {
                info!("Successfully sent data to JOSM");
                true
            }
            Ok(response) => {
                warn!("JOSM responded with status {}", response.status());
                false
            }
            Err(e) => {
                warn!("Could not connect to JOSM remote control: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote() -> JosmRemote {
        JosmRemote::new(&Settings::default())
    }

    #[test]
    fn load_and_zoom_with_bbox() {
        let bbox = BoundingBox::new(52.0, 4.0, 52.1, 4.1).unwrap();
        let command = RemoteCommand::for_export(Some(&bbox), Path::new("out.geojson"));
        assert_eq!(command, RemoteCommand::LoadAndZoom(bbox));
        assert_eq!(
            remote().url(&command),
            "http://127.0.0.1:8111/load_and_zoom?left=4&bottom=52&right=4.1&top=52.1"
        );
    }

    #[test]
    fn import_file_without_bbox() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("areas.geojson");
        std::fs::write(&file, "{}").unwrap();

        let command = RemoteCommand::for_export(None, &file);
        let RemoteCommand::Import { url } = &command else {
            panic!("expected an import command");
        };
        assert!(url.starts_with("file:///"));
        assert!(url.ends_with("areas.geojson"));
        assert!(remote().url(&command).starts_with("http://127.0.0.1:8111/import?url=file:///"));
    }

    #[test]
    fn missing_file_keeps_given_path() {
        let command = RemoteCommand::for_export(None, Path::new("/nonexistent/x.geojson"));
        assert_eq!(command, RemoteCommand::Import { url: "file:///nonexistent/x.geojson".into() });
    }
}

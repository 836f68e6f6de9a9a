#![allow(dead_code)]

use std::net::TcpListener;

use tokio::runtime::{Builder, Runtime};
use wiremock::{Mock, MockServer, Request};

/// A wiremock server driven from blocking tests.
///
/// The server answers on its own thread, so the blocking `ureq` clients can
/// call it while the test thread waits. Expectations set with `Mock::expect`
/// are checked when the server is dropped.
pub struct Stub {
    server: MockServer,
    runtime: Runtime,
}

impl Stub {
    pub fn start() -> Self {
        let runtime = Builder::new_current_thread().enable_all().build().unwrap();
        let server = runtime.block_on(MockServer::start());
        Stub { server, runtime }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Mocks are matched in the order they were mounted.
    pub fn mount(&self, mock: Mock) -> &Self {
        self.runtime.block_on(mock.mount(&self.server));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }
}

/// A URL nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Degrees spanned by `meters` at latitude `lat` on WGS84, as `(dlon, dlat)`.
pub fn degrees_for(meters: f64, lat: f64) -> (f64, f64) {
    let phi = lat.to_radians();
    let a = 6_378_137.0_f64;
    let e2 = 0.006_694_379_990_14_f64;
    let w = (1.0 - e2 * phi.sin().powi(2)).sqrt();
    let m_per_rad_lat = a * (1.0 - e2) / w.powi(3);
    let m_per_rad_lon = a * phi.cos() / w;
    (
        (meters / m_per_rad_lon).to_degrees(),
        (meters / m_per_rad_lat).to_degrees(),
    )
}

/// An Overpass `out geom` way JSON for a square of roughly `side` meters.
pub fn square_way(id: i64, lon: f64, lat: f64, side: f64) -> String {
    let (dlon, dlat) = degrees_for(side, lat);
    let pts = [
        (lat, lon),
        (lat, lon + dlon),
        (lat + dlat, lon + dlon),
        (lat + dlat, lon),
        (lat, lon),
    ];
    let geometry = pts
        .iter()
        .map(|(la, lo)| format!(r#"{{ "lat": {}, "lon": {} }}"#, la, lo))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"{{ "type": "way", "id": {}, "nodes": [1, 2, 3, 4, 1], "tags": {{ "landuse": "industrial", "name": "Site {}" }}, "geometry": [{}] }}"#,
        id, id, geometry
    )
}

/// A complete interpreter answer around `elements`.
pub fn overpass_body(elements: &[String]) -> String {
    format!(
        r#"{{ "version": 0.6, "generator": "Overpass API 0.7.62",
             "osm3s": {{ "timestamp_osm_base": "2024-05-01T12:00:00Z" }},
             "elements": [{}] }}"#,
        elements.join(", ")
    )
}

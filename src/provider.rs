#![allow(missing_docs)]

use std::any::Any;
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result, anyhow};
use bytes::Bytes;
use fleet_core::{Config, HttpRequest};
use http::{Request, Response, StatusCode};
use serde_json::{Value, json};
use vessel_map::MapConfig;

use crate::config;

/// In-process vessel API. Serves a fixture file when one is configured,
/// otherwise a small built-in fleet that drifts a little on every request.
#[derive(Debug, Clone)]
pub struct AppContext {
    vessel_path: String,
    fixture: Option<Arc<Vec<u8>>>,
    requests: Arc<AtomicU64>,
}

impl AppContext {
    /// # Errors
    ///
    /// Returns an error when the configured fixture file cannot be read.
    pub fn new(map_config: &MapConfig) -> Result<Self> {
        let fixture = match config::get_vessel_fixture() {
            Some(path) => {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("reading vessel fixture `{path}`"))?;
                Some(Arc::new(bytes))
            }
            None => None,
        };

        Ok(Self {
            vessel_path: map_config.vessel_path.clone(),
            fixture,
            requests: Arc::new(AtomicU64::new(0)),
        })
    }

    fn fleet(&self) -> Result<Vec<u8>> {
        if let Some(fixture) = &self.fixture {
            return Ok(fixture.to_vec());
        }

        let tick = self.requests.fetch_add(1, Ordering::Relaxed);
        #[allow(clippy::cast_precision_loss)]
        let drift = tick as f64 * 0.002;

        let fleet = json!([
            vessel(1, "Aegean Star", "Fishing", Some((37.942 + drift, 23.646 + drift)), 18.5, 45.0),
            vessel(2, "Blue Horizon", "Passenger", None, 0.0, 0.0),
            vessel(3, "Kalypso", "Sailing", Some((36.393 - drift, 25.461)), 9.3, 210.0),
            vessel(4, "Poseidon II", "Fishing", Some((38.245, 21.734 + drift)), 0.0, 300.0),
        ]);
        serde_json::to_vec(&fleet).context("serializing built-in fleet")
    }
}

fn vessel(
    id: i64, name: &str, kind: &str, position: Option<(f64, f64)>, speed: f64, course: f64,
) -> Value {
    let devices = position.map_or_else(
        || json!([]),
        |(latitude, longitude)| {
            json!([{
                "telematicsData": {"position": {
                    "latitude": latitude,
                    "longitude": longitude,
                    "speed": speed,
                    "course": course,
                    "attributes": {"power": 12_400}
                }}
            }])
        },
    );
    json!({"id": id, "name": name, "vesselType": {"id": 1, "vesselType": kind}, "devices": devices})
}

impl HttpRequest for AppContext {
    async fn fetch<T>(&self, request: Request<T>) -> Result<Response<Bytes>>
    where
        T: http_body::Body + Any + Send,
        T::Data: Into<Vec<u8>>,
        T::Error: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        let path = request.uri().path();
        if path != self.vessel_path {
            return Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Bytes::new())
                .context("failed to build response");
        }

        let body = Bytes::from(self.fleet()?);
        Response::builder().status(StatusCode::OK).body(body).context("failed to build response")
    }
}

impl Config for AppContext {
    async fn get(&self, key: &str) -> Result<String> {
        match key {
            "VESSEL_API_URL" => Ok(config::get_vessel_api_url()),
            _ => Err(anyhow!("unknown config key: {key}")),
        }
    }
}

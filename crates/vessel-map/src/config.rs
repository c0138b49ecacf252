use std::env;
use std::time::Duration;

use crate::model::LatLng;

const DEFAULT_CENTER: LatLng = LatLng::new(37.983_81, 23.727_539);

/// Settings for the map view, read from the environment.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Container element the map is mounted in.
    pub container: String,
    pub tile_url: String,
    pub default_center: LatLng,
    pub default_zoom: u8,
    /// Path of the vessel list on the vessel API.
    pub vessel_path: String,
    /// Time between polls. Zero fetches once on mount.
    pub poll_interval: Duration,
    pub fetch_timeout: Duration,
}

impl MapConfig {
    pub fn from_env() -> Self {
        let container = env_string("MAP_CONTAINER", "mapid");
        let tile_url =
            env_string("MAP_TILE_URL", "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png");
        let default_center = LatLng::new(
            env_f64("MAP_CENTER_LAT", DEFAULT_CENTER.lat),
            env_f64("MAP_CENTER_LNG", DEFAULT_CENTER.lng),
        );
        let default_zoom = env::var("MAP_ZOOM")
            .ok()
            .and_then(|value| value.parse::<u8>().ok())
            .unwrap_or(7);
        let vessel_path = env_string("VESSEL_PATH", "/Appoploo2/vessels");
        let poll_interval = Duration::from_secs(env_u64("POLL_INTERVAL_SECS", 30));
        let fetch_timeout = Duration::from_secs(env_u64("FETCH_TIMEOUT_SECS", 10));

        Self {
            container,
            tile_url,
            default_center,
            default_zoom,
            vessel_path,
            poll_interval,
            fetch_timeout,
        }
    }

    /// Whether the view keeps polling after the initial fetch.
    pub fn polls(&self) -> bool {
        !self.poll_interval.is_zero()
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key).ok().and_then(|value| value.parse::<f64>().ok()).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key).ok().and_then(|value| value.parse::<u64>().ok()).unwrap_or(default)
}

use serde::{Deserialize, Serialize};

use crate::model::geo::LatLng;
use crate::telemetry;

/// Vessel identifier as issued by the vessel source.
pub type VesselId = i64;

/// A vessel record as returned by the vessel source on every poll.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    pub id: VesselId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vessel_type: VesselType,
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl Vessel {
    /// Name used for titles and popups. A nameless vessel renders as empty.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Latest telemetry position reported by the vessel's primary device.
    pub fn position(&self) -> Option<&TelemetryPosition> {
        telemetry::resolve(self)
    }

    /// Coordinates of the vessel, if it has a valid position.
    pub fn coordinates(&self) -> Option<LatLng> {
        self.position().and_then(TelemetryPosition::coordinates)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VesselType {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub vessel_type: String,
}

/// Tracking device fitted to a vessel. Only telemetry is of interest here.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default)]
    pub telematics_data: Option<TelematicsData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelematicsData {
    #[serde(default)]
    pub position: Option<TelemetryPosition>,
}

/// Raw position report. Every field may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPosition {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Speed over ground in km/h.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Heading in degrees.
    #[serde(default)]
    pub course: Option<f64>,
    #[serde(default)]
    pub attributes: Option<PositionAttributes>,
}

impl TelemetryPosition {
    /// Returns the coordinates when both latitude and longitude are present
    /// and finite.
    pub fn coordinates(&self) -> Option<LatLng> {
        let lat = self.latitude.filter(|value| value.is_finite())?;
        let lng = self.longitude.filter(|value| value.is_finite())?;
        Some(LatLng::new(lat, lng))
    }

    /// Supply power in millivolts.
    pub fn power(&self) -> Option<f64> {
        self.attributes.as_ref().and_then(|attributes| attributes.power)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionAttributes {
    #[serde(default)]
    pub power: Option<f64>,
}

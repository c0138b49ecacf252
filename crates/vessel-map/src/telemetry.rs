//! # Telemetry
//!
//! Resolves the latest position reading from a vessel's nested telemetry.
//! All telemetry access goes through [`resolve`] so that missing devices,
//! telemetry and positions are handled the same way everywhere.

use crate::model::{TelemetryPosition, Vessel};

/// Returns the position reported by the vessel's first device, or `None` when
/// the device, its telemetry or the position is missing.
pub fn resolve(vessel: &Vessel) -> Option<&TelemetryPosition> {
    vessel.devices.first()?.telematics_data.as_ref()?.position.as_ref()
}

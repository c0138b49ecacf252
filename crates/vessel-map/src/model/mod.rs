pub mod geo;
pub mod vessel;

pub use geo::{LatLng, LatLngBounds};
pub use vessel::{
    Device, PositionAttributes, TelematicsData, TelemetryPosition, Vessel, VesselId, VesselType,
};

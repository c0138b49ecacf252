//! # Vessel List Projector
//!
//! Turns vessel snapshots into display rows for the side list. Missing
//! telemetry is flattened to zero here; this is a display policy only.

use serde::Serialize;

use crate::model::{TelemetryPosition, Vessel, VesselId};
use crate::routes;

/// km/h to knots.
pub const KNOTS_PER_KMH: f64 = 0.539_957;

/// The vessel icon points north-east at zero rotation.
pub const ICON_HEADING_OFFSET: f64 = 45.0;

/// Action offered on a vessel row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RowAction {
    Select { href: String },
    Deselect { href: String },
}

/// Display record for one vessel in the side list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselRow {
    pub id: VesselId,
    pub name: String,
    pub vessel_type: String,
    pub speed_knots: f64,
    pub voltage: String,
    pub heading_degrees: f64,
    pub icon_rotation: f64,
    pub is_selected: bool,
    /// `None` when the vessel has no position to focus on.
    pub action: Option<RowAction>,
}

impl VesselRow {
    pub fn speed_label(&self) -> String {
        format!("{:.2} kts", self.speed_knots)
    }

    pub fn voltage_label(&self) -> String {
        format!("{} Volt", self.voltage)
    }
}

/// Project every vessel into a display row, in snapshot order.
pub fn project(vessels: &[Vessel], selected: Option<VesselId>) -> Vec<VesselRow> {
    vessels.iter().map(|vessel| project_one(vessel, selected)).collect()
}

fn project_one(vessel: &Vessel, selected: Option<VesselId>) -> VesselRow {
    let position = vessel.position();
    let is_selected = selected == Some(vessel.id);
    let heading_degrees = finite_or_zero(position.and_then(|position| position.course));

    let action = position.map(|_| {
        if is_selected {
            RowAction::Deselect { href: routes::clear_href() }
        } else {
            RowAction::Select { href: routes::select_href(vessel.id) }
        }
    });

    VesselRow {
        id: vessel.id,
        name: vessel.display_name().to_string(),
        vessel_type: vessel.vessel_type.vessel_type.clone(),
        speed_knots: speed_knots(position),
        voltage: voltage(position),
        heading_degrees,
        icon_rotation: heading_degrees - ICON_HEADING_OFFSET,
        is_selected,
        action,
    }
}

fn speed_knots(position: Option<&TelemetryPosition>) -> f64 {
    finite_or_zero(position.and_then(|position| position.speed).map(|kmh| kmh * KNOTS_PER_KMH))
}

fn voltage(position: Option<&TelemetryPosition>) -> String {
    let volts = finite_or_zero(position.and_then(TelemetryPosition::power).map(|mv| mv / 1000.0));
    format!("{volts:.2}")
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|value| value.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Device, PositionAttributes, TelematicsData, VesselType};

    fn vessel(id: VesselId, position: Option<TelemetryPosition>) -> Vessel {
        Vessel {
            id,
            name: Some(format!("Vessel {id}")),
            vessel_type: VesselType { id: 1, vessel_type: "Fishing".to_string() },
            devices: vec![Device { telematics_data: Some(TelematicsData { position }) }],
        }
    }

    fn reading(speed: f64, power: f64, course: f64) -> TelemetryPosition {
        TelemetryPosition {
            latitude: Some(37.9),
            longitude: Some(23.7),
            speed: Some(speed),
            course: Some(course),
            attributes: Some(PositionAttributes { power: Some(power) }),
        }
    }

    #[test]
    fn converts_speed_and_power() {
        let rows = project(&[vessel(1, Some(reading(10.0, 12_000.0, 90.0)))], None);
        let row = &rows[0];

        assert!((row.speed_knots - 5.399_57).abs() < 1e-9);
        assert_eq!(row.speed_label(), "5.40 kts");
        assert_eq!(row.voltage, "12.00");
        assert_eq!(row.voltage_label(), "12.00 Volt");
        assert!((row.heading_degrees - 90.0).abs() < f64::EPSILON);
        assert!((row.icon_rotation - 45.0).abs() < f64::EPSILON);
        assert_eq!(row.vessel_type, "Fishing");
    }

    #[test]
    fn missing_telemetry_projects_zeroes() {
        let rows = project(&[vessel(1, None), Vessel { id: 2, ..Vessel::default() }], None);

        for row in rows {
            assert!(row.speed_knots.abs() < f64::EPSILON);
            assert_eq!(row.voltage, "0.00");
            assert!(row.heading_degrees.abs() < f64::EPSILON);
            assert!((row.icon_rotation + 45.0).abs() < f64::EPSILON);
            assert_eq!(row.action, None);
        }
    }

    #[test]
    fn partial_reading_keeps_known_values() {
        let position = TelemetryPosition { speed: Some(20.0), ..TelemetryPosition::default() };
        let row = &project(&[vessel(1, Some(position))], None)[0];

        assert!((row.speed_knots - 10.799_14).abs() < 1e-9);
        assert_eq!(row.voltage, "0.00");
    }

    #[test]
    fn marks_selected_row() {
        let vessels = [
            vessel(1, Some(reading(1.0, 1.0, 0.0))),
            vessel(2, Some(reading(1.0, 1.0, 0.0))),
        ];
        let rows = project(&vessels, Some(2));

        assert!(!rows[0].is_selected);
        assert!(rows[1].is_selected);
        assert_eq!(rows[0].action, Some(RowAction::Select { href: "/map?selected=1".to_string() }));
        assert_eq!(rows[1].action, Some(RowAction::Deselect { href: "/map".to_string() }));
    }
}

//! # Marker Reconciler
//!
//! Keeps the map's marker layer in step with the latest vessel snapshot and
//! frames the viewport around every known position.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::model::{LatLng, LatLngBounds, Vessel, VesselId};
use crate::surface::{MapSurface, popup_html};

#[derive(Debug, Clone)]
struct Placed<M> {
    marker: M,
    position: LatLng,
    title: String,
    popup: String,
}

/// Outcome of a single reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub created: usize,
    pub moved: usize,
    pub removed: usize,
    /// Bounds the viewport was fitted to, if any vessel had a position.
    pub bounds: Option<LatLngBounds>,
}

/// Markers currently on the map, keyed by vessel id.
#[derive(Debug, Clone)]
pub struct MarkerReconciler<M> {
    markers: HashMap<VesselId, Placed<M>>,
}

impl<M> Default for MarkerReconciler<M> {
    fn default() -> Self {
        Self { markers: HashMap::new() }
    }
}

impl<M> MarkerReconciler<M>
where
    M: Copy + Eq + std::hash::Hash + std::fmt::Debug,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the marker layer in line with `vessels` and fit the viewport to
    /// their positions.
    ///
    /// Vessels without a valid position get no marker; markers of vessels
    /// that left the snapshot or lost their position are removed. The
    /// viewport is left alone when no vessel has a position.
    pub fn reconcile<S>(&mut self, vessels: &[Vessel], surface: &mut S) -> ReconcileReport
    where
        S: MapSurface<Marker = M>,
    {
        let mut report = ReconcileReport::default();
        let mut seen = HashSet::with_capacity(vessels.len());
        let mut positions = Vec::with_capacity(vessels.len());

        for (index, vessel) in vessels.iter().enumerate() {
            let Some(position) = vessel.coordinates() else {
                continue;
            };
            positions.push(position);

            if !seen.insert(vessel.id) {
                debug!(vessel_id = vessel.id, "duplicate vessel id in snapshot");
                continue;
            }

            let title = format!("{}_{index}", vessel.display_name());
            let popup = popup_html(vessel.display_name());

            if let Some(placed) = self.markers.get_mut(&vessel.id) {
                if placed.position != position {
                    surface.move_marker(placed.marker, position);
                    placed.position = position;
                    report.moved += 1;
                }
                // titles carry the list index, so a reorder retitles too
                if placed.title != title {
                    surface.set_title(placed.marker, &title);
                    placed.title = title;
                }
                if placed.popup != popup {
                    surface.bind_popup(placed.marker, &popup);
                    placed.popup = popup;
                }
                continue;
            }

            let marker = surface.add_marker(position, &title);
            surface.bind_popup(marker, &popup);
            self.markers.insert(vessel.id, Placed { marker, position, title, popup });
            report.created += 1;
        }

        self.markers.retain(|vessel_id, placed| {
            if seen.contains(vessel_id) {
                return true;
            }
            surface.remove_marker(placed.marker);
            report.removed += 1;
            false
        });

        report.bounds = LatLngBounds::from_positions(positions);
        if let Some(bounds) = report.bounds {
            surface.fit_bounds(bounds);
        }

        debug!(
            created = report.created,
            moved = report.moved,
            removed = report.removed,
            markers = self.markers.len(),
            fitted = report.bounds.is_some(),
            "reconciled markers"
        );

        report
    }

    /// Marker placed for a vessel, if it has one.
    pub fn marker_for(&self, vessel_id: VesselId) -> Option<M> {
        self.markers.get(&vessel_id).map(|placed| placed.marker)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Remove every marker from the map.
    pub fn clear<S>(&mut self, surface: &mut S)
    where
        S: MapSurface<Marker = M>,
    {
        for (_, placed) in self.markers.drain() {
            surface.remove_marker(placed.marker);
        }
    }
}

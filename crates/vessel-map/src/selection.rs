//! # Selection Tracker
//!
//! Focuses the map on the vessel named by the shareable `selected` query
//! parameter.

use tracing::debug;

use crate::marker::MarkerReconciler;
use crate::model::{LatLng, Vessel, VesselId};
use crate::surface::{MapSurface, ViewOptions, popup_html};

/// Why a selection had no visual effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMiss {
    /// The selection is not a vessel id.
    Unparseable,
    /// No vessel in the snapshot has the selected id.
    UnknownVessel,
    /// The selected vessel has no valid position.
    NoPosition,
    /// There is no map to focus.
    Unmounted,
}

/// Result of evaluating the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// The viewport was centered on the vessel.
    Focused { vessel_id: VesselId, position: LatLng, popup_opened: bool },
    /// The selection was removed.
    Cleared,
    /// Nothing to do.
    Unchanged,
    Missed(SelectionMiss),
}

/// Parse a selection value into a vessel id.
pub fn parse_selection(raw: &str) -> Option<VesselId> {
    raw.trim().parse().ok()
}

/// Center the map on the selected vessel and open its popup.
///
/// A selection that cannot be resolved to a positioned vessel leaves the map
/// untouched.
pub fn apply<S>(
    selection: &str, vessels: &[Vessel], markers: &MarkerReconciler<S::Marker>,
    surface: Option<&mut S>,
) -> SelectionOutcome
where
    S: MapSurface,
{
    let Some(surface) = surface else {
        return SelectionOutcome::Missed(SelectionMiss::Unmounted);
    };
    let Some(vessel_id) = parse_selection(selection) else {
        return SelectionOutcome::Missed(SelectionMiss::Unparseable);
    };
    let Some(vessel) = vessels.iter().find(|vessel| vessel.id == vessel_id) else {
        return SelectionOutcome::Missed(SelectionMiss::UnknownVessel);
    };
    let Some(position) = vessel.coordinates() else {
        return SelectionOutcome::Missed(SelectionMiss::NoPosition);
    };

    let zoom = surface.zoom();
    surface.set_view(position, zoom, ViewOptions { animate: true });

    let marker = markers.marker_for(vessel_id);
    if let Some(marker) = marker {
        surface.bind_popup(marker, &popup_html(vessel.display_name()));
        surface.open_popup(marker);
    }

    SelectionOutcome::Focused { vessel_id, position, popup_opened: marker.is_some() }
}

/// Tracks the last seen selection so the map is only refocused when it
/// changes, or when an earlier attempt could not be resolved yet.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    current: Option<String>,
    pending: bool,
}

impl SelectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a possibly changed selection.
    pub fn update<S>(
        &mut self, selection: Option<&str>, vessels: &[Vessel],
        markers: &MarkerReconciler<S::Marker>, surface: Option<&mut S>,
    ) -> SelectionOutcome
    where
        S: MapSurface,
    {
        if selection == self.current.as_deref() {
            return SelectionOutcome::Unchanged;
        }
        self.current = selection.map(ToOwned::to_owned);

        if self.current.is_none() {
            self.pending = false;
            debug!("selection cleared");
            return SelectionOutcome::Cleared;
        }

        self.focus(vessels, markers, surface)
    }

    /// Retry a selection that could not be resolved against an earlier
    /// snapshot.
    pub fn retry<S>(
        &mut self, vessels: &[Vessel], markers: &MarkerReconciler<S::Marker>,
        surface: Option<&mut S>,
    ) -> SelectionOutcome
    where
        S: MapSurface,
    {
        if !self.pending {
            return SelectionOutcome::Unchanged;
        }
        self.focus(vessels, markers, surface)
    }

    /// Mark the current selection as not yet shown, e.g. after the map was
    /// recreated.
    pub const fn invalidate(&mut self) {
        self.pending = self.current.is_some();
    }

    fn focus<S>(
        &mut self, vessels: &[Vessel], markers: &MarkerReconciler<S::Marker>,
        surface: Option<&mut S>,
    ) -> SelectionOutcome
    where
        S: MapSurface,
    {
        let Some(selection) = self.current.as_deref() else {
            return SelectionOutcome::Unchanged;
        };

        let outcome = apply(selection, vessels, markers, surface);
        match &outcome {
            SelectionOutcome::Focused { vessel_id, popup_opened, .. } => {
                debug!(vessel_id, popup_opened, "focused selected vessel");
                self.pending = false;
            }
            SelectionOutcome::Missed(miss) => {
                debug!(selection, ?miss, "selection had no effect");
                self.pending = *miss != SelectionMiss::Unparseable;
            }
            SelectionOutcome::Cleared | SelectionOutcome::Unchanged => {}
        }
        outcome
    }
}

//! # View Controller
//!
//! Owns the map session and the polling lifecycle, and composes marker
//! reconciliation, selection and list projection into a read-only view model.

use anyhow::Result;
use chrono::{DateTime, Utc};
use fleet_core::{Error, Provider, timeout};
use serde::Serialize;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::MapConfig;
use crate::marker::{MarkerReconciler, ReconcileReport};
use crate::model::{Vessel, VesselId};
use crate::projector::{self, VesselRow};
use crate::routes::{self, Location};
use crate::selection::{SelectionOutcome, SelectionTracker, parse_selection};
use crate::source;
use crate::surface::{MapBackend, MapSession, MapSurface};

type MarkerOf<B> = <<B as MapBackend>::Surface as MapSurface>::Marker;

/// Everything the render layer needs to draw the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub rows: Vec<VesselRow>,
    pub selected_id: Option<VesselId>,
}

/// Result of a vessel fetch, tagged with the map session it was started in.
#[derive(Debug)]
pub struct Fetched {
    generation: u64,
    result: fleet_core::Result<Vec<Vessel>>,
}

/// What happened to a fetch result.
#[derive(Debug, Clone, PartialEq)]
pub enum Accepted {
    /// The snapshot was replaced and the markers reconciled.
    Applied(ReconcileReport),
    /// The fetch failed; the previous snapshot is still shown.
    Retained(Error),
    /// The map the fetch was started for is gone.
    Discarded,
}

/// The live vessel map.
pub struct MapView<P, B, L>
where
    B: MapBackend,
{
    provider: P,
    backend: B,
    location: L,
    config: MapConfig,
    vessels: Vec<Vessel>,
    fetched_at: Option<DateTime<Utc>>,
    session: Option<MapSession<B::Surface>>,
    markers: MarkerReconciler<MarkerOf<B>>,
    selection: SelectionTracker,
    generation: u64,
}

impl<P, B, L> MapView<P, B, L>
where
    P: Provider,
    B: MapBackend,
    L: Location,
{
    pub fn new(provider: P, backend: B, location: L, config: MapConfig) -> Self {
        Self {
            provider,
            backend,
            location,
            config,
            vessels: Vec::new(),
            fetched_at: None,
            session: None,
            markers: MarkerReconciler::new(),
            selection: SelectionTracker::new(),
            generation: 0,
        }
    }

    /// Create the map at the default center and zoom. Mounting an already
    /// mounted view does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot create the map.
    pub fn mount(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Ok(());
        }

        self.generation += 1;
        let session = MapSession::open(
            &self.backend,
            &self.config.container,
            self.config.default_center,
            self.config.default_zoom,
            &self.config.tile_url,
            self.generation,
        )?;
        self.session = Some(session);

        if !self.vessels.is_empty()
            && let Some(session) = self.session.as_deref_mut()
        {
            self.markers.reconcile(&self.vessels, session);
        }

        self.selection.invalidate();
        self.sync_selection();
        Ok(())
    }

    /// Remove the markers and release the map. Fetches started before this
    /// call are discarded when they complete.
    pub fn unmount(&mut self) {
        if let Some(mut session) = self.session.take() {
            self.markers.clear(&mut *session);
        }
        self.generation += 1;
    }

    pub const fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    /// Fetch the vessel list. The returned future does not borrow the view,
    /// so the view may be unmounted while it is in flight.
    pub fn fetch_snapshot(&self) -> impl Future<Output = Fetched> + use<P, B, L> {
        let provider = self.provider.clone();
        let path = self.config.vessel_path.clone();
        let limit = self.config.fetch_timeout;
        let generation = self.generation;

        async move {
            let result = match time::timeout(limit, source::fetch_vessels(&provider, &path)).await
            {
                Ok(result) => result,
                Err(_) => Err(timeout!("no response from vessel API after {limit:?}")),
            };
            Fetched { generation, result }
        }
    }

    /// Apply a fetch result to the view.
    pub fn accept(&mut self, fetched: Fetched) -> Accepted {
        if fetched.generation != self.generation || self.session.is_none() {
            debug!(
                fetched = fetched.generation,
                current = self.generation,
                "discarding vessels fetched for a released map"
            );
            return Accepted::Discarded;
        }

        match fetched.result {
            Ok(vessels) => Accepted::Applied(self.apply_snapshot(vessels)),
            Err(err) => {
                warn!(
                    monotonic_counter.vessel_fetch_errors = 1,
                    error = %err,
                    code = %err.code(),
                    "vessel fetch failed, keeping previous snapshot"
                );
                Accepted::Retained(err)
            }
        }
    }

    /// Replace the snapshot list and bring the map in line with it.
    pub fn apply_snapshot(&mut self, vessels: Vec<Vessel>) -> ReconcileReport {
        self.vessels = vessels;
        self.fetched_at = Some(Utc::now());

        let Some(session) = self.session.as_deref_mut() else {
            return ReconcileReport::default();
        };
        let report = self.markers.reconcile(&self.vessels, session);
        self.selection.retry(&self.vessels, &self.markers, Some(session));

        info!(vessels = self.vessels.len(), markers = self.markers.len(), "vessel snapshot applied");
        report
    }

    /// Fetch once and apply the result.
    pub async fn poll(&mut self) -> Accepted {
        let fetched = self.fetch_snapshot().await;
        self.accept(fetched)
    }

    /// Mount the map, fetch the vessels and keep polling until `shutdown`
    /// resolves. The map is released on return.
    ///
    /// # Errors
    ///
    /// Returns an error when the map cannot be mounted.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.mount()?;
        tokio::pin!(shutdown);

        let mut ticker = self.config.polls().then(|| {
            let period = self.config.poll_interval;
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        loop {
            let fetch = self.fetch_snapshot();
            tokio::select! {
                () = &mut shutdown => break,
                fetched = fetch => {
                    self.accept(fetched);
                }
            }

            let Some(interval) = ticker.as_mut() else {
                shutdown.as_mut().await;
                break;
            };
            tokio::select! {
                () = &mut shutdown => break,
                _ = interval.tick() => {}
            }
        }

        self.unmount();
        info!("map view stopped");
        Ok(())
    }

    /// Navigate to the vessel's shareable link and focus it.
    pub fn on_select(&mut self, vessel_id: VesselId) -> SelectionOutcome {
        self.location.push(&routes::select_href(vessel_id));
        self.sync_selection()
    }

    /// Navigate to the plain map link, clearing the selection.
    pub fn on_deselect(&mut self) -> SelectionOutcome {
        self.location.push(&routes::clear_href());
        self.sync_selection()
    }

    /// Re-evaluate the selection after the location changed outside the view.
    pub fn location_changed(&mut self) -> SelectionOutcome {
        self.sync_selection()
    }

    fn sync_selection(&mut self) -> SelectionOutcome {
        let selection = self.location.selection();
        let outcome = self.selection.update(
            selection.as_deref(),
            &self.vessels,
            &self.markers,
            self.session.as_deref_mut(),
        );
        if outcome != SelectionOutcome::Unchanged {
            return outcome;
        }
        self.selection.retry(&self.vessels, &self.markers, self.session.as_deref_mut())
    }

    pub fn view_model(&self) -> ViewModel {
        let selected_id = self.selected_id();
        ViewModel { rows: projector::project(&self.vessels, selected_id), selected_id }
    }

    pub fn selected_id(&self) -> Option<VesselId> {
        self.location.selection().as_deref().and_then(parse_selection)
    }

    /// Current snapshot list.
    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    /// When the current snapshot was applied.
    pub const fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn surface(&self) -> Option<&B::Surface> {
        self.session.as_deref()
    }

    pub const fn markers(&self) -> &MarkerReconciler<MarkerOf<B>> {
        &self.markers
    }

    pub const fn location(&self) -> &L {
        &self.location
    }

    /// Location for host-driven navigation. Call [`Self::location_changed`]
    /// afterwards.
    pub const fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }
}

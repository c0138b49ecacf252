//! # Vessel Map
//!
//! Live vessel positions on a map: keeps map markers in step with the polled
//! vessel list, focuses the vessel selected through the shareable `selected`
//! link, and projects telemetry into display rows for the side list.

pub mod config;
pub mod marker;
pub mod model;
pub mod projector;
pub mod routes;
pub mod selection;
pub mod source;
pub mod surface;
pub mod telemetry;
pub mod view;

pub use self::config::MapConfig;
pub use self::marker::{MarkerReconciler, ReconcileReport};
pub use self::model::*;
pub use self::projector::{RowAction, VesselRow};
pub use self::routes::{Location, MemoryHistory};
pub use self::selection::{SelectionMiss, SelectionOutcome, SelectionTracker};
pub use self::source::fetch_vessels;
pub use self::surface::{MapBackend, MapSession, MapSurface, ViewOptions};
pub use self::view::{Accepted, Fetched, MapView, ViewModel};

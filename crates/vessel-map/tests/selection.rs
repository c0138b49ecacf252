#![allow(missing_docs)]


use pretty_assertions::assert_eq;
use vessel_map::{LatLng, Location, SelectionMiss, SelectionOutcome, Vessel, ViewOptions};

use self::provider::{MockProvider, fleet, view};

// Should center on the selected vessel and open its popup.
#[tokio::test]
async fn select_focuses_vessel() {
    let provider = MockProvider::new(&fleet());
    let (mut view, _) = view(&provider, "/map");
    view.mount().expect("should mount");
    view.poll().await;

    let outcome = view.on_select(3);

    assert_eq!(
        outcome,
        SelectionOutcome::Focused {
            vessel_id: 3,
            position: LatLng::new(35.3, 25.1),
            popup_opened: true
        }
    );
    assert_eq!(view.location().current(), "/map?selected=3");

    let surface = view.surface().expect("mounted");
    assert_eq!(surface.views, vec![(LatLng::new(35.3, 25.1), 7, ViewOptions { animate: true })]);
    assert_eq!(surface.open_popups(), vec!["<b>Kalypso</b>".to_string()]);

    let model = view.view_model();
    assert_eq!(model.selected_id, Some(3));
    let selected: Vec<_> =
        model.rows.iter().filter(|row| row.is_selected).map(|row| row.id).collect();
    assert_eq!(selected, vec![3]);
}

// Should leave the map alone for an id that is not in the snapshot.
#[tokio::test]
async fn unknown_vessel_is_ignored() {
    let provider = MockProvider::new(&fleet());
    let (mut view, _) = view(&provider, "/map");
    view.mount().expect("should mount");
    view.poll().await;

    let outcome = view.on_select(99);

    assert_eq!(outcome, SelectionOutcome::Missed(SelectionMiss::UnknownVessel));
    assert!(view.surface().expect("mounted").views.is_empty());
    assert!(view.view_model().rows.iter().all(|row| !row.is_selected));
}

// Should highlight, but not focus, a vessel without a position.
#[tokio::test]
async fn vessel_without_position() {
    let provider = MockProvider::new(&fleet());
    let (mut view, _) = view(&provider, "/map");
    view.mount().expect("should mount");
    view.poll().await;

    let outcome = view.on_select(2);

    assert_eq!(outcome, SelectionOutcome::Missed(SelectionMiss::NoPosition));
    let surface = view.surface().expect("mounted");
    assert!(surface.views.is_empty());
    assert!(surface.open_popups().is_empty());
    assert!(view.view_model().rows[1].is_selected);
}

// Should focus a vessel from a shared link once the first snapshot arrives,
// and not again on later polls.
#[tokio::test]
async fn shared_link_focuses_after_first_poll() {
    let provider = MockProvider::new(&fleet());
    let (mut view, _) = view(&provider, "/map?selected=1");

    view.mount().expect("should mount");
    assert!(view.surface().expect("mounted").views.is_empty());

    view.poll().await;
    view.poll().await;

    let surface = view.surface().expect("mounted");
    assert_eq!(surface.views, vec![(LatLng::new(37.9, 23.7), 7, ViewOptions { animate: true })]);
    assert_eq!(surface.open_popups(), vec!["<b>Aegean Star</b>".to_string()]);
}

// Should apply a selection made before the map existed once it is mounted.
#[test]
fn selection_waits_for_mount() {
    let provider = MockProvider::new(&fleet());
    let (mut view, _) = view(&provider, "/map");
    let vessels: Vec<Vessel> = serde_json::from_value(fleet()).expect("should deserialize");
    view.apply_snapshot(vessels);

    assert_eq!(view.on_select(1), SelectionOutcome::Missed(SelectionMiss::Unmounted));

    view.mount().expect("should mount");

    let surface = view.surface().expect("mounted");
    assert_eq!(surface.views.len(), 1);
    assert_eq!(surface.open_popups(), vec!["<b>Aegean Star</b>".to_string()]);
}

// Should ignore a selection that is not a vessel id.
#[tokio::test]
async fn unparseable_selection() {
    let provider = MockProvider::new(&fleet());
    let (mut view, _) = view(&provider, "/map?selected=abc");
    view.mount().expect("should mount");
    view.poll().await;

    assert_eq!(view.view_model().selected_id, None);
    assert!(view.surface().expect("mounted").views.is_empty());
}

// Should not refocus when the same vessel is selected again.
#[tokio::test]
async fn reselect_is_unchanged() {
    let provider = MockProvider::new(&fleet());
    let (mut view, _) = view(&provider, "/map");
    view.mount().expect("should mount");
    view.poll().await;

    view.on_select(1);
    assert_eq!(view.on_select(1), SelectionOutcome::Unchanged);
    assert_eq!(view.surface().expect("mounted").views.len(), 1);
}

// Should return to an unselected list without touching the snapshot.
#[tokio::test]
async fn select_then_deselect() {
    let provider = MockProvider::new(&fleet());
    let (mut view, _) = view(&provider, "/map");
    view.mount().expect("should mount");
    view.poll().await;
    let before = view.vessels().to_vec();

    view.on_select(1);
    assert_eq!(view.on_deselect(), SelectionOutcome::Cleared);

    assert_eq!(view.location().current(), "/map");
    assert_eq!(view.view_model().selected_id, None);
    assert!(view.view_model().rows.iter().all(|row| !row.is_selected));
    assert_eq!(view.vessels(), before.as_slice());
}

// Should follow back navigation to an earlier selection.
#[tokio::test]
async fn back_navigation() {
    let provider = MockProvider::new(&fleet());
    let (mut view, _) = view(&provider, "/map");
    view.mount().expect("should mount");
    view.poll().await;

    view.on_select(1);
    view.on_select(3);
    assert!(view.location_mut().back());

    let outcome = view.location_changed();

    assert!(matches!(outcome, SelectionOutcome::Focused { vessel_id: 1, .. }));
    let surface = view.surface().expect("mounted");
    assert_eq!(surface.views.last().map(|entry| entry.0), Some(LatLng::new(37.9, 23.7)));
    assert_eq!(surface.open_popups(), vec!["<b>Aegean Star</b>".to_string()]);
}

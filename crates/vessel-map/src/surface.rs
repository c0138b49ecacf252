//! # Map Surface
//!
//! Interfaces to the map widget. The widget itself (tiles, projection,
//! drawing) is provided by the host; this crate only drives it.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use anyhow::Result;

use crate::model::{LatLng, LatLngBounds};

/// Options for a viewport change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub animate: bool,
}

/// Creates map surfaces bound to a container element.
pub trait MapBackend {
    type Surface: MapSurface;

    /// Create a map in `container`, centered on `center` at `zoom`.
    ///
    /// # Errors
    ///
    /// Returns an error when the container does not exist or the widget
    /// cannot be initialized.
    fn create_map(&self, container: &str, center: LatLng, zoom: u8) -> Result<Self::Surface>;
}

/// A live map the view draws markers on and moves around.
pub trait MapSurface {
    /// Handle to a marker placed on the map.
    type Marker: Copy + Eq + Hash + Debug;

    fn add_tile_layer(&mut self, url: &str);

    fn create_feature_group(&mut self);

    fn add_marker(&mut self, position: LatLng, title: &str) -> Self::Marker;

    fn move_marker(&mut self, marker: Self::Marker, position: LatLng);

    fn set_title(&mut self, marker: Self::Marker, title: &str);

    fn remove_marker(&mut self, marker: Self::Marker);

    fn bind_popup(&mut self, marker: Self::Marker, html: &str);

    fn open_popup(&mut self, marker: Self::Marker);

    fn fit_bounds(&mut self, bounds: LatLngBounds);

    fn set_view(&mut self, center: LatLng, zoom: u8, options: ViewOptions);

    /// Current zoom level.
    fn zoom(&self) -> u8;

    /// Visit every marker on the map together with its title.
    fn each_marker(&self, visit: &mut dyn FnMut(Self::Marker, &str));

    /// Tear the map down and free the container.
    fn release(&mut self);
}

/// A mounted map surface. The surface is released when the session is
/// dropped.
#[derive(Debug)]
pub struct MapSession<S: MapSurface> {
    surface: S,
    generation: u64,
}

impl<S: MapSurface> MapSession<S> {
    /// Create a surface through `backend` and prepare its base layers.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot create the map.
    pub fn open<B>(
        backend: &B, container: &str, center: LatLng, zoom: u8, tile_url: &str, generation: u64,
    ) -> Result<Self>
    where
        B: MapBackend<Surface = S>,
    {
        let mut surface = backend.create_map(container, center, zoom)?;
        surface.add_tile_layer(tile_url);
        surface.create_feature_group();

        tracing::info!(container = %container, zoom, generation, "map mounted");
        Ok(Self { surface, generation })
    }
}

impl<S: MapSurface> Deref for MapSession<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.surface
    }
}

impl<S: MapSurface> DerefMut for MapSession<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<S: MapSurface> Drop for MapSession<S> {
    fn drop(&mut self) {
        self.surface.release();
        tracing::info!(generation = self.generation, "map released");
    }
}

/// Escape text for inclusion in popup markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Popup markup for a vessel.
pub fn popup_html(name: &str) -> String {
    format!("<b>{}</b>", escape_html(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_escapes_name() {
        assert_eq!(popup_html("Aegean Star"), "<b>Aegean Star</b>");
        assert_eq!(popup_html("<Salt & Pepper>"), "<b>&lt;Salt &amp; Pepper&gt;</b>");
    }
}

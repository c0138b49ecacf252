//! Map surface that draws nothing and logs every call instead.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, info};
use vessel_map::{LatLng, LatLngBounds, MapBackend, MapSurface, ViewOptions};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogBackend;

impl MapBackend for LogBackend {
    type Surface = LogSurface;

    fn create_map(&self, container: &str, center: LatLng, zoom: u8) -> Result<LogSurface> {
        info!(container = %container, lat = center.lat, lng = center.lng, zoom, "create map");
        Ok(LogSurface { next: 0, zoom, markers: HashMap::new() })
    }
}

#[derive(Debug)]
pub struct LogSurface {
    next: u32,
    zoom: u8,
    markers: HashMap<u32, String>,
}

impl LogSurface {
    fn title(&self, marker: u32) -> &str {
        self.markers.get(&marker).map_or("?", String::as_str)
    }
}

impl MapSurface for LogSurface {
    type Marker = u32;

    fn add_tile_layer(&mut self, url: &str) {
        debug!(url = %url, "add tile layer");
    }

    fn create_feature_group(&mut self) {
        debug!("create feature group");
    }

    fn add_marker(&mut self, position: LatLng, title: &str) -> u32 {
        self.next += 1;
        self.markers.insert(self.next, title.to_string());
        info!(marker = self.next, title = %title, lat = position.lat, lng = position.lng, "add marker");
        self.next
    }

    fn move_marker(&mut self, marker: u32, position: LatLng) {
        info!(
            marker,
            title = %self.title(marker),
            lat = position.lat,
            lng = position.lng,
            "move marker"
        );
    }

    fn set_title(&mut self, marker: u32, title: &str) {
        if let Some(previous) = self.markers.insert(marker, title.to_string()) {
            debug!(marker, from = %previous, to = %title, "retitle marker");
        }
    }

    fn remove_marker(&mut self, marker: u32) {
        if let Some(title) = self.markers.remove(&marker) {
            info!(marker, title = %title, "remove marker");
        }
    }

    fn bind_popup(&mut self, marker: u32, html: &str) {
        debug!(marker, html = %html, "bind popup");
    }

    fn open_popup(&mut self, marker: u32) {
        info!(marker, title = %self.title(marker), "open popup");
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        info!(
            south = bounds.south_west.lat,
            west = bounds.south_west.lng,
            north = bounds.north_east.lat,
            east = bounds.north_east.lng,
            "fit bounds"
        );
    }

    fn set_view(&mut self, center: LatLng, zoom: u8, options: ViewOptions) {
        self.zoom = zoom;
        info!(lat = center.lat, lng = center.lng, zoom, animate = options.animate, "set view");
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn each_marker(&self, visit: &mut dyn FnMut(u32, &str)) {
        for (marker, title) in &self.markers {
            visit(*marker, title);
        }
    }

    fn release(&mut self) {
        info!(markers = self.markers.len(), "release map");
        self.markers.clear();
    }
}

//! # Routes
//!
//! The selection is carried in the `selected` query parameter of the map
//! route so that a focused vessel can be shared as a link.

use urlencoding::decode;

pub const MAP_PATH: &str = "/map";
pub const SELECTED_PARAM: &str = "selected";

/// Link that focuses a vessel.
pub fn select_href(vessel_id: i64) -> String {
    format!("{MAP_PATH}?{SELECTED_PARAM}={vessel_id}")
}

/// Link that clears the selection.
pub fn clear_href() -> String {
    MAP_PATH.to_string()
}

/// Query part of an href, without the leading `?` and any fragment.
pub fn search(href: &str) -> &str {
    let href = href.split_once('#').map_or(href, |(before, _)| before);
    href.split_once('?').map_or("", |(_, query)| query)
}

/// Value of the `selected` parameter in a query string, percent-decoded.
/// An empty value counts as no selection.
pub fn selected(search: &str) -> Option<String> {
    search.trim_start_matches('?').split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key != SELECTED_PARAM {
            return None;
        }
        let value = value.replace('+', " ");
        let value = decode(&value).map_or(value.clone(), |decoded| decoded.into_owned());
        (!value.is_empty()).then_some(value)
    })
}

/// Browser location owning the selection. Implemented by the host router.
pub trait Location {
    /// Current href, e.g. `/map?selected=7`.
    fn current(&self) -> &str;

    /// Navigate to `href`, adding a history entry.
    fn push(&mut self, href: &str);

    /// Raw selection value in the current href.
    fn selection(&self) -> Option<String> {
        selected(search(self.current()))
    }
}

/// In-memory history stack.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self { entries: vec![href.into()], index: 0 }
    }

    /// Step back one entry. Returns false at the start of the history.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one entry. Returns false at the end of the history.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(MAP_PATH)
    }
}

impl Location for MemoryHistory {
    fn current(&self) -> &str {
        &self.entries[self.index]
    }

    fn push(&mut self, href: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(href.to_string());
        self.index = self.entries.len() - 1;
    }
}

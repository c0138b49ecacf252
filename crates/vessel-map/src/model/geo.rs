use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Rectangular region spanned by a set of coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Smallest bounds containing every position, or `None` for an empty set.
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut positions = positions.into_iter();
        let first = positions.next()?;
        let bounds = Self { south_west: first, north_east: first };
        Some(positions.fold(bounds, Self::extend))
    }

    #[must_use]
    pub fn extend(self, position: LatLng) -> Self {
        Self {
            south_west: LatLng::new(
                self.south_west.lat.min(position.lat),
                self.south_west.lng.min(position.lng),
            ),
            north_east: LatLng::new(
                self.north_east.lat.max(position.lat),
                self.north_east.lng.max(position.lng),
            ),
        }
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

//! View model for the pharmacy map.
//!
//! Holds everything a renderer needs (center point, user marker, pharmacy
//! markers, inline error) without knowing anything about tiles.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::messages;
use crate::models::{Coordinate, Pharmacy};

/// Ouagadougou city center, used until (or unless) the user is located.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(12.3714, -1.5197);

pub const DEFAULT_CITY: &str = "Ouagadougou";

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// Characters escaped when encoding a single URL component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Turn-by-turn directions link to `destination`.
#[must_use]
pub fn directions_url(destination: Coordinate) -> String {
    let destination = destination.to_string();
    let encoded = utf8_percent_encode(&destination, COMPONENT);
    format!("{DIRECTIONS_BASE}{encoded}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Stable key: the pharmacy id, else `"{name}-{latitude}"`.
    pub key: String,
    pub name: String,
    pub position: Coordinate,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub directions_url: String,
}

impl Marker {
    fn from_pharmacy(pharmacy: &Pharmacy, position: Coordinate) -> Self {
        let name = pharmacy.display_name().to_string();
        let key = pharmacy.identifier().map_or_else(
            || format!("{name}-{}", position.latitude),
            str::to_string,
        );
        Self {
            key,
            name,
            position,
            address: pharmacy.address.clone().filter(|a| !a.is_empty()),
            phone: pharmacy.phone.clone().filter(|p| !p.is_empty()),
            directions_url: directions_url(position),
        }
    }
}

/// Markers for every pharmacy that has both coordinates, in input order.
/// Pharmacies missing either coordinate are skipped.
#[must_use]
pub fn markers_for(pharmacies: &[Pharmacy]) -> Vec<Marker> {
    pharmacies
        .iter()
        .filter_map(|p| p.position().map(|pos| Marker::from_pharmacy(p, pos)))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub city: Option<String>,
    pub user_position: Option<Coordinate>,
    pub markers: Vec<Marker>,
    pub error: Option<String>,
    pub loading: bool,
}

impl MapView {
    /// A freshly mounted view: loading, no markers, centered on the fallback.
    #[must_use]
    pub fn new(city: Option<&str>) -> Self {
        Self {
            city: city.filter(|c| !c.is_empty()).map(str::to_string),
            user_position: None,
            markers: Vec::new(),
            error: None,
            loading: true,
        }
    }

    /// Detected position if any, else [`DEFAULT_CENTER`].
    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.user_position.unwrap_or(DEFAULT_CENTER)
    }

    pub fn set_user_position(&mut self, position: Option<Coordinate>) {
        self.user_position = position;
    }

    pub fn set_pharmacies(&mut self, pharmacies: &[Pharmacy]) {
        self.markers = markers_for(pharmacies);
        self.error = None;
        self.loading = false;
    }

    /// Load failure: the view keeps rendering, with the user marker only.
    pub fn set_load_error(&mut self) {
        self.markers.clear();
        self.error = Some(messages::PHARMACIES_LOAD_FAILED.to_string());
        self.loading = false;
    }

    /// Hint shown once loading is over and nothing could be placed.
    #[must_use]
    pub fn empty_hint(&self) -> Option<&'static str> {
        (!self.loading && self.markers.is_empty()).then_some(messages::NO_LOCATED_PHARMACY)
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// A city's location in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Great-circle distance between two points, in miles (haversine formula).
pub fn great_circle_miles(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * h.sqrt().asin()
}

/// Coordinate lookup keyed by city name, loaded once at startup.
#[derive(Clone, Debug, Default)]
pub struct CityAtlas {
    coordinates: HashMap<String, Coordinates>,
}

impl CityAtlas {
    pub fn new(coordinates: HashMap<String, Coordinates>) -> Self {
        CityAtlas { coordinates }
    }

    /// Look up a city's coordinates.
    ///
    /// Fails with [`SimError::UnknownCity`] when the city is not known; a
    /// missing city is a data-integrity problem and aborts the run rather
    /// than defaulting silently.
    pub fn lookup(&self, city: &str) -> Result<Coordinates, SimError> {
        self.coordinates
            .get(city)
            .copied()
            .ok_or_else(|| SimError::UnknownCity(city.to_string()))
    }

    pub fn insert(&mut self, city: String, coordinates: Coordinates) {
        self.coordinates.insert(city, coordinates);
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

//! Locations, coordinates, and the coordinate lookup table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A planar coordinate pair.
///
/// # Examples
///
/// ```
/// use courier_routing::models::Coordinates;
///
/// let a = Coordinates::new(0.0, 0.0);
/// let b = Coordinates::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared Euclidean distance, for comparisons that do not need the root.
    pub fn squared_distance_to(&self, other: &Coordinates) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A named point in the city: the depot, a delivery address, or an
/// intersection of the road graph.
///
/// # Examples
///
/// ```
/// use courier_routing::models::Location;
///
/// let depot = Location::new("Restaurant", 10.0, 20.0);
/// assert_eq!(depot.id(), "Restaurant");
/// assert_eq!(depot.coordinates().x, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: String,
    coordinates: Coordinates,
}

impl Location {
    /// Creates a location.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            coordinates: Coordinates::new(x, y),
        }
    }

    /// Location identifier (shared with road graph node ids).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position of this location.
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

/// Lookup from location identifier to coordinates.
///
/// Later entries for the same identifier replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTable {
    entries: HashMap<String, Coordinates>,
}

impl CoordinateTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from location records.
    pub fn from_locations(locations: &[Location]) -> Self {
        locations.iter().cloned().collect()
    }

    /// Inserts or replaces the coordinates of `id`.
    pub fn insert(&mut self, id: impl Into<String>, coordinates: Coordinates) {
        self.entries.insert(id.into(), coordinates);
    }

    /// Coordinates of `id`, if known.
    pub fn get(&self, id: &str) -> Option<Coordinates> {
        self.entries.get(id).copied()
    }

    /// Returns `true` if `id` has coordinates.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of known locations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Location> for CoordinateTable {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        let mut table = Self::new();
        for location in iter {
            table.insert(location.id, location.coordinates);
        }
        table
    }
}

use geo::Point;
use serde::{Deserialize, Serialize};

/// A retail store location. Reference data, never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A candidate warehouse site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub cost: f64,
    pub capacity: f64,
    pub connectivity: String,
    pub ownership: String,
}

impl Store {
    /// Position as a `geo` point (x = longitude, y = latitude).
    #[must_use]
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl Warehouse {
    #[must_use]
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<Store>,
}

#[derive(Debug, Deserialize)]
pub struct WarehousesFile {
    pub warehouses: Vec<Warehouse>,
}

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::models::{Store, StoresFile, Warehouse, WarehousesFile};
use crate::ConfigError;

/// Immutable store and warehouse tables, built once at startup and shared
/// read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct Catalog {
    stores: Vec<Store>,
    warehouses: Vec<Warehouse>,
}

impl Catalog {
    /// Builds a catalog from already-parsed records, validating both tables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on duplicate ids, blank cities,
    /// out-of-range coordinates, or negative/non-finite cost and capacity.
    pub fn new(stores: Vec<Store>, warehouses: Vec<Warehouse>) -> Result<Self, ConfigError> {
        validate_stores(&stores)?;
        validate_warehouses(&warehouses)?;
        Ok(Self { stores, warehouses })
    }

    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    #[must_use]
    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn stores_in_city<'a>(&'a self, city: &'a str) -> impl Iterator<Item = &'a Store> + 'a {
        self.stores.iter().filter(move |s| s.city == city)
    }

    pub fn warehouses_in_city<'a>(
        &'a self,
        city: &'a str,
    ) -> impl Iterator<Item = &'a Warehouse> + 'a {
        self.warehouses.iter().filter(move |w| w.city == city)
    }
}

/// Load and validate the store and warehouse tables from YAML files.
///
/// # Errors
///
/// Returns `ConfigError` if either file cannot be read, parsed, or fails validation.
pub fn load_catalog(stores_path: &Path, warehouses_path: &Path) -> Result<Catalog, ConfigError> {
    let stores: StoresFile = read_yaml(stores_path)?;
    let warehouses: WarehousesFile = read_yaml(warehouses_path)?;

    let catalog = Catalog::new(stores.stores, warehouses.warehouses)?;
    tracing::info!(
        stores = catalog.stores.len(),
        warehouses = catalog.warehouses.len(),
        "reference data loaded"
    );
    Ok(catalog)
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DataFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_yaml::from_str(&content).map_err(|e| ConfigError::DataFileParse {
        path: path.display().to_string(),
        source: e,
    })
}

fn validate_coordinates(
    kind: &str,
    id: i64,
    latitude: f64,
    longitude: f64,
) -> Result<(), ConfigError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ConfigError::Validation(format!(
            "{kind} {id} has latitude {latitude} outside [-90, 90]"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ConfigError::Validation(format!(
            "{kind} {id} has longitude {longitude} outside [-180, 180]"
        )));
    }
    Ok(())
}

fn validate_stores(stores: &[Store]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for store in stores {
        if !seen_ids.insert(store.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id: {}",
                store.id
            )));
        }
        if store.city.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store {} has an empty city",
                store.id
            )));
        }
        validate_coordinates("store", store.id, store.latitude, store.longitude)?;
    }

    Ok(())
}

fn validate_warehouses(warehouses: &[Warehouse]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for warehouse in warehouses {
        if !seen_ids.insert(warehouse.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate warehouse id: {}",
                warehouse.id
            )));
        }
        if warehouse.city.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "warehouse {} has an empty city",
                warehouse.id
            )));
        }
        validate_coordinates(
            "warehouse",
            warehouse.id,
            warehouse.latitude,
            warehouse.longitude,
        )?;
        if !(warehouse.cost.is_finite() && warehouse.cost >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "warehouse {} has invalid cost {}",
                warehouse.id, warehouse.cost
            )));
        }
        if !(warehouse.capacity.is_finite() && warehouse.capacity >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "warehouse {} has invalid capacity {}",
                warehouse.id, warehouse.capacity
            )));
        }
    }

    Ok(())
}

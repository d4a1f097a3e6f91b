pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod selector;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, Catalog};
pub use config::{load_app_config, load_app_config_from_env, load_cli_config};
pub use error::{ConfigError, SelectionError};
pub use models::{Store, StoresFile, Warehouse, WarehousesFile};
pub use selector::{select_warehouse, Criterion, Selection, WarehouseMetric};

use thiserror::Error;

/// Errors raised while building configuration or loading reference data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read data file {path}: {source}")]
    DataFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse data file {path}: {source}")]
    DataFileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Request-scoped failures of warehouse selection.
///
/// Each variant is a distinct, reportable kind; none fall back to a default
/// warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("at least one store must be selected")]
    EmptyStoreSelection,

    #[error("none of the selected store ids match a known store")]
    UnresolvedStores,

    #[error("no warehouses found in city '{city}'")]
    NoCandidates { city: String },

    #[error("invalid criterion '{0}'; expected one of cost, distance, both, capacity")]
    InvalidCriterion(String),
}

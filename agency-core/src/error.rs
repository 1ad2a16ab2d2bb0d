use thiserror::Error;

/// Errors raised by table operations that receive bad input from a caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("unknown filter dimension '{dimension}' for {entity}")]
    UnknownDimension { entity: String, dimension: String },
    #[error("page size must be greater than zero")]
    InvalidPageSize,
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("failed to parse fixture '{name}': {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("fixture '{name}' repeats record id '{id}'")]
    DuplicateId { name: &'static str, id: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Serialize error for {path:?}: {source}")]
    ConfigSerialize {
        path: PathBuf,
        source: toml::ser::Error,
    },

    #[error("Invalid value for metadata key {key}: {value:?}")]
    InvalidMetadataValue { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChronicleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Save schema mismatch: expected version {expected}, found {found}")]
    SchemaMismatch { expected: u32, found: u32 },

    #[error("Domain registry mismatch in save file: {0}")]
    DomainMismatch(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(String),
}

pub type Result<T> = std::result::Result<T, ChronicleError>;

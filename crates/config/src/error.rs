#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Poll interval must be at least one second")]
    ZeroInterval,

    #[error("Log size bound must be greater than zero")]
    ZeroLogBound,

    #[error("Failed to serialize TOML: {0}")]
    SerializeTOML(#[from] toml_edit::ser::Error),

    #[error("Failed to deserialize TOML: {0}")]
    DeserializeTOML(#[from] toml_edit::de::Error),

    #[error("Failed to parse TOML document: {0}")]
    ParseTOML(#[from] toml_edit::TomlError),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

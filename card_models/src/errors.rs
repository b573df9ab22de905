//! Error types for model definitions and configuration.

use thiserror::Error;

/// Errors raised while building or configuring note types.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A field name that the model does not declare.
    #[error("model `{model}` has no field named `{field}`")]
    UnknownField { model: String, field: String },

    /// A stock model name that is not registered.
    #[error("no note type named `{0}` is registered")]
    UnknownModel(String),

    #[error("invalid deck configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to encode deck configuration: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error("failed to read deck configuration: {0}")]
    Io(#[from] std::io::Error),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Template render error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Deployment error: {message}")]
    DeployError { message: String },
}

pub type Result<T> = std::result::Result<T, PluginError>;

use thiserror::Error;

/// Startup configuration failures. Fatal; never recovered at runtime.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("cannot parse config: {reason}")]
    Parse { reason: String },

    #[error("invalid config field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("missing credential for provider {provider}")]
    MissingCredential { provider: String },
}

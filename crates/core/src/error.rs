#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration missing: {0} is not set")]
    ConfigurationMissing(&'static str),
}

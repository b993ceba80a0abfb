use thiserror::Error;

/// Errors originating from viewer construction and configuration.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid viewer config: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Core(#[from] orbitview_core::CoreError),
}

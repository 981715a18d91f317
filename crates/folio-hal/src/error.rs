//! Host errors

use thiserror::Error;

/// Errors surfaced by a [`Host`](crate::Host) implementation.
///
/// None of these are fatal to the page. Callers degrade to a static
/// fallback and log.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HostError {
    /// A remote asset (shader, script, texture) could not be fetched
    #[error("asset failed to load: {0}")]
    AssetLoad(String),

    /// The rendering surface could not be created or configured
    #[error("surface unavailable: {0}")]
    Surface(String),

    /// The container element does not exist in the document
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// Client-local storage refused the operation
    #[error("storage unavailable: {0}")]
    Storage(String),

    /// The renderer failed to initialize or draw
    #[error("renderer error: {0}")]
    Renderer(String),

    /// Operation not supported on this platform
    #[error("operation not supported")]
    NotSupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HostError::AssetLoad("https://cdn.example/clouds.wgsl".to_string());
        assert_eq!(
            err.to_string(),
            "asset failed to load: https://cdn.example/clouds.wgsl"
        );
        assert_eq!(HostError::NotSupported.to_string(), "operation not supported");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            HostError::ContainerNotFound("backdrop".into()),
            HostError::ContainerNotFound("backdrop".into())
        );
        assert_ne!(
            HostError::Surface("lost".into()),
            HostError::Renderer("lost".into())
        );
    }
}

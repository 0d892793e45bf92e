use thiserror::Error;

pub type Result<T> = std::result::Result<T, InjectorError>;

#[derive(Debug, Error)]
pub enum InjectorError {
    #[error("expected application/json content-type")]
    UnsupportedContentType,

    #[error("error getting admission review from request: {0}")]
    InvalidAdmissionReview(#[source] serde_json::Error),

    #[error("did not receive pod, got {0}")]
    UnsupportedResource(String),

    #[error("error decoding raw pod: {0}")]
    PodDecoding(String),

    #[error("error encoding sidecar container: {0}")]
    ContainerSerialization(#[source] serde_json::Error),

    #[error("error building patch: {0}")]
    InvalidPatchPath(String),

    #[error("error encoding patch: {0}")]
    PatchSerialization(#[source] serde_json::Error),
}

impl InjectorError {
    /// Faults on the caller side. Everything else is an internal error: the
    /// caller promised a well formed payload and the injector could not handle it.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            InjectorError::UnsupportedContentType
                | InjectorError::InvalidAdmissionReview(_)
                | InjectorError::UnsupportedResource(_)
        )
    }
}

use thiserror::Error;

/// Errors that can occur while fetching a profile.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Profile decoding error: {0}")]
    Decode(String),
    #[error("No profile configured")]
    NotConfigured,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Errors raised while starting or stopping the application.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Failed to read profile fixture {path}: {source}")]
    Fixture {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Actor task failed: {0}")]
    ActorTask(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

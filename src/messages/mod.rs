use tokio::sync::oneshot;
use crate::domain::UserProfile;
use crate::error::FetchError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests understood by the `UserService` actor. Each variant that expects
/// an answer carries a oneshot channel for it.
#[derive(Debug)]
pub enum ProfileRequest {
    FetchProfile {
        respond_to: ServiceResponse<UserProfile, FetchError>,
    },
    /// Replaces the raw JSON the service serves. `None` means nothing is configured.
    SetPayload {
        payload: Option<String>,
        respond_to: ServiceResponse<(), FetchError>,
    },
    /// Makes the next fetch fail with the given error.
    FailNext {
        error: FetchError,
        respond_to: ServiceResponse<(), FetchError>,
    },
    Shutdown,
}

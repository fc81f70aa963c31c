use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};
use crate::domain::UserProfile;
use crate::error::FetchError;
use crate::messages::ProfileRequest;
use crate::view_model::ProfileService;

// =============================================================================
// CLIENT METHOD MACRO
// =============================================================================

/// Generate client methods with oneshot channel boilerplate and automatic tracing.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        #[allow(dead_code)]
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

// =============================================================================
// USER CLIENT
// =============================================================================

/// Handle to the `UserService` actor.
#[derive(Clone)]
pub struct UserClient {
    sender: mpsc::Sender<ProfileRequest>,
}

impl UserClient {
    pub fn new(sender: mpsc::Sender<ProfileRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), FetchError> {
        debug!("Sending shutdown request");
        self.sender
            .send(ProfileRequest::Shutdown)
            .await
            .map_err(|_| FetchError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(UserClient => fn fetch_profile() -> UserProfile as ProfileRequest::FetchProfile, Error = FetchError);
client_method!(UserClient => fn set_payload(payload: Option<String>) -> () as ProfileRequest::SetPayload, Error = FetchError);
client_method!(UserClient => fn fail_next(error: FetchError) -> () as ProfileRequest::FailNext, Error = FetchError);

#[async_trait]
impl ProfileService for UserClient {
    async fn fetch_profile(&self) -> Result<UserProfile, FetchError> {
        UserClient::fetch_profile(self).await
    }
}

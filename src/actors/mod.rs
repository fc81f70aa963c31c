use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn, Instrument};
use crate::clients::UserClient;
use crate::domain::UserProfile;
use crate::error::FetchError;
use crate::messages::{ProfileRequest, ServiceResponse};

// =============================================================================
// USER SERVICE
// =============================================================================

/// Profile service actor. Serves one JSON profile document, decoding it on
/// every fetch.
///
/// With a non-zero latency, each fetch is answered from a background task so
/// concurrent fetches overlap instead of queueing behind each other.
pub struct UserService {
    receiver: mpsc::Receiver<ProfileRequest>,
    payload: Option<String>,
    latency: Duration,
    pending_failure: Option<FetchError>,
}

impl UserService {
    pub fn new(buffer_size: usize, payload: Option<String>, latency: Duration) -> (Self, UserClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            payload,
            latency,
            pending_failure: None,
        };
        let client = UserClient::new(sender);
        (service, client)
    }

    #[instrument(name = "user_service", skip(self))]
    pub async fn run(mut self) {
        info!("UserService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ProfileRequest::FetchProfile { respond_to } => {
                    self.handle_fetch_profile(respond_to);
                }
                ProfileRequest::SetPayload { payload, respond_to } => {
                    self.handle_set_payload(payload, respond_to);
                }
                ProfileRequest::FailNext { error, respond_to } => {
                    debug!(error = %error, "Next fetch will fail");
                    self.pending_failure = Some(error);
                    let _ = respond_to.send(Ok(()));
                }
                ProfileRequest::Shutdown => {
                    info!("UserService shutting down");
                    break;
                }
            }
        }

        info!("UserService stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_fetch_profile(&mut self, respond_to: ServiceResponse<UserProfile, FetchError>) {
        debug!("Processing fetch_profile request");

        let result = match self.pending_failure.take() {
            Some(error) => Err(error),
            None => self.decode_payload(),
        };

        match &result {
            Ok(profile) => info!(profile_id = %profile.id(), "Profile fetched"),
            Err(e) => warn!(error = %e, "Profile fetch failed"),
        }

        if self.latency.is_zero() {
            let _ = respond_to.send(result);
            return;
        }

        let latency = self.latency;
        tokio::spawn(
            async move {
                tokio::time::sleep(latency).await;
                let _ = respond_to.send(result);
            }
            .in_current_span(),
        );
    }

    #[instrument(skip(self, payload, respond_to))]
    fn handle_set_payload(&mut self, payload: Option<String>, respond_to: ServiceResponse<(), FetchError>) {
        debug!(configured = payload.is_some(), "Processing set_payload request");
        self.payload = payload;
        let _ = respond_to.send(Ok(()));
    }

    fn decode_payload(&self) -> Result<UserProfile, FetchError> {
        let raw = self.payload.as_deref().ok_or(FetchError::NotConfigured)?;
        Ok(UserProfile::from_json(raw)?)
    }
}

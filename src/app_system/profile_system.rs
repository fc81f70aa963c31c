use tokio::task::JoinHandle;
use tracing::{error, info};
use crate::actors::UserService;
use crate::clients::UserClient;
use crate::config::ProfileConfig;
use crate::error::SystemError;

/// Starts the profile service actor and hands out its client.
pub struct ProfileSystem {
    pub user_client: UserClient,
    handle: JoinHandle<()>,
}

impl ProfileSystem {
    pub fn new(config: &ProfileConfig) -> Self {
        info!(latency_ms = config.latency.as_millis() as u64, "Starting profile system");

        let (user_service, user_client) =
            UserService::new(config.buffer_size, config.payload.clone(), config.latency);
        let handle = tokio::spawn(user_service.run());

        Self { user_client, handle }
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        self.user_client
            .shutdown()
            .await
            .map_err(|e| SystemError::ActorCommunicationError(e.to_string()))?;

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(SystemError::ActorTask(e.to_string()));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    #[tokio::test]
    async fn serves_default_profile_and_shuts_down() {
        let system = ProfileSystem::new(&ProfileConfig::default());

        let profile = system.user_client.fetch_profile().await.unwrap();
        assert_eq!(profile.name(), "Ana");

        let client = system.user_client.clone();
        system.shutdown().await.unwrap();

        assert!(matches!(
            client.fetch_profile().await,
            Err(FetchError::ActorCommunicationError(_))
        ));
    }
}

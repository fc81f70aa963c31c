mod domain;
mod error;
mod messages;
mod config;

mod actors;
mod clients;
mod app_system;

mod view_model;
mod view;

#[cfg(test)]
mod mock_framework;

use tracing::{info, Instrument};
use crate::app_system::{setup_tracing, ProfileSystem};
use crate::config::ProfileConfig;
use crate::error::{FetchError, SystemError};
use crate::view::ProfileView;
use crate::view_model::ProfileViewModel;

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ProfileConfig::from_env()?;
    info!(failure_policy = ?config.failure_policy, "Starting profile view");

    let system = ProfileSystem::new(&config);

    if config.simulate_failure {
        system
            .user_client
            .fail_next(FetchError::Network("simulated outage".to_string()))
            .await
            .map_err(|e| SystemError::ActorCommunicationError(e.to_string()))?;
    }

    let view_model = ProfileViewModel::new(system.user_client.clone()).with_failure_policy(config.failure_policy);
    let mut view = ProfileView::new(view_model);

    let mut frames = view.frames();
    let render_loop = tokio::spawn(
        async move {
            while let Some(frame) = frames.next().await {
                info!(empty = frame.is_empty(), "Re-rendered");
                println!("{frame}");
            }
        }
        .instrument(tracing::info_span!("render_loop")),
    );

    let span = tracing::info_span!("profile_view");
    async {
        info!("Mounting view");
        view.on_appear();
        view.wait_for_load().await;

        if view.body().is_empty() {
            info!("No profile to show");
        }
    }
    .instrument(span)
    .await;

    // Unmounting drops the view model, which ends the render loop.
    drop(view);
    if let Err(e) = render_loop.await {
        return Err(SystemError::ActorTask(e.to_string()));
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

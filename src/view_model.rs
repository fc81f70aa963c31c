//! Observable holder of the current user profile.
//!
//! The held value lives in a [`watch`] channel: readers take snapshots with
//! [`ProfileViewModel::profile`] or subscribe to changes with
//! [`ProfileViewModel::subscribe`].

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{info, instrument, warn};
use crate::domain::UserProfile;
use crate::error::FetchError;

/// Something that can produce the current user's profile.
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn fetch_profile(&self) -> Result<UserProfile, FetchError>;
}

/// What a failed load does to a profile that is already held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Clear the held profile.
    #[default]
    Reset,
    /// Leave the held profile untouched.
    KeepPrevious,
}

pub struct ProfileViewModel<S> {
    service: S,
    profile: watch::Sender<Option<UserProfile>>,
    failure_policy: FailurePolicy,
}

impl<S: ProfileService> ProfileViewModel<S> {
    pub fn new(service: S) -> Self {
        let (profile, _) = watch::channel(None);
        Self {
            service,
            profile,
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Snapshot of the held profile.
    pub fn profile(&self) -> Option<UserProfile> {
        self.profile.borrow().clone()
    }

    /// Receiver that is notified every time the held profile changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.profile.subscribe()
    }

    /// Fetches the profile and stores it.
    ///
    /// On failure the failure policy is applied and the error is handed back;
    /// whether it is shown or dropped is up to the caller. Concurrent calls
    /// are not serialized: whichever fetch completes last decides the held
    /// value.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<(), FetchError> {
        match self.service.fetch_profile().await {
            Ok(profile) => {
                info!(profile_id = %profile.id(), "Profile loaded");
                self.profile.send_if_modified(|current| {
                    if current.as_ref() == Some(&profile) {
                        return false;
                    }
                    *current = Some(profile);
                    true
                });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, policy = ?self.failure_policy, "Profile load failed");
                if self.failure_policy == FailurePolicy::Reset {
                    self.profile.send_if_modified(|current| current.take().is_some());
                }
                Err(e)
            }
        }
    }
}

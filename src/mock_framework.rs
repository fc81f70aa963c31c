//! # Mock Framework
//!
//! Utilities for testing profile consumers without a running `UserService`.
//!
//! Use [`create_mock_client`] to get a client and the receiver its requests
//! land on, then [`expect_fetch_profile`] to take each fetch and answer it
//! whenever the test decides. Answering fetches in a chosen order is how the
//! tests pin down races between overlapping loads.

use tokio::sync::mpsc;
use crate::clients::UserClient;
use crate::domain::UserProfile;
use crate::error::FetchError;
use crate::messages::{ProfileRequest, ServiceResponse};

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client(buffer_size: usize) -> (UserClient, mpsc::Receiver<ProfileRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (UserClient::new(sender), receiver)
}

/// Helper to verify that the next message is a FetchProfile request
pub async fn expect_fetch_profile(
    receiver: &mut mpsc::Receiver<ProfileRequest>,
) -> Option<ServiceResponse<UserProfile, FetchError>> {
    match receiver.recv().await {
        Some(ProfileRequest::FetchProfile { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let fetch_task = tokio::spawn(async move { client.fetch_profile().await });

        let responder = expect_fetch_profile(&mut receiver).await.expect("Expected FetchProfile request");
        let profile = UserProfile::new("1", "Ana", "http://x/a.png");
        responder.send(Ok(profile.clone())).unwrap();

        let result = fetch_task.await.unwrap();
        assert_eq!(result, Ok(profile));
    }

    #[tokio::test]
    async fn other_requests_are_not_fetches() {
        let (client, mut receiver) = create_mock_client(10);

        client.shutdown().await.unwrap();

        assert!(expect_fetch_profile(&mut receiver).await.is_none());
    }
}

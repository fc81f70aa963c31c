//! Declarative profile screen.
//!
//! [`ProfileView`] owns one [`ProfileViewModel`] and turns its state into an
//! [`Element`] tree. The host calls [`ProfileView::on_appear`] when the view
//! is mounted and [`ProfileView::on_disappear`] when it is taken down.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, Instrument};
use crate::domain::UserProfile;
use crate::view_model::{ProfileService, ProfileViewModel};

/// A node in the rendered view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    VStack(Vec<Element>),
    Text(String),
}

impl Element {
    /// All text in the tree, depth first.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Element::Text(text) => vec![text.as_str()],
            Element::VStack(children) => children.iter().flat_map(Element::texts).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.texts().is_empty()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.texts().join("\n"))
    }
}

pub fn greeting(profile: &UserProfile) -> String {
    format!("Olá, {}", profile.name())
}

/// Builds the view tree for a given state: a stack holding the greeting
/// once a profile is present, and nothing otherwise.
pub fn render(profile: Option<&UserProfile>) -> Element {
    let mut children = Vec::new();
    if let Some(profile) = profile {
        children.push(Element::Text(greeting(profile)));
    }
    Element::VStack(children)
}

pub struct ProfileView<S> {
    view_model: Arc<ProfileViewModel<S>>,
    mounted: bool,
    load_task: Option<JoinHandle<()>>,
}

impl<S: ProfileService + 'static> ProfileView<S> {
    pub fn new(view_model: ProfileViewModel<S>) -> Self {
        Self {
            view_model: Arc::new(view_model),
            mounted: false,
            load_task: None,
        }
    }

    pub fn view_model(&self) -> &ProfileViewModel<S> {
        &self.view_model
    }

    pub fn body(&self) -> Element {
        render(self.view_model.profile().as_ref())
    }

    /// Re-rendered frames, one per state change.
    pub fn frames(&self) -> Frames {
        Frames {
            receiver: self.view_model.subscribe(),
        }
    }

    /// Schedules the profile load. Only the first call per mount does
    /// anything; returns whether a load was scheduled.
    pub fn on_appear(&mut self) -> bool {
        if self.mounted {
            debug!("View already mounted, not reloading");
            return false;
        }
        self.mounted = true;

        let view_model = Arc::clone(&self.view_model);
        let task = tokio::spawn(
            async move {
                // Load failures are not shown; the screen stays empty.
                if let Err(e) = view_model.load().await {
                    debug!(error = %e, "Discarding profile load error");
                }
            }
            .in_current_span(),
        );
        self.load_task = Some(task);
        true
    }

    /// Ends the current mount, cancelling a load that is still running.
    pub fn on_disappear(&mut self) {
        if let Some(task) = self.load_task.take() {
            if !task.is_finished() {
                debug!("Cancelling in-flight profile load");
                task.abort();
            }
        }
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Waits for the load scheduled by the last `on_appear`, if any.
    pub async fn wait_for_load(&mut self) {
        if let Some(task) = self.load_task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    error!(error = %e, "Profile load task failed");
                }
            }
        }
    }
}

impl<S> Drop for ProfileView<S> {
    fn drop(&mut self) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
    }
}

/// Stream of rendered frames driven by the view model's state.
pub struct Frames {
    receiver: watch::Receiver<Option<UserProfile>>,
}

impl Frames {
    /// Waits for the next state change and renders it. Returns `None` once
    /// the view model is gone.
    pub async fn next(&mut self) -> Option<Element> {
        self.receiver.changed().await.ok()?;
        Some(render(self.receiver.borrow_and_update().as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use crate::error::FetchError;

    struct CountingService {
        calls: Arc<AtomicUsize>,
        delay: Duration,
    }

    #[async_trait]
    impl ProfileService for CountingService {
        async fn fetch_profile(&self) -> Result<UserProfile, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(UserProfile::new("1", "Ana", "http://x/a.png"))
        }
    }

    fn counting_view(delay: Duration) -> (ProfileView<CountingService>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = CountingService {
            calls: Arc::clone(&calls),
            delay,
        };
        (ProfileView::new(ProfileViewModel::new(service)), calls)
    }

    #[test]
    fn renders_nothing_without_a_profile() {
        let element = render(None);
        assert_eq!(element, Element::VStack(vec![]));
        assert!(element.is_empty());
        assert_eq!(element.to_string(), "");
    }

    #[test]
    fn renders_greeting_with_the_name() {
        let profile = UserProfile::new("1", "Ana", "http://x/a.png");
        let element = render(Some(&profile));

        assert_eq!(element.texts(), vec!["Olá, Ana"]);
        assert_eq!(element.to_string(), "Olá, Ana");
    }

    #[tokio::test]
    async fn appearing_twice_loads_once() {
        let (mut view, calls) = counting_view(Duration::ZERO);

        assert!(view.on_appear());
        assert!(!view.on_appear());
        view.wait_for_load().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(view.body().texts(), vec!["Olá, Ana"]);
    }

    #[tokio::test]
    async fn remounting_loads_again() {
        let (mut view, calls) = counting_view(Duration::ZERO);

        view.on_appear();
        view.wait_for_load().await;
        view.on_disappear();
        assert!(!view.is_mounted());

        assert!(view.on_appear());
        view.wait_for_load().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn disappearing_cancels_the_pending_load() {
        let (mut view, calls) = counting_view(Duration::from_secs(5));

        view.on_appear();
        tokio::task::yield_now().await;
        view.on_disappear();

        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(view.body().is_empty());
    }

    #[tokio::test]
    async fn frames_follow_the_view_model() {
        let (mut view, _) = counting_view(Duration::ZERO);
        let mut frames = view.frames();

        view.on_appear();
        let frame = frames.next().await.unwrap();

        assert_eq!(frame.texts(), vec!["Olá, Ana"]);
    }

    #[tokio::test]
    async fn frames_end_when_the_view_is_dropped() {
        let (mut view, _) = counting_view(Duration::ZERO);
        let mut frames = view.frames();

        view.on_appear();
        view.wait_for_load().await;
        drop(view);

        // The load's change is still pending, then the channel closes.
        assert!(frames.next().await.is_some());
        assert!(frames.next().await.is_none());
    }
}

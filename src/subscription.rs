//! Listener handles.
//!
//! A [`Subscription`] owns one registered listener and detaches it when
//! dropped. A [`Teardown`] bundles the subscriptions of one behavior so tests
//! can dispose a behavior between cases and the bootstrap can report which
//! behaviors found their elements.

#[cfg(test)]
#[path = "subscription_test.rs"]
mod subscription_test;

use std::fmt;

/// One registered listener. Detaches on drop.
///
/// The detach closure may own the callback itself, so a subscription that
/// should live as long as the page must be kept somewhere, never leaked.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self { detach: Some(Box::new(detach)) }
    }

    /// A subscription with nothing to detach.
    #[must_use]
    pub fn noop() -> Self {
        Self { detach: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("attached", &self.detach.is_some()).finish()
    }
}

/// Every listener registered by one behavior.
///
/// An empty teardown means the behavior did not find its elements and is
/// inert.
#[derive(Debug, Default)]
pub struct Teardown {
    subscriptions: Vec<Subscription>,
}

impl Teardown {
    /// Teardown of a behavior that found nothing to attach to.
    #[must_use]
    pub fn inert() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Whether the behavior registered any listener.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Detach every listener now.
    pub fn dispose(self) {
        drop(self);
    }
}

impl FromIterator<Subscription> for Teardown {
    fn from_iter<I: IntoIterator<Item = Subscription>>(iter: I) -> Self {
        Self { subscriptions: iter.into_iter().collect() }
    }
}

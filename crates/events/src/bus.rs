//! Event publishing/subscription abstraction (mechanics only).
//!
//! A bus fans every published message out to all live subscriptions
//! (broadcast semantics). It stores nothing: a subscriber only sees messages
//! published after it subscribed.

use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = inventory.subscribe();
/// inventory.add_part(part);
/// while let Ok(envelope) = subscription.try_recv() {
///     refresh_table(envelope.payload());
/// }
/// ```
///
/// Subscriptions are meant for single-threaded consumption. Messages arrive in
/// the order they were published.
///
/// The underlying channel is unbounded: messages queue until they are
/// received, so a subscription that is kept but never drained grows with every
/// publish. Drop it when it is no longer read.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain everything that is currently queued.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` can fail (e.g. internal lock poisoning); failures are surfaced
/// to the caller, who decides whether a lost notification matters.
///
/// The trait requires `Send + Sync` so a bus can live inside a shared registry.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

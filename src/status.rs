//! Status notifications pushed to the caller while a search runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// A fire-and-forget progress notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    /// Human-readable progress text.
    pub description: String,
    /// Whether this is the final event of the search.
    pub done: bool,
}

impl StatusEvent {
    /// An in-progress event.
    pub fn progress(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
        }
    }

    /// A completion event.
    pub fn done(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: true,
        }
    }
}

/// Sink for status events.
///
/// Emitting never fails from the caller's point of view; implementations
/// swallow delivery problems.
#[async_trait]
pub trait StatusEmitter: Send + Sync {
    /// Delivers one event.
    async fn emit(&self, event: StatusEvent);
}

/// Discards every event. Stands in when the caller supplies no emitter.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentEmitter;

#[async_trait]
impl StatusEmitter for SilentEmitter {
    async fn emit(&self, _event: StatusEvent) {}
}

/// Logs events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEmitter;

#[async_trait]
impl StatusEmitter for TracingEmitter {
    async fn emit(&self, event: StatusEvent) {
        if event.done {
            tracing::info!(done = true, "{}", event.description);
        } else {
            tracing::info!("{}", event.description);
        }
    }
}

/// Forwards events to an unbounded tokio channel.
///
/// A dropped receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    sender: UnboundedSender<StatusEvent>,
}

impl ChannelEmitter {
    pub fn new(sender: UnboundedSender<StatusEvent>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl StatusEmitter for ChannelEmitter {
    async fn emit(&self, event: StatusEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("Status receiver dropped, event discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_status_event_constructors() {
        let progress = StatusEvent::progress("Searching");
        assert_eq!(progress.description, "Searching");
        assert!(!progress.done);

        let done = StatusEvent::done("Found 3 GIFs");
        assert!(done.done);
    }

    #[test]
    fn test_status_event_serialization() {
        let json = serde_json::to_string(&StatusEvent::progress("x")).unwrap();
        assert_eq!(json, r#"{"description":"x","done":false}"#);
    }

    #[test]
    fn test_silent_emitter() {
        tokio_test::block_on(SilentEmitter.emit(StatusEvent::progress("ignored")));
    }

    #[tokio::test]
    async fn test_tracing_emitter() {
        TracingEmitter.emit(StatusEvent::done("logged")).await;
    }

    #[tokio::test]
    async fn test_channel_emitter_forwards_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let emitter = ChannelEmitter::new(tx);

        emitter.emit(StatusEvent::progress("first")).await;
        emitter.emit(StatusEvent::done("second")).await;

        assert_eq!(rx.recv().await.unwrap().description, "first");
        let second = rx.recv().await.unwrap();
        assert_eq!(second.description, "second");
        assert!(second.done);
    }

    #[tokio::test]
    async fn test_channel_emitter_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let emitter = ChannelEmitter::new(tx);
        emitter.emit(StatusEvent::progress("nobody listening")).await;
    }
}

use super::Snapshot;
use crate::ID;
use crate::members::Channel;

/// Reference to a published display, kept for later replacement or removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    channel: ID<Channel>,
    message: u64,
}

impl Handle {
    pub fn new(channel: ID<Channel>, message: u64) -> Self {
        Self { channel, message }
    }
    pub fn channel(&self) -> ID<Channel> {
        self.channel
    }
    pub fn message(&self) -> u64 {
        self.message
    }
}

/// Platform side of status displays and channel replies.
/// Implementations may be called concurrently for different channels.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Renders a snapshot as a visible update and returns its handle.
    async fn publish(&self, channel: ID<Channel>, snapshot: &Snapshot) -> anyhow::Result<Handle>;
    /// Removes a previously published update.
    async fn retract(&self, handle: Handle) -> anyhow::Result<()>;
    /// Posts a plain text message.
    async fn reply(&self, channel: ID<Channel>, text: &str) -> anyhow::Result<()>;
}

use super::*;
use crate::ID;
use crate::members::Channel;
use std::collections::HashSet;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tokio::sync::Mutex;

/// Everything a [`Recorder`] was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Post {
    Published(Handle, Snapshot),
    Retracted(Handle),
    Replied(ID<Channel>, String),
}

/// In-process notifier that keeps every post for inspection.
#[derive(Debug, Default)]
pub struct Recorder {
    next: AtomicU64,
    posts: Mutex<Vec<Post>>,
    live: Mutex<HashSet<Handle>>,
}

impl Recorder {
    pub async fn posts(&self) -> Vec<Post> {
        self.posts.lock().await.clone()
    }
    /// Displays published and not yet retracted.
    pub async fn live(&self) -> Vec<Handle> {
        self.live.lock().await.iter().copied().collect()
    }
    pub async fn replies(&self) -> Vec<String> {
        self.posts
            .lock()
            .await
            .iter()
            .filter_map(|p| match p {
                Post::Replied(_, text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
    pub async fn latest(&self) -> Option<Snapshot> {
        self.posts
            .lock()
            .await
            .iter()
            .rev()
            .find_map(|p| match p {
                Post::Published(_, snapshot) => Some(snapshot.clone()),
                _ => None,
            })
    }
}

#[async_trait::async_trait]
impl Notifier for Recorder {
    async fn publish(&self, channel: ID<Channel>, snapshot: &Snapshot) -> anyhow::Result<Handle> {
        let handle = Handle::new(channel, self.next.fetch_add(1, Ordering::Relaxed));
        self.live.lock().await.insert(handle);
        self.posts
            .lock()
            .await
            .push(Post::Published(handle, snapshot.clone()));
        Ok(handle)
    }
    async fn retract(&self, handle: Handle) -> anyhow::Result<()> {
        match self.live.lock().await.remove(&handle) {
            false => Err(anyhow::anyhow!("display {} not found", handle.message())),
            true => {
                self.posts.lock().await.push(Post::Retracted(handle));
                Ok(())
            }
        }
    }
    async fn reply(&self, channel: ID<Channel>, text: &str) -> anyhow::Result<()> {
        self.posts
            .lock()
            .await
            .push(Post::Replied(channel, text.to_string()));
        Ok(())
    }
}

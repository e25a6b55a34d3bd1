use super::*;
use crate::ID;
use crate::members::Channel;
use crate::wager::Session;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tokio::sync::Mutex;
use tokio::sync::OwnedMutexGuard;

type Slot = Arc<Mutex<Option<TableHandle>>>;

/// Channel to session table, locked per channel.
/// Holding a channel's [`Lease`] is the only way to look at or install its session,
/// so unrelated channels never contend beyond the brief lookup.
#[derive(Debug, Default)]
pub struct Registry {
    next: AtomicU64,
    slots: Mutex<HashMap<ID<Channel>, Slot>>,
}

/// Exclusive hold on one channel's slot.
pub struct Lease {
    channel: ID<Channel>,
    slot: Slot,
    guard: OwnedMutexGuard<Option<TableHandle>>,
}

impl Lease {
    pub fn channel(&self) -> ID<Channel> {
        self.channel
    }
    pub fn table(&self) -> Option<&TableHandle> {
        self.guard.as_ref()
    }
}

impl Registry {
    /// Fresh session identifier.
    pub fn next_id(&self) -> ID<Session> {
        ID::from(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
    /// Number of channels with a lock entry.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
    /// Waits for the channel's lock, creating the entry on first use.
    pub async fn checkout(&self, channel: ID<Channel>) -> Lease {
        let slot = self
            .slots
            .lock()
            .await
            .entry(channel)
            .or_default()
            .clone();
        let guard = slot.clone().lock_owned().await;
        Lease {
            channel,
            slot,
            guard,
        }
    }
    /// Binds a table to the leased channel.
    /// Fails if the channel's lock entry was replaced while the lease was being acquired.
    pub async fn install(&self, lease: &mut Lease, table: TableHandle) -> Result<(), Rejection> {
        let slots = self.slots.lock().await;
        match slots.get(&lease.channel) {
            Some(current) if Arc::ptr_eq(current, &lease.slot) => {
                log::debug!("[registry] channel {} bound to {}", lease.channel, table.id());
                *lease.guard = Some(table);
                Ok(())
            }
            _ => {
                log::warn!("[registry] lost creation race on channel {}", lease.channel);
                Err(Rejection::RegistryRace)
            }
        }
    }
    /// Unbinds a finished session and drops the channel's lock entry if nothing replaced it.
    pub async fn release(&self, channel: ID<Channel>, session: ID<Session>) {
        let Some(slot) = self.slots.lock().await.get(&channel).cloned() else {
            return;
        };
        let mut guard = slot.lock().await;
        if guard.as_ref().is_some_and(|t| t.id() == session) {
            *guard = None;
        }
        if guard.is_none() {
            let mut slots = self.slots.lock().await;
            if slots.get(&channel).is_some_and(|s| Arc::ptr_eq(s, &slot)) {
                slots.remove(&channel);
            }
        }
        log::debug!("[registry] channel {} released {}", channel, session);
    }
}

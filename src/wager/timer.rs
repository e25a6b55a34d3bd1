use super::Command;
use crate::*;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::AbortHandle;

/// Configuration for session timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub forming: Duration,
    pub active: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            forming: Duration::from_secs(FORMING_TIMEOUT),
            active: Duration::from_secs(ACTIVE_TIMEOUT),
        }
    }
}

/// One-shot delayed trigger that injects a synthetic command into a session queue.
/// Dropping the alarm aborts it, so a session that ended early leaves no sleeper behind.
#[derive(Debug)]
pub struct Alarm {
    task: AbortHandle,
}

impl Alarm {
    pub fn arm(delay: Duration, queue: Sender<Command>, command: Command) -> Self {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            log::debug!("[alarm] firing {}", command);
            if queue.send(command).await.is_err() {
                log::debug!("[alarm] session already closed");
            }
        });
        Self {
            task: task.abort_handle(),
        }
    }
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Alarm {
    fn drop(&mut self) {
        self.task.abort();
    }
}

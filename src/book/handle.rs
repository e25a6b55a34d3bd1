use super::Rejection;
use crate::ID;
use crate::wager::Command;
use crate::wager::Session;
use crate::wager::View;
use tokio::sync::mpsc::Sender;
use tokio::sync::watch::Receiver;

/// Submit side of a running table.
/// Holds the bounded queue into the processor and the view it publishes.
#[derive(Debug, Clone)]
pub struct TableHandle {
    id: ID<Session>,
    queue: Sender<Command>,
    view: Receiver<View>,
}

impl TableHandle {
    pub fn new(id: ID<Session>, queue: Sender<Command>, view: Receiver<View>) -> Self {
        Self { id, queue, view }
    }
    pub fn id(&self) -> ID<Session> {
        self.id
    }
    /// The view as of the last completed cycle.
    pub fn view(&self) -> View {
        self.view.borrow().clone()
    }
    /// Still draining commands. A finished table closes its queue before it leaves the registry.
    pub fn is_live(&self) -> bool {
        !self.queue.is_closed() && !self.view.borrow().phase().is_terminal()
    }
    /// Waits for room in the queue. Fails once the table has finished.
    pub async fn send(&self, command: Command) -> Result<(), Rejection> {
        self.queue
            .send(command)
            .await
            .map_err(|_| Rejection::NoActiveSession)
    }
}

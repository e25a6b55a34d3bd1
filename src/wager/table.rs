use super::*;
use crate::ID;
use crate::archive::Archive;
use crate::archive::Outcome;
use crate::ledger::Ledger;
use crate::notify::Handle;
use crate::notify::Notifier;
use crate::notify::Snapshot;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::sync::watch;

/// The adapters every table talks to. Shared across channels.
#[derive(Clone)]
pub struct Backends {
    pub ledger: Arc<dyn Ledger>,
    pub notifier: Arc<dyn Notifier>,
    pub archive: Arc<dyn Archive>,
}

/// Sequential processor for one session.
/// Imperative shell that owns the [`Session`] (functional core), drains its
/// bounded queue one command at a time and carries out the resulting effects.
/// It is the only thing that ever mutates the session.
pub struct Table {
    session: Session,
    backends: Backends,
    payout: Payout,
    backlog: Vec<Effect>,
    inbox: mpsc::Receiver<Command>,
    outbox: mpsc::Sender<Command>,
    view: watch::Sender<View>,
    alarms: Vec<Alarm>,
    display: Option<Handle>,
}

impl Table {
    /// Seats the initiator's stake and wires up the queue.
    /// Returns the table with the submit side of its queue and its published view.
    pub fn new(
        mut session: Session,
        backends: Backends,
        payout: Payout,
        capacity: usize,
    ) -> (Self, mpsc::Sender<Command>, watch::Receiver<View>) {
        let backlog = session.apply(Command::Commit(session.initiator().clone()));
        let (outbox, inbox) = mpsc::channel(capacity.max(1));
        let (view, watcher) = watch::channel(View::from(&session));
        let table = Self {
            session,
            backends,
            payout,
            backlog,
            inbox,
            outbox: outbox.clone(),
            view,
            alarms: Vec::new(),
            display: None,
        };
        (table, outbox, watcher)
    }
    pub fn id(&self) -> ID<Session> {
        self.session.id()
    }
}

impl Table {
    /// Runs the session to a terminal phase, then settles it.
    /// The queue is closed before `done` fires, so nobody can be left
    /// waiting on a session that no longer drains.
    pub async fn run(mut self, done: oneshot::Sender<ID<Session>>) {
        log::debug!("[table {}] open", self.id());
        self.alarms.push(Alarm::arm(
            self.session.timers().forming,
            self.outbox.clone(),
            Command::FormingTimeout,
        ));
        let opening = std::mem::take(&mut self.backlog);
        self.execute(opening).await;
        self.refresh().await;
        while !self.session.phase().is_terminal() {
            match self.inbox.recv().await {
                Some(command) => self.cycle(command).await,
                None => break,
            }
        }
        self.inbox.close();
        self.alarms.clear();
        self.conclude().await;
        let _ = done.send(self.id());
    }
    async fn cycle(&mut self, command: Command) {
        log::debug!("[table {}] applying {}", self.id(), command);
        let effects = self.session.apply(command);
        self.view.send_replace(View::from(&self.session));
        self.execute(effects).await;
        if !self.session.phase().is_terminal() {
            self.refresh().await;
        }
    }
    async fn conclude(&mut self) {
        if self.session.phase() == Phase::Resolved {
            let settlement = self.session.settle(self.payout);
            self.execute(settlement).await;
        }
        match Outcome::of(&self.session) {
            Some(outcome) => {
                if let Some(winner) = self.session.winner() {
                    log::info!(
                        "[table {}] bet ended. {} won {}",
                        self.id(),
                        winner,
                        self.session.pot() - self.session.stake()
                    );
                }
                self.refresh().await;
                if let Err(e) = self.backends.archive.record(&outcome).await {
                    log::error!("[table {}] failed to archive: {}", self.id(), e);
                }
            }
            None => self.retract().await,
        }
        log::info!("[table {}] closed ({})", self.id(), self.session.phase());
    }
}

impl Table {
    /// Adapter failures are logged and never stop the session.
    async fn execute(&mut self, effects: Vec<Effect>) {
        let venue = self.session.venue();
        for effect in effects {
            match effect {
                Effect::Transfer(transfer) => {
                    if let Err(e) = self
                        .backends
                        .ledger
                        .adjust(venue.guild(), transfer.member(), transfer.delta())
                        .await
                    {
                        log::error!(
                            "[table {}] failed to move {} for {}: {}",
                            self.id(),
                            transfer.delta(),
                            transfer.member(),
                            e
                        );
                    }
                }
                Effect::Notice(notice) => {
                    let text = notice.to_string();
                    if let Err(e) = self.backends.notifier.reply(venue.channel(), &text).await {
                        log::warn!("[table {}] failed to reply: {}", self.id(), e);
                    }
                }
                Effect::Arm => self.alarms.push(Alarm::arm(
                    self.session.timers().active,
                    self.outbox.clone(),
                    Command::ActiveTimeout,
                )),
            }
        }
    }
    /// Swaps the current display for a fresh one. The old one goes first.
    async fn refresh(&mut self) {
        self.retract().await;
        let snapshot = Snapshot::from(&self.session);
        let channel = self.session.venue().channel();
        match self.backends.notifier.publish(channel, &snapshot).await {
            Ok(handle) => self.display = Some(handle),
            Err(e) => log::warn!("[table {}] failed to publish: {}", self.id(), e),
        }
    }
    async fn retract(&mut self) {
        if let Some(handle) = self.display.take() {
            if let Err(e) = self.backends.notifier.retract(handle).await {
                log::warn!("[table {}] failed to retract: {}", self.id(), e);
            }
        }
    }
}

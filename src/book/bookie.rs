use super::*;
use crate::archive::Archive;
use crate::ledger::Ledger;
use crate::members::*;
use crate::notify::Notifier;
use crate::wager::*;
use crate::*;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::oneshot;

/// Owns the registry and the adapters, hands orders to the right table
/// and opens tables for channels that have none.
pub struct Bookie {
    registry: Arc<Registry>,
    backends: Backends,
    config: Config,
}

impl Bookie {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        notifier: Arc<dyn Notifier>,
        archive: Arc<dyn Archive>,
        config: Config,
    ) -> Self {
        Self {
            registry: Arc::new(Registry::default()),
            backends: Backends {
                ledger,
                notifier,
                archive,
            },
            config,
        }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    /// What admission currently sees in a channel, if a session is running there.
    pub async fn view(&self, channel: ID<Channel>) -> Option<View> {
        self.registry
            .checkout(channel)
            .await
            .table()
            .filter(|t| t.is_live())
            .map(TableHandle::view)
    }
}

impl Bookie {
    /// The only way in. Holds the channel's lock until the order is either
    /// rejected, enqueued or has become a new session.
    /// A finished session keeps the channel until its table has settled and released it.
    /// Enqueueing waits while the session's queue is full.
    pub async fn submit(&self, venue: Venue, author: Member, order: Order) -> Result<Receipt, Rejection> {
        let mut lease = self.registry.checkout(venue.channel()).await;
        let bound = lease.table().cloned();
        match (bound, order) {
            (None, Order::Propose { wager, audience }) => {
                self.propose(&mut lease, venue, author, &wager, audience).await
            }
            (None, _) => Err(Rejection::NoActiveSession),
            (Some(table), order) => self.admit(&table, author, order).await,
        }
    }
    async fn admit(&self, table: &TableHandle, author: Member, order: Order) -> Result<Receipt, Rejection> {
        let view = table.view();
        let command = view.admit(&author, order)?;
        if let Command::Commit(_) = command {
            if self.balance(&author).await? < view.stake() {
                return Err(Rejection::InsufficientFunds);
            }
        }
        log::debug!("[bookie] queueing {} for session {}", command, table.id());
        table.send(command).await?;
        Ok(Receipt::Queued)
    }
    async fn propose(
        &self,
        lease: &mut Lease,
        venue: Venue,
        author: Member,
        wager: &str,
        audience: Audience,
    ) -> Result<Receipt, Rejection> {
        let available = self.balance(&author).await?;
        let stake = wager
            .trim()
            .parse::<Points>()
            .ok()
            .filter(|stake| *stake >= 1 && *stake <= available)
            .ok_or(Rejection::InvalidWager)?;
        let audience = self.screen(&author, stake, audience).await?;
        let id = self.registry.next_id();
        let session = Session::new(
            id,
            venue,
            author.clone(),
            stake,
            audience,
            self.config.timers,
            SystemTime::now(),
        );
        let (table, queue, view) = Table::new(
            session,
            self.backends.clone(),
            self.config.payout,
            self.config.capacity,
        );
        self.registry
            .install(lease, TableHandle::new(id, queue, view))
            .await?;
        let (done_tx, done_rx) = oneshot::channel();
        tokio::spawn(table.run(done_tx));
        let registry = self.registry.clone();
        let channel = venue.channel();
        tokio::spawn(async move {
            let _ = done_rx.await;
            registry.release(channel, id).await;
            log::info!("[bookie] session {} cleaned up", id);
        });
        log::info!("[bookie] {} started a bet of {}", author, stake);
        Ok(Receipt::Opened(id))
    }
    /// Narrows an invite list to members who can actually play.
    /// Bots, the initiator, repeats and anyone short of the stake are dropped.
    async fn screen(&self, author: &Member, stake: Points, audience: Audience) -> Result<Audience, Rejection> {
        let invited = match audience {
            Audience::Everyone => return Ok(Audience::Everyone),
            Audience::Invited(invited) => invited,
        };
        let mut eligible = Vec::<Member>::new();
        for member in invited {
            if member.is_bot() || member.id() == author.id() {
                continue;
            }
            if eligible.iter().any(|m| m.id() == member.id()) {
                continue;
            }
            match self.backends.ledger.balance(member.id()).await {
                Ok(balance) if balance >= stake => eligible.push(member),
                Ok(_) => log::debug!("[bookie] {} cannot cover {}", member, stake),
                Err(e) => log::warn!("[bookie] no balance for {}: {}", member, e),
            }
        }
        match eligible.is_empty() {
            true => Err(Rejection::NoEligibleParticipants),
            false => Ok(Audience::Invited(eligible)),
        }
    }
    async fn balance(&self, member: &Member) -> Result<Points, Rejection> {
        self.backends
            .ledger
            .balance(member.id())
            .await
            .map_err(|e| {
                log::error!("[bookie] balance lookup failed for {}: {}", member, e);
                Rejection::LedgerUnavailable
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Shelf;
    use crate::ledger::Vault;
    use crate::notify::Recorder;
    use std::time::Duration;

    fn alice() -> Member {
        Member::new(1.into(), "alice")
    }
    fn bob() -> Member {
        Member::new(2.into(), "bob")
    }
    fn carol() -> Member {
        Member::new(3.into(), "carol")
    }
    fn dave() -> Member {
        Member::new(4.into(), "dave")
    }
    fn robot() -> Member {
        Member::bot(5.into(), "robot")
    }
    fn here() -> Venue {
        Venue::new(10.into(), 20.into())
    }
    fn there() -> Venue {
        Venue::new(11.into(), 20.into())
    }
    fn bet(wager: &str, invited: Vec<Member>) -> Order {
        Order::Propose {
            wager: wager.to_string(),
            audience: Audience::from(invited),
        }
    }

    struct Rig {
        bookie: Bookie,
        vault: Arc<Vault>,
        recorder: Arc<Recorder>,
        shelf: Arc<Shelf>,
    }
    fn rig(payout: Payout) -> Rig {
        let vault = Arc::new(Vault::new([
            (alice().id(), 1000),
            (bob().id(), 1000),
            (carol().id(), 1000),
            (dave().id(), 10),
            (robot().id(), 1000),
        ]));
        let recorder = Arc::new(Recorder::default());
        let shelf = Arc::new(Shelf::default());
        let config = Config {
            payout,
            ..Config::default()
        };
        let bookie = Bookie::new(vault.clone(), recorder.clone(), shelf.clone(), config);
        Rig {
            bookie,
            vault,
            recorder,
            shelf,
        }
    }
    /// Lets spawned tables drain whatever is queued.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn forced_start_then_loss_pays_the_last_caller() {
        let rig = rig(Payout::Escrow);
        let opened = rig.bookie.submit(here(), alice(), bet("50", vec![])).await;
        assert!(matches!(opened, Ok(Receipt::Opened(_))));
        assert_eq!(
            rig.bookie.submit(here(), bob(), Order::Call).await,
            Ok(Receipt::Queued)
        );
        rig.bookie.submit(here(), alice(), Order::Start).await.unwrap();
        settle().await;
        assert_eq!(rig.bookie.view(here().channel()).await.map(|v| v.phase()), Some(Phase::Active));
        rig.bookie.submit(here(), alice(), Order::Lose).await.unwrap();
        settle().await;
        assert_eq!(rig.vault.holding(bob().id()).await, 1050);
        assert_eq!(rig.vault.holding(alice().id()).await, 950);
        let outcomes = rig.shelf.outcomes().await;
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].winner(), bob().id());
        assert_eq!(outcomes[0].pot(), 100);
        assert!(rig.bookie.view(here().channel()).await.is_none());
        assert!(rig.bookie.registry().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn surcharge_charges_the_loser_twice() {
        let rig = rig(Payout::Surcharge);
        rig.bookie.submit(here(), alice(), bet("50", vec![])).await.unwrap();
        rig.bookie.submit(here(), bob(), Order::Call).await.unwrap();
        rig.bookie.submit(here(), alice(), Order::Start).await.unwrap();
        rig.bookie.submit(here(), alice(), Order::Lose).await.unwrap();
        settle().await;
        assert_eq!(rig.vault.holding(bob().id()).await, 1050);
        assert_eq!(rig.vault.holding(alice().id()).await, 900);
    }

    #[tokio::test(start_paused = true)]
    async fn unanswered_open_bet_is_refunded() {
        let rig = rig(Payout::Escrow);
        rig.bookie.submit(here(), alice(), bet("20", vec![])).await.unwrap();
        settle().await;
        assert_eq!(rig.vault.holding(alice().id()).await, 980);
        tokio::time::sleep(seconds(FORMING_TIMEOUT) + seconds(1)).await;
        assert_eq!(rig.vault.holding(alice().id()).await, 1000);
        assert!(rig.shelf.outcomes().await.is_empty());
        assert!(rig.recorder.live().await.is_empty());
        assert!(rig.bookie.registry().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn early_drop_restores_the_dropper() {
        let rig = rig(Payout::Escrow);
        rig.bookie.submit(here(), alice(), bet("30", vec![])).await.unwrap();
        rig.bookie.submit(here(), bob(), Order::Call).await.unwrap();
        rig.bookie.submit(here(), carol(), Order::Call).await.unwrap();
        settle().await;
        assert_eq!(rig.vault.holding(bob().id()).await, 970);
        rig.bookie.submit(here(), bob(), Order::Drop).await.unwrap();
        settle().await;
        assert_eq!(rig.vault.holding(bob().id()).await, 1000);
        rig.bookie.submit(here(), alice(), Order::Start).await.unwrap();
        settle().await;
        let view = rig.bookie.view(here().channel()).await.unwrap();
        assert_eq!(view.phase(), Phase::Active);
        assert_eq!(
            view.admit(&bob(), Order::Lose),
            Err(Rejection::IneligibleCommand)
        );
        assert_eq!(view.admit(&carol(), Order::Lose), Ok(Command::Forfeit(carol().id())));
    }

    #[tokio::test(start_paused = true)]
    async fn invite_only_starts_when_everyone_is_in() {
        let rig = rig(Payout::Escrow);
        let invited = vec![bob(), robot(), alice(), bob(), dave()];
        rig.bookie.submit(here(), alice(), bet("25", invited)).await.unwrap();
        assert_eq!(
            rig.bookie.submit(here(), carol(), Order::Call).await,
            Err(Rejection::IneligibleCommand)
        );
        rig.bookie.submit(here(), bob(), Order::Call).await.unwrap();
        settle().await;
        let view = rig.bookie.view(here().channel()).await.unwrap();
        assert_eq!(view.phase(), Phase::Active);
    }

    #[tokio::test(start_paused = true)]
    async fn wagers_must_be_positive_and_covered() {
        let rig = rig(Payout::Escrow);
        for wager in ["abc", "0", "-5", "1001", "2.5"] {
            assert_eq!(
                rig.bookie.submit(here(), alice(), bet(wager, vec![])).await,
                Err(Rejection::InvalidWager)
            );
        }
        assert!(rig.bookie.registry().checkout(here().channel()).await.table().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn invites_nobody_can_accept() {
        let rig = rig(Payout::Escrow);
        let order = bet("50", vec![robot(), alice(), dave()]);
        assert_eq!(
            rig.bookie.submit(here(), alice(), order).await,
            Err(Rejection::NoEligibleParticipants)
        );
        assert_eq!(rig.vault.holding(alice().id()).await, 1000);
    }

    #[tokio::test(start_paused = true)]
    async fn callers_must_cover_the_stake() {
        let rig = rig(Payout::Escrow);
        rig.bookie.submit(here(), alice(), bet("50", vec![])).await.unwrap();
        assert_eq!(
            rig.bookie.submit(here(), dave(), Order::Call).await,
            Err(Rejection::InsufficientFunds)
        );
        settle().await;
        assert_eq!(rig.vault.holding(dave().id()).await, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn commands_are_checked_against_the_session() {
        let rig = rig(Payout::Escrow);
        assert_eq!(
            rig.bookie.submit(here(), bob(), Order::Call).await,
            Err(Rejection::NoActiveSession)
        );
        rig.bookie.submit(here(), alice(), bet("50", vec![])).await.unwrap();
        assert_eq!(
            rig.bookie.submit(here(), bob(), Order::Start).await,
            Err(Rejection::IneligibleCommand)
        );
        assert_eq!(
            rig.bookie.submit(here(), bob(), Order::Lose).await,
            Err(Rejection::IneligibleCommand)
        );
        assert_eq!(
            rig.bookie.submit(here(), bob(), bet("10", vec![])).await,
            Err(Rejection::SessionAlreadyExists)
        );
        assert_eq!(
            rig.bookie.submit(here(), bob(), Order::Status).await,
            Ok(Receipt::Queued)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_ledger_rejects() {
        let rig = rig(Payout::Escrow);
        rig.vault.jam(alice().id()).await;
        assert_eq!(
            rig.bookie.submit(here(), alice(), bet("50", vec![])).await,
            Err(Rejection::LedgerUnavailable)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn channels_are_independent() {
        let rig = rig(Payout::Escrow);
        rig.bookie.submit(here(), alice(), bet("50", vec![])).await.unwrap();
        rig.bookie.submit(there(), bob(), bet("40", vec![])).await.unwrap();
        rig.bookie.submit(here(), alice(), Order::Cancel).await.unwrap();
        settle().await;
        assert!(rig.bookie.view(here().channel()).await.is_none());
        assert_eq!(
            rig.bookie.view(there().channel()).await.map(|v| v.stake()),
            Some(40)
        );
        assert_eq!(rig.vault.holding(alice().id()).await, 1000);
        assert_eq!(rig.vault.holding(bob().id()).await, 960);
    }

    /// Archive that takes its time, so settlement outlasts the terminal transition.
    struct Sluggish(Shelf);

    #[async_trait::async_trait]
    impl Archive for Sluggish {
        async fn record(&self, outcome: &crate::archive::Outcome) -> anyhow::Result<()> {
            tokio::time::sleep(seconds(10)).await;
            self.0.record(outcome).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn channel_stays_taken_until_settled() {
        let vault = Arc::new(Vault::new([(alice().id(), 1000), (bob().id(), 1000)]));
        let archive = Arc::new(Sluggish(Shelf::default()));
        let bookie = Bookie::new(
            vault.clone(),
            Arc::new(Recorder::default()),
            archive.clone(),
            Config::default(),
        );
        bookie.submit(here(), alice(), bet("50", vec![])).await.unwrap();
        bookie.submit(here(), bob(), Order::Call).await.unwrap();
        settle().await;
        bookie.submit(here(), alice(), Order::Start).await.unwrap();
        settle().await;
        bookie.submit(here(), alice(), Order::Lose).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(bookie.view(here().channel()).await.is_none());
        assert!(archive.0.outcomes().await.is_empty());
        assert_eq!(
            bookie.submit(here(), bob(), bet("10", vec![])).await,
            Err(Rejection::SessionAlreadyExists)
        );
        assert_eq!(
            bookie.submit(here(), bob(), Order::Call).await,
            Err(Rejection::NoActiveSession)
        );
        tokio::time::sleep(seconds(11)).await;
        assert_eq!(archive.0.outcomes().await.len(), 1);
        assert_eq!(vault.holding(bob().id()).await, 1050);
        let again = bookie.submit(here(), bob(), bet("10", vec![])).await;
        assert!(matches!(again, Ok(Receipt::Opened(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn finished_channel_takes_a_new_bet() {
        let rig = rig(Payout::Escrow);
        rig.bookie.submit(here(), alice(), bet("50", vec![])).await.unwrap();
        rig.bookie.submit(here(), alice(), Order::Cancel).await.unwrap();
        settle().await;
        let again = rig.bookie.submit(here(), bob(), bet("10", vec![])).await;
        assert!(matches!(again, Ok(Receipt::Opened(_))));
        assert_eq!(
            rig.recorder.replies().await,
            vec!["Bet cancelled, points refunded".to_string()]
        );
    }
}

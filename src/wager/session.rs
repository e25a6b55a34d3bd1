use super::*;
use crate::members::*;
use crate::*;
use std::collections::BTreeMap;
use std::iter::once;
use std::time::SystemTime;

/// Functional core of one betting session.
/// Holds the roster, pot and phase, applies commands one at a time and
/// reports the ledger movements and notices the shell must carry out.
/// Never touches an adapter itself; driven by [`Table`].
///
/// The initiator is an ordinary roster entry. While Forming the pot is always
/// `stake × committed`; once Active only forfeits move anyone out, and the pot
/// keeps every forfeited stake.
#[derive(Debug, Clone)]
pub struct Session {
    id: ID<Session>,
    venue: Venue,
    stake: Points,
    pot: Points,
    phase: Phase,
    open: bool,
    initiator: Member,
    winner: Option<ID<Member>>,
    roster: BTreeMap<ID<Member>, Entry>,
    timers: TimerConfig,
    created: SystemTime,
    ends: Option<SystemTime>,
}

impl Session {
    /// Seats the initiator and any invitees, all uncommitted.
    /// The initiator's stake goes in with the first command, `Commit(initiator)`.
    pub fn new(
        id: ID<Session>,
        venue: Venue,
        initiator: Member,
        stake: Points,
        audience: Audience,
        timers: TimerConfig,
        created: SystemTime,
    ) -> Self {
        let (open, invited) = match audience {
            Audience::Everyone => (true, Vec::new()),
            Audience::Invited(members) => (false, members),
        };
        let roster = once(initiator.clone())
            .chain(invited)
            .map(|m| (m.id(), Entry::new(m)))
            .collect();
        Self {
            id,
            venue,
            stake,
            pot: 0,
            phase: Phase::Forming,
            open,
            initiator,
            winner: None,
            roster,
            timers,
            created,
            ends: None,
        }
    }

    pub fn id(&self) -> ID<Session> {
        self.id
    }
    pub fn venue(&self) -> Venue {
        self.venue
    }
    pub fn stake(&self) -> Points {
        self.stake
    }
    pub fn pot(&self) -> Points {
        self.pot
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn is_open(&self) -> bool {
        self.open
    }
    pub fn initiator(&self) -> &Member {
        &self.initiator
    }
    pub fn winner(&self) -> Option<&Member> {
        self.winner
            .and_then(|id| self.roster.get(&id))
            .map(Entry::member)
    }
    pub fn roster(&self) -> impl Iterator<Item = &Entry> {
        self.roster.values()
    }
    pub fn commitment(&self, member: ID<Member>) -> Option<bool> {
        self.roster.get(&member).map(Entry::is_committed)
    }
    pub fn committed(&self) -> usize {
        self.roster.values().filter(|e| e.is_committed()).count()
    }
    pub fn created(&self) -> SystemTime {
        self.created
    }
    pub fn ends(&self) -> Option<SystemTime> {
        self.ends
    }
    /// The next scheduled cutoff: the forming deadline before the start,
    /// the active deadline after.
    pub fn deadline(&self) -> SystemTime {
        match self.ends {
            Some(ends) => ends,
            None => self.created + self.timers.forming,
        }
    }
    pub fn timers(&self) -> TimerConfig {
        self.timers
    }
}

impl Session {
    /// Applies a command, then re-evaluates the start condition (Forming)
    /// or the resolution condition (Active).
    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        if self.phase.is_terminal() {
            log::debug!("[session {}] ignoring {} once {}", self.id, command, self.phase);
            return Vec::new();
        }
        let mut effects = match command {
            Command::Commit(member) => self.commit(member),
            Command::Withdraw(id) if self.phase.is_active() => self.forfeit(id),
            Command::Withdraw(id) => self.withdraw(id),
            Command::Forfeit(id) => self.forfeit(id),
            Command::Start(id) if self.is_initiator(id) && self.phase.is_forming() => self.start(),
            Command::Cancel(id) if self.is_initiator(id) => self.cancel(),
            Command::FormingTimeout if self.phase.is_forming() => self.start(),
            Command::ActiveTimeout if self.phase.is_active() => self.cancel(),
            Command::Start(_)
            | Command::Cancel(_)
            | Command::Status
            | Command::FormingTimeout
            | Command::ActiveTimeout => Vec::new(),
        };
        match self.phase {
            Phase::Forming if self.is_ready() => effects.extend(self.start()),
            Phase::Active => self.resolve(),
            _ => {}
        }
        effects
    }

    /// Final ledger movements once the session has Resolved.
    /// A winner takes the whole pot; with no winner every entrant gets their stake back.
    pub fn settle(&self, payout: Payout) -> Vec<Effect> {
        if self.phase != Phase::Resolved {
            return Vec::new();
        }
        match self.winner() {
            Some(winner) if self.roster.len() >= MIN_ENTRANTS => {
                let surcharges = self
                    .roster
                    .values()
                    .filter(|_| payout == Payout::Surcharge)
                    .filter(|e| e.member().id() != winner.id())
                    .map(|e| Effect::Transfer(Transfer::debit(e.member().clone(), self.stake)));
                once(Effect::Transfer(Transfer::credit(winner.clone(), self.pot)))
                    .chain(surcharges)
                    .chain(once(Effect::Notice(Notice::Won {
                        winner: winner.id(),
                        name: winner.name().to_string(),
                        net: self.pot - self.stake,
                    })))
                    .collect()
            }
            // unreachable through single forfeits, kept for rosters resolved with nobody in
            _ => self
                .roster
                .values()
                .map(|e| Effect::Transfer(Transfer::credit(e.member().clone(), self.stake)))
                .chain(once(Effect::Notice(Notice::Push)))
                .collect(),
        }
    }
}

impl Session {
    fn is_initiator(&self, id: ID<Member>) -> bool {
        self.initiator.id() == id
    }
    /// Every invitee is in. Open sessions only start by force or timeout.
    fn is_ready(&self) -> bool {
        !self.open && self.roster.values().all(Entry::is_committed)
    }
    fn commit(&mut self, member: Member) -> Vec<Effect> {
        if !self.phase.is_forming() {
            return Vec::new();
        }
        if !self.open && !self.roster.contains_key(&member.id()) {
            return Vec::new();
        }
        let entry = self
            .roster
            .entry(member.id())
            .or_insert_with(|| Entry::new(member.clone()));
        if entry.is_committed() {
            return Vec::new();
        }
        entry.set_committed(true);
        self.pot += self.stake;
        log::info!("[session {}] {} called", self.id, member);
        vec![Effect::Transfer(Transfer::debit(member, self.stake))]
    }
    fn withdraw(&mut self, id: ID<Member>) -> Vec<Effect> {
        match self.roster.get_mut(&id).filter(|e| e.is_committed()) {
            None => Vec::new(),
            Some(entry) => {
                entry.set_committed(false);
                let member = entry.member().clone();
                self.pot -= self.stake;
                log::info!("[session {}] {} dropped out", self.id, member);
                vec![Effect::Transfer(Transfer::credit(member, self.stake))]
            }
        }
    }
    fn forfeit(&mut self, id: ID<Member>) -> Vec<Effect> {
        if !self.phase.is_active() {
            return Vec::new();
        }
        if let Some(entry) = self.roster.get_mut(&id).filter(|e| e.is_committed()) {
            entry.set_committed(false);
            log::info!("[session {}] {} lost", self.id, entry.member());
        }
        Vec::new()
    }
    /// Drops everyone who is out. Fewer than two left cancels the session.
    fn start(&mut self) -> Vec<Effect> {
        self.roster.retain(|_, e| e.is_committed());
        if self.roster.len() < MIN_ENTRANTS {
            log::info!("[session {}] not enough users entered the bet", self.id);
            return once(Effect::Notice(Notice::Shortfall))
                .chain(self.cancel())
                .collect();
        }
        // shown deadline only; the table arms the cutoff when this transition runs
        let ends = self.created + self.timers.active;
        self.phase = Phase::Active;
        self.ends = Some(ends);
        log::info!(
            "[session {}] bet started: total pot {}, must end before {}",
            self.id,
            self.pot,
            clock(ends)
        );
        vec![
            Effect::Notice(Notice::Started {
                pot: self.pot,
                ends,
            }),
            Effect::Arm,
        ]
    }
    /// Refunds everyone still in and closes the session without a result.
    fn cancel(&mut self) -> Vec<Effect> {
        let stake = self.stake;
        let refunds = self
            .roster
            .values_mut()
            .filter(|e| e.is_committed())
            .map(|e| {
                e.set_committed(false);
                Effect::Transfer(Transfer::credit(e.member().clone(), stake))
            })
            .collect::<Vec<_>>();
        self.phase = Phase::Cancelled;
        log::info!("[session {}] bet cancelled, points refunded", self.id);
        refunds
            .into_iter()
            .chain(once(Effect::Notice(Notice::Cancelled)))
            .collect()
    }
    /// One committed entry left is the winner; none left resolves without one.
    fn resolve(&mut self) {
        let mut standing = self
            .roster
            .values()
            .filter(|e| e.is_committed())
            .map(|e| e.member().id());
        let (first, second) = (standing.next(), standing.next());
        if second.is_none() {
            self.winner = first;
            self.phase = Phase::Resolved;
        }
    }
}

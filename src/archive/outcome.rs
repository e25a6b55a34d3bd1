use crate::members::Channel;
use crate::members::Member;
use crate::wager::Phase;
use crate::wager::Session;
use crate::*;
use serde::Serialize;
use std::time::SystemTime;

/// Result of a won session, as it is archived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    session: ID<Session>,
    channel: ID<Channel>,
    stake: Points,
    pot: Points,
    initiator: ID<Member>,
    winner: ID<Member>,
    started: SystemTime,
    participants: Vec<ID<Member>>,
}

impl Outcome {
    /// The record of a session that resolved with a winner, if it did.
    pub fn of(session: &Session) -> Option<Self> {
        session
            .winner()
            .filter(|_| session.phase() == Phase::Resolved)
            .map(|winner| Self {
                session: session.id(),
                channel: session.venue().channel(),
                stake: session.stake(),
                pot: session.pot(),
                initiator: session.initiator().id(),
                winner: winner.id(),
                started: session.created(),
                participants: session.roster().map(|e| e.member().id()).collect(),
            })
    }
    pub fn session(&self) -> ID<Session> {
        self.session
    }
    pub fn channel(&self) -> ID<Channel> {
        self.channel
    }
    pub fn stake(&self) -> Points {
        self.stake
    }
    pub fn pot(&self) -> Points {
        self.pot
    }
    pub fn initiator(&self) -> ID<Member> {
        self.initiator
    }
    pub fn winner(&self) -> ID<Member> {
        self.winner
    }
    pub fn started(&self) -> SystemTime {
        self.started
    }
    pub fn participants(&self) -> &[ID<Member>] {
        &self.participants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::members::Venue;
    use crate::wager::*;

    fn alice() -> Member {
        Member::new(1.into(), "alice")
    }
    fn bob() -> Member {
        Member::new(2.into(), "bob")
    }
    fn session() -> Session {
        let mut session = Session::new(
            3.into(),
            Venue::new(10.into(), 20.into()),
            alice(),
            15,
            Audience::Invited(vec![bob()]),
            TimerConfig::default(),
            SystemTime::UNIX_EPOCH,
        );
        session.apply(Command::Commit(alice()));
        session.apply(Command::Commit(bob()));
        session
    }

    #[test]
    fn only_won_sessions_have_outcomes() {
        let mut session = session();
        assert_eq!(session.phase(), Phase::Active);
        assert!(Outcome::of(&session).is_none());
        session.apply(Command::Forfeit(bob().id()));
        let outcome = Outcome::of(&session).expect("outcome");
        assert_eq!(outcome.winner(), alice().id());
        assert_eq!(outcome.initiator(), alice().id());
        assert_eq!(outcome.pot(), 30);
        assert_eq!(outcome.stake(), 15);
        assert_eq!(outcome.channel(), 10.into());
        assert_eq!(outcome.participants(), &[alice().id(), bob().id()]);
    }

    #[test]
    fn cancelled_sessions_have_none() {
        let mut session = session();
        session.apply(Command::Cancel(alice().id()));
        assert!(Outcome::of(&session).is_none());
    }
}

use crate::members::Member;
use crate::wager::*;
use crate::*;
use serde::Serialize;

/// One roster line of a status display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub member: ID<Member>,
    pub name: String,
    pub committed: bool,
}

/// The resolved winner and what they won beyond their own stake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Winner {
    pub member: ID<Member>,
    pub name: String,
    pub net: Points,
}

/// Everything a status display shows about a session at one instant.
/// Times are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub session: ID<Session>,
    pub phase: Phase,
    pub stake: Points,
    pub pot: Points,
    pub open: bool,
    pub seats: Vec<Seat>,
    pub created: u64,
    pub deadline: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
}

impl From<&Session> for Snapshot {
    fn from(session: &Session) -> Self {
        Self {
            session: session.id(),
            phase: session.phase(),
            stake: session.stake(),
            pot: session.pot(),
            open: session.is_open(),
            seats: session
                .roster()
                .map(|e| Seat {
                    member: e.member().id(),
                    name: e.member().name().to_string(),
                    committed: e.is_committed(),
                })
                .collect(),
            created: unix(session.created()),
            deadline: unix(session.deadline()),
            winner: session
                .winner()
                .filter(|_| session.phase() == Phase::Resolved)
                .map(|w| Winner {
                    member: w.id(),
                    name: w.name().to_string(),
                    net: session.pot() - session.stake(),
                }),
        }
    }
}

impl Snapshot {
    pub fn title(&self) -> String {
        match (&self.winner, self.phase) {
            (Some(w), _) => format!("{} won {} points", w.name, w.net),
            (None, Phase::Forming) if self.open => {
                format!("Bet ({}) Not Started (ANYONE CAN JOIN)", self.stake)
            }
            (None, Phase::Forming) => format!("Bet ({}) Not Started", self.stake),
            (None, phase) => format!("Bet ({}) {}", self.stake, phase),
        }
    }
    pub fn footer(&self) -> String {
        let at = clock(std::time::SystemTime::UNIX_EPOCH + seconds(self.deadline));
        match self.phase {
            Phase::Forming => format!("Bet starts at {}", at),
            Phase::Active => format!("Bet ends at {}", at),
            Phase::Resolved | Phase::Cancelled => format!("Bet ended, deadline was {}", at),
        }
    }
    /// Per-seat label: in/out while live, WINNER/LOSER on a winner card.
    pub fn label(&self, seat: &Seat) -> &'static str {
        match (&self.winner, seat.committed) {
            (Some(w), _) if w.member == seat.member => "WINNER",
            (Some(_), _) => "LOSER",
            (None, true) => "in",
            (None, false) => "out",
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize snapshot")
    }
}

use super::*;
use crate::book::Rejection;
use crate::members::Member;
use crate::*;
use std::collections::BTreeMap;

/// What admission may know about a live session.
/// Published by the processor after every cycle and read by submitters
/// under the channel lock, so they can reject a command without queueing it.
/// The processor re-checks everything when the command is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    phase: Phase,
    stake: Points,
    open: bool,
    initiator: ID<Member>,
    commitments: BTreeMap<ID<Member>, bool>,
}

impl From<&Session> for View {
    fn from(session: &Session) -> Self {
        Self {
            phase: session.phase(),
            stake: session.stake(),
            open: session.is_open(),
            initiator: session.initiator().id(),
            commitments: session
                .roster()
                .map(|e| (e.member().id(), e.is_committed()))
                .collect(),
        }
    }
}

impl View {
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn stake(&self) -> Points {
        self.stake
    }

    /// Maps an order onto the command it becomes, if this member may issue it now.
    /// Proposals are never admitted while the session holds the channel,
    /// which lasts until its settlement is done, not just until it turns terminal.
    pub fn admit(&self, author: &Member, order: Order) -> Result<Command, Rejection> {
        let status = self.commitments.get(&author.id()).copied();
        let eligible = status.is_some() || self.open;
        let committed = status.unwrap_or(false);
        let initiator = author.id() == self.initiator;
        match order {
            Order::Propose { .. } => Err(Rejection::SessionAlreadyExists),
            _ if self.phase.is_terminal() => Err(Rejection::NoActiveSession),
            Order::Status => Ok(Command::Status),
            Order::Start if initiator && self.phase.is_forming() => Ok(Command::Start(author.id())),
            Order::Cancel if initiator => Ok(Command::Cancel(author.id())),
            Order::Lose if committed && self.phase.is_active() => {
                Ok(Command::Forfeit(author.id()))
            }
            Order::Drop if committed && self.phase.is_active() => {
                Ok(Command::Forfeit(author.id()))
            }
            Order::Drop if committed => Ok(Command::Withdraw(author.id())),
            Order::Call if eligible && !committed && self.phase.is_forming() => {
                Ok(Command::Commit(author.clone()))
            }
            Order::Start | Order::Cancel | Order::Lose | Order::Drop | Order::Call => {
                Err(Rejection::IneligibleCommand)
            }
        }
    }
}

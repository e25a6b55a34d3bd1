use crate::ID;
use crate::members::Member;

/// Closed set of commands a session processor consumes, in queue order.
/// Member-issued variants carry the acting identity; timer variants carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Put the stake in. Carries the full member so open sessions can seat them.
    Commit(Member),
    /// Take the stake back before the start.
    Withdraw(ID<Member>),
    /// Concede after the start. The stake stays in the pot.
    Forfeit(ID<Member>),
    /// Start with whoever has committed so far.
    Start(ID<Member>),
    Cancel(ID<Member>),
    Status,
    FormingTimeout,
    ActiveTimeout,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Commit(member) => write!(f, "commit({})", member.id()),
            Self::Withdraw(id) => write!(f, "withdraw({})", id),
            Self::Forfeit(id) => write!(f, "forfeit({})", id),
            Self::Start(id) => write!(f, "start({})", id),
            Self::Cancel(id) => write!(f, "cancel({})", id),
            Self::Status => write!(f, "status"),
            Self::FormingTimeout => write!(f, "forming-timeout"),
            Self::ActiveTimeout => write!(f, "active-timeout"),
        }
    }
}

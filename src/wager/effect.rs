use crate::ID;
use crate::Points;
use crate::members::Member;
use std::time::SystemTime;

/// A signed balance delta for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    member: Member,
    delta: Points,
}

impl Transfer {
    pub fn credit(member: Member, amount: Points) -> Self {
        Self {
            member,
            delta: amount,
        }
    }
    pub fn debit(member: Member, amount: Points) -> Self {
        Self {
            member,
            delta: -amount,
        }
    }
    pub fn member(&self) -> &Member {
        &self.member
    }
    pub fn delta(&self) -> Points {
        self.delta
    }
}

/// Short channel messages that accompany transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Started { pot: Points, ends: SystemTime },
    Shortfall,
    Cancelled,
    Won { winner: ID<Member>, name: String, net: Points },
    Push,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Started { pot, ends } => write!(
                f,
                "Bet started: total pot {}. Must end before {}.",
                pot,
                crate::clock(*ends)
            ),
            Self::Shortfall => write!(f, "Not enough users entered the bet"),
            Self::Cancelled => write!(f, "Bet cancelled, points refunded"),
            Self::Won { name, net, .. } => write!(f, "{} won {} points", name, net),
            Self::Push => write!(f, "Nobody is left standing, stakes returned"),
        }
    }
}

/// What the shell must do after the core applied a command.
/// Effects are executed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Transfer(Transfer),
    Notice(Notice),
    /// Schedule the active-phase cutoff.
    Arm,
}

impl Effect {
    pub fn transfer(&self) -> Option<&Transfer> {
        match self {
            Self::Transfer(t) => Some(t),
            _ => None,
        }
    }
}

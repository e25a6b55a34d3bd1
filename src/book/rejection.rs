/// Why a submitted order was refused. Rejected orders never reach a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InvalidWager,
    NoEligibleParticipants,
    InsufficientFunds,
    IneligibleCommand,
    NoActiveSession,
    SessionAlreadyExists,
    RegistryRace,
    LedgerUnavailable,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWager => write!(f, "Invalid wager"),
            Self::NoEligibleParticipants => write!(f, "No users can participate in this bet"),
            Self::InsufficientFunds => write!(f, "Not enough points to call"),
            Self::IneligibleCommand => write!(
                f,
                "Not a valid command for the active bet, use call/drop/lose/start/cancel/status"
            ),
            Self::NoActiveSession => write!(f, "No active bet in this channel"),
            Self::SessionAlreadyExists => write!(f, "A bet is already running in this channel"),
            Self::RegistryRace => write!(f, "Another bet was created at the same time, try again"),
            Self::LedgerUnavailable => write!(f, "Balances are unavailable right now"),
        }
    }
}

impl std::error::Error for Rejection {}

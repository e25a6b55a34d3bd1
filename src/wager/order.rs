use crate::members::Member;

/// Who a proposal is addressed to, as resolved from mentions by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Anyone in the channel may call.
    Everyone,
    /// Only these members may call.
    Invited(Vec<Member>),
}

/// A proposal without mentions is open to everyone.
impl From<Vec<Member>> for Audience {
    fn from(members: Vec<Member>) -> Self {
        match members.is_empty() {
            true => Self::Everyone,
            false => Self::Invited(members),
        }
    }
}

/// What a member typed, before it is checked against the channel's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Order {
    /// Open a new session. The wager is kept raw and validated on admission.
    Propose { wager: String, audience: Audience },
    Call,
    Drop,
    Lose,
    Start,
    Cancel,
    Status,
}

impl Order {
    pub const USAGE: &'static str = "\
'bet help' - display this message
'bet status' - display the status of an active bet
'bet [value] [@user/role/everyone]' - create a bet (no target is the same as @everyone)
'bet call' - call the active bet
'bet drop' - drop out of a bet
'bet lose' - lose the bet
'bet start' - start a bet early, otherwise it starts 2 minutes after it's made or when every target is ready
'bet cancel' - cancel the active bet
(only the bet creator can start/cancel the bet)";

    /// Parses the arguments following the `bet` keyword.
    /// Returns None when the member asked for help or gave nothing.
    pub fn parse(args: &str, audience: Audience) -> Option<Self> {
        let word = args.split_whitespace().next()?;
        match word.to_lowercase().as_str() {
            "help" => None,
            "call" => Some(Self::Call),
            "drop" => Some(Self::Drop),
            "lose" => Some(Self::Lose),
            "start" => Some(Self::Start),
            "cancel" => Some(Self::Cancel),
            "status" => Some(Self::Status),
            _ => Some(Self::Propose {
                wager: word.to_string(),
                audience,
            }),
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Propose { wager, .. } => write!(f, "bet {}", wager),
            Self::Call => write!(f, "call"),
            Self::Drop => write!(f, "drop"),
            Self::Lose => write!(f, "lose"),
            Self::Start => write!(f, "start"),
            Self::Cancel => write!(f, "cancel"),
            Self::Status => write!(f, "status"),
        }
    }
}

use std::str::FromStr;

/// How a won session settles with its losers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Payout {
    /// Stakes were escrowed at commit; the winner takes the pot and nothing else moves.
    #[default]
    Escrow,
    /// Losers are charged their stake a second time at settlement.
    Surcharge,
}

impl FromStr for Payout {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "escrow" => Ok(Self::Escrow),
            "surcharge" => Ok(Self::Surcharge),
            other => Err(anyhow::anyhow!("unknown payout policy: {}", other)),
        }
    }
}

impl std::fmt::Display for Payout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Escrow => write!(f, "escrow"),
            Self::Surcharge => write!(f, "surcharge"),
        }
    }
}

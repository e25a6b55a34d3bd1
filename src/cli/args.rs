use crate::Points;
use crate::book::Config;
use crate::wager::Payout;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about = "Run betting sessions from the terminal", long_about = None)]
pub struct Args {
    /// Members who may bet, comma separated
    #[arg(long, value_delimiter = ',', default_value = "alice,bob,carol")]
    pub members: Vec<String>,
    /// Bot accounts, which can be mentioned but never invited
    #[arg(long, value_delimiter = ',', default_value = "robot")]
    pub bots: Vec<String>,
    /// Starting balance for every member
    #[arg(long, default_value_t = 1000)]
    pub balance: Points,
    /// Seconds before a forming bet starts on its own
    #[arg(long)]
    pub forming: Option<u64>,
    /// Seconds before an active bet is abandoned
    #[arg(long)]
    pub active: Option<u64>,
    /// Queued commands per bet
    #[arg(long)]
    pub capacity: Option<usize>,
    /// Settlement policy: escrow or surcharge
    #[arg(long)]
    pub payout: Option<Payout>,
    /// Keep balances and history in PostgreSQL (DB_URL)
    #[cfg(feature = "database")]
    #[arg(long)]
    pub database: bool,
}

impl Args {
    /// Environment first, flags on top.
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(secs) = self.forming {
            config.timers.forming = crate::seconds(secs);
        }
        if let Some(secs) = self.active {
            config.timers.active = crate::seconds(secs);
        }
        if let Some(capacity) = self.capacity.filter(|n| *n > 0) {
            config.capacity = capacity;
        }
        if let Some(payout) = self.payout {
            config.payout = payout;
        }
        config
    }
}

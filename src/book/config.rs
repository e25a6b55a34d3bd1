use crate::wager::Payout;
use crate::wager::TimerConfig;
use crate::*;
use std::str::FromStr;

/// Tunables shared by every session a [`super::Bookie`] opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub timers: TimerConfig,
    pub capacity: usize,
    pub payout: Payout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timers: TimerConfig::default(),
            capacity: QUEUE_CAPACITY,
            payout: Payout::default(),
        }
    }
}

impl Config {
    /// Reads `BET_FORMING_SECS`, `BET_ACTIVE_SECS`, `BET_QUEUE_CAPACITY` and `BET_PAYOUT`.
    /// Missing or unusable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Self {
            timers: TimerConfig {
                forming: parse::<u64, _>(&lookup, "BET_FORMING_SECS")
                    .map(seconds)
                    .unwrap_or(default.timers.forming),
                active: parse::<u64, _>(&lookup, "BET_ACTIVE_SECS")
                    .map(seconds)
                    .unwrap_or(default.timers.active),
            },
            capacity: parse::<usize, _>(&lookup, "BET_QUEUE_CAPACITY")
                .filter(|n| *n > 0)
                .unwrap_or(default.capacity),
            payout: parse::<Payout, _>(&lookup, "BET_PAYOUT").unwrap_or(default.payout),
        }
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {}={:?}, using default", key, raw);
            None
        }
    }
}

//! Concurrent betting sessions for chat channels.
//!
//! One member proposes a stake, others call or drop, and the session resolves
//! to a single winner or is cancelled, with points moved through an external
//! ledger. Each channel hosts at most one session at a time.
//!
//! ## Modules
//!
//! - [`wager`]: Session state machine, commands, timers and the per-session processor
//! - [`book`]: Per-channel registry and the [`book::Bookie`] submission surface
//! - [`ledger`]: Points balances
//! - [`notify`]: Status displays and channel replies
//! - [`archive`]: Records of finished sessions
//! - [`members`]: Member and venue identities
pub mod archive;
pub mod book;
pub mod ledger;
pub mod members;
pub mod notify;
pub mod wager;

#[cfg(feature = "database")]
pub mod database;

#[cfg(feature = "cli")]
pub mod cli;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Balances, stakes and pots.
pub type Points = i64;

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;
use std::time::Duration;
use std::time::SystemTime;

/// Platform snowflake with compile-time type safety.
/// Members, channels, guilds and sessions each get their own `ID<T>`.
pub struct ID<T> {
    inner: u64,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> u64 {
        self.inner
    }
}

impl<T> From<ID<T>> for u64 {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<u64> for ID<T> {
    fn from(inner: u64) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.inner)
    }
}

// ============================================================================
// SESSION PARAMETERS
// ============================================================================
/// Delay from proposal until the session starts on its own (seconds).
pub const FORMING_TIMEOUT: u64 = 120;
/// Delay from start until an unresolved session is abandoned (seconds).
pub const ACTIVE_TIMEOUT: u64 = 1800;
/// Bound on queued commands per session before submitters wait.
pub const QUEUE_CAPACITY: usize = 5;
/// Fewest committed participants a session may start with.
pub const MIN_ENTRANTS: usize = 2;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Seconds since the unix epoch, saturating at zero for pre-epoch clocks.
pub fn unix(time: SystemTime) -> u64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Wall-clock time of day, `HH:MM:SS UTC`.
pub fn clock(time: SystemTime) -> String {
    let s = unix(time) % 86400;
    format!("{:02}:{:02}:{:02} UTC", s / 3600, s / 60 % 60, s % 60)
}

/// Whole seconds as a Duration.
pub fn seconds(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", unix(SystemTime::now())))
            .expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// Open sessions are abandoned without refunds.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("listen for ctrl-c");
        println!();
        log::warn!("violent interrupt received, exiting immediately");
        std::process::exit(0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    struct Marker;
    #[test]
    fn ids_compare_by_snowflake() {
        let a = ID::<Marker>::from(7);
        let b = ID::<Marker>::from(7);
        let c = ID::<Marker>::from(9);
        assert_eq!(a, b);
        assert!(a < c);
        assert_eq!(u64::from(c), 9);
        assert_eq!(a.to_string(), "7");
    }
    #[test]
    fn ids_serialize_as_numbers() {
        let id = ID::<Marker>::from(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }
    #[test]
    fn unix_epoch_is_zero() {
        assert_eq!(unix(SystemTime::UNIX_EPOCH), 0);
        assert_eq!(unix(SystemTime::UNIX_EPOCH + seconds(90)), 90);
    }
    #[test]
    fn clock_wraps_days() {
        let t = SystemTime::UNIX_EPOCH + seconds(86400 + 3600 * 15 + 4 * 60 + 5);
        assert_eq!(clock(t), "15:04:05 UTC");
    }
}

//! Points balances that sessions draw stakes from and pay winnings into.
mod ledger;
mod memory;
#[cfg(feature = "database")]
mod postgres;

pub use ledger::*;
pub use memory::*;

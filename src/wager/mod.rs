//! Betting session state machine and its sequential processor.
//!
//! [`Session`] is the functional core: it applies one [`Command`] at a time and
//! answers with the [`Effect`]s the shell must carry out. [`Table`] is the
//! imperative shell that owns a session, drains its bounded queue, moves points
//! through the ledger and keeps the channel's status display fresh.
mod command;
mod effect;
mod entry;
mod order;
mod payout;
mod phase;
mod session;
mod table;
mod timer;
mod view;

pub use command::*;
pub use effect::*;
pub use entry::*;
pub use order::*;
pub use payout::*;
pub use phase::*;
pub use session::*;
pub use table::*;
pub use timer::*;
pub use view::*;

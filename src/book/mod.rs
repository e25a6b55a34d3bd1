//! Inbound surface: one session per channel, admission and creation.
//!
//! [`Bookie::submit`] takes the channel's lock from the [`Registry`], checks the
//! order against the live session's [`crate::wager::View`] and either enqueues
//! the resulting command or opens a new session. Nothing here mutates a session.
mod bookie;
mod config;
mod handle;
mod receipt;
mod registry;
mod rejection;

pub use bookie::*;
pub use config::*;
pub use handle::*;
pub use receipt::*;
pub use registry::*;
pub use rejection::*;

//! Visible status updates for a session's channel.
//!
//! The processor renders a [`Snapshot`] after every command and swaps it in for
//! the previous display through a [`Notifier`], which owns the platform side.
mod memory;
mod notifier;
mod snapshot;

pub use memory::*;
pub use notifier::*;
pub use snapshot::*;

use crate::ID;
use crate::wager::Session;

/// What an accepted order did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receipt {
    /// A new session now occupies the channel.
    Opened(ID<Session>),
    /// The command is in the live session's queue and will be applied in order.
    Queued,
}

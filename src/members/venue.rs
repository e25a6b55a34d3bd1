use crate::ID;

/// Marker for channel identifiers.
#[derive(Debug, Clone, Copy)]
pub struct Channel;
/// Marker for guild (server) identifiers, the scope ledger deltas are booked under.
#[derive(Debug, Clone, Copy)]
pub struct Guild;

/// Where a session lives: the channel it is bound to and the guild that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Venue {
    channel: ID<Channel>,
    guild: ID<Guild>,
}

impl Venue {
    pub fn new(channel: ID<Channel>, guild: ID<Guild>) -> Self {
        Self { channel, guild }
    }
    pub fn channel(&self) -> ID<Channel> {
        self.channel
    }
    pub fn guild(&self) -> ID<Guild> {
        self.guild
    }
}

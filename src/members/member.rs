use crate::ID;
use serde::Serialize;

/// A chat member as resolved by the platform adapter.
/// Carries what the session needs to address, display and screen them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    id: ID<Member>,
    name: String,
    bot: bool,
}

impl Member {
    pub fn new(id: ID<Member>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bot: false,
        }
    }
    /// An automated account. Bots are never invited into a session.
    pub fn bot(id: ID<Member>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bot: true,
        }
    }
    pub fn id(&self) -> ID<Member> {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_bot(&self) -> bool {
        self.bot
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

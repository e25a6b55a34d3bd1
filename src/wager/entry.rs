use crate::members::Member;
use serde::Serialize;

/// A seat on a session's roster and whether its stake is currently in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    member: Member,
    committed: bool,
}

impl Entry {
    pub fn new(member: Member) -> Self {
        Self {
            member,
            committed: false,
        }
    }
    pub fn member(&self) -> &Member {
        &self.member
    }
    pub fn is_committed(&self) -> bool {
        self.committed
    }
    pub fn set_committed(&mut self, committed: bool) {
        self.committed = committed;
    }
}

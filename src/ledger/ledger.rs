use crate::ID;
use crate::Points;
use crate::members::Guild;
use crate::members::Member;

/// External store of member balances.
/// Shared by every session, so implementations must tolerate concurrent calls.
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    /// Points a member can stake right now. Never negative.
    async fn balance(&self, member: ID<Member>) -> anyhow::Result<Points>;
    /// Applies a signed delta booked under a guild. Not idempotent.
    async fn adjust(&self, guild: ID<Guild>, member: &Member, delta: Points) -> anyhow::Result<()>;
}

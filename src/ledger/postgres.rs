use super::Ledger;
use crate::ID;
use crate::Points;
use crate::database::*;
use crate::members::Guild;
use crate::members::Member;
use std::sync::Arc;
use std::time::SystemTime;
use tokio_postgres::Client;

/// Balances live in the members table; every delta is also journaled
/// in the transfers table with the guild it was booked under.
#[async_trait::async_trait]
impl Ledger for Arc<Client> {
    async fn balance(&self, member: ID<Member>) -> anyhow::Result<Points> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT points FROM ", MEMBERS, " WHERE id = $1"),
                &[&(member.inner() as i64)],
            )
            .await?
            .map(|row| row.get::<_, i64>(0))
            .unwrap_or_default()
            .max(0))
    }
    async fn adjust(&self, guild: ID<Guild>, member: &Member, delta: Points) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                MEMBERS,
                " (id, name, points) VALUES ($1, $2, $3)
                ON CONFLICT (id) DO UPDATE
                SET points = ",
                MEMBERS,
                ".points + EXCLUDED.points, name = EXCLUDED.name"
            ),
            &[&(member.id().inner() as i64), &member.name(), &delta],
        )
        .await?;
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                TRANSFERS,
                " (guild_id, member_id, delta, at) VALUES ($1, $2, $3, $4)"
            ),
            &[
                &(guild.inner() as i64),
                &(member.id().inner() as i64),
                &delta,
                &SystemTime::now(),
            ],
        )
        .await
        .map(|_| ())
        .map_err(anyhow::Error::from)
    }
}

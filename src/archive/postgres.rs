use super::*;
use crate::database::*;
use std::sync::Arc;
use tokio_postgres::Client;

/// One bets row per won session, one bettors row per participant.
#[async_trait::async_trait]
impl Archive for Arc<Client> {
    async fn record(&self, outcome: &Outcome) -> anyhow::Result<()> {
        let id = self
            .query_one(
                const_format::concatcp!(
                    "INSERT INTO ",
                    BETS,
                    " (stake, pot, channel_id, starter_id, winner_id, started)
                    VALUES ($1, $2, $3, $4, $5, $6) RETURNING id"
                ),
                &[
                    &outcome.stake(),
                    &outcome.pot(),
                    &(outcome.channel().inner() as i64),
                    &(outcome.initiator().inner() as i64),
                    &(outcome.winner().inner() as i64),
                    &outcome.started(),
                ],
            )
            .await?
            .get::<_, i64>(0);
        for member in outcome.participants() {
            self.execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    BETTORS,
                    " (bet_id, member_id) VALUES ($1, $2)"
                ),
                &[&id, &(member.inner() as i64)],
            )
            .await?;
        }
        log::info!("[archive] recorded bet {} for session {}", id, outcome.session());
        Ok(())
    }
}

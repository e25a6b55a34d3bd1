//! PostgreSQL storage for balances and bet history.
//!
//! ## Connectivity
//!
//! - [`db()`]: Connects from `DB_URL` and creates any missing tables
//!
//! ## Tables
//!
//! - [`MEMBERS`]: one balance row per member, upserted on every delta
//! - [`TRANSFERS`]: journal of every applied delta with its guild
//! - [`BETS`]: one row per won session
//! - [`BETTORS`]: participants of each won session
mod schema;
mod traits;

pub use traits::*;

use crate::archive::Outcome;
use crate::members::Member;
use crate::wager::Transfer;
use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection and migrates the schema.
///
/// Connects to PostgreSQL using the `DB_URL` environment variable.
/// Returns an `Arc<Client>` suitable for sharing across tables, which
/// serves as both [`crate::ledger::Ledger`] and [`crate::archive::Archive`].
pub async fn db() -> anyhow::Result<Arc<Client>> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let ref url = std::env::var("DB_URL").map_err(|_| anyhow::anyhow!("DB_URL must be set"))?;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    migrate(&client).await?;
    Ok(Arc::new(client))
}

/// Creates missing tables and indices, in dependency order.
pub async fn migrate(client: &Client) -> Result<(), PgErr> {
    client.batch_execute(Member::creates()).await?;
    client.batch_execute(Transfer::creates()).await?;
    client.batch_execute(Outcome::creates()).await?;
    client.batch_execute(Transfer::indices()).await?;
    client.batch_execute(Outcome::indices()).await?;
    log::debug!("schema ready");
    Ok(())
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for member balances.
#[rustfmt::skip]
pub const MEMBERS:   &str = "members";
/// Table for the ledger journal.
#[rustfmt::skip]
pub const TRANSFERS: &str = "transfers";
/// Table for won bets.
#[rustfmt::skip]
pub const BETS:      &str = "bets";
/// Table for bet participants.
#[rustfmt::skip]
pub const BETTORS:   &str = "bettors";

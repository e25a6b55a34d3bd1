use super::Outcome;

/// Persistence for finished sessions.
#[async_trait::async_trait]
pub trait Archive: Send + Sync {
    /// Durably records a won session. Never called for cancellations.
    async fn record(&self, outcome: &Outcome) -> anyhow::Result<()>;
}

use super::*;
use tokio::sync::Mutex;

/// In-process archive.
#[derive(Debug, Default)]
pub struct Shelf {
    outcomes: Mutex<Vec<Outcome>>,
}

impl Shelf {
    pub async fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl Archive for Shelf {
    async fn record(&self, outcome: &Outcome) -> anyhow::Result<()> {
        self.outcomes.lock().await.push(outcome.clone());
        Ok(())
    }
}

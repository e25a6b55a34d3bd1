use super::Ledger;
use crate::ID;
use crate::Points;
use crate::members::Guild;
use crate::members::Member;
use std::collections::HashMap;
use std::collections::HashSet;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

/// One applied delta, as journaled by a [`Vault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub guild: ID<Guild>,
    pub member: ID<Member>,
    pub delta: Points,
}

/// In-process ledger with a journal of every movement.
#[derive(Debug, Default)]
pub struct Vault {
    balances: RwLock<HashMap<ID<Member>, Points>>,
    journal: Mutex<Vec<Movement>>,
    jammed: RwLock<HashSet<ID<Member>>>,
}

impl Vault {
    pub fn new<I>(balances: I) -> Self
    where
        I: IntoIterator<Item = (ID<Member>, Points)>,
    {
        Self {
            balances: RwLock::new(balances.into_iter().collect()),
            ..Self::default()
        }
    }
    /// Raw holding, which may dip below zero when losers are surcharged.
    pub async fn holding(&self, member: ID<Member>) -> Points {
        self.balances
            .read()
            .await
            .get(&member)
            .copied()
            .unwrap_or_default()
    }
    pub async fn journal(&self) -> Vec<Movement> {
        self.journal.lock().await.clone()
    }
    /// Makes every further lookup and adjustment for this member fail.
    pub async fn jam(&self, member: ID<Member>) {
        self.jammed.write().await.insert(member);
    }
}

#[async_trait::async_trait]
impl Ledger for Vault {
    async fn balance(&self, member: ID<Member>) -> anyhow::Result<Points> {
        if self.jammed.read().await.contains(&member) {
            return Err(anyhow::anyhow!("ledger unreachable for {}", member));
        }
        Ok(self.holding(member).await.max(0))
    }
    async fn adjust(&self, guild: ID<Guild>, member: &Member, delta: Points) -> anyhow::Result<()> {
        if self.jammed.read().await.contains(&member.id()) {
            return Err(anyhow::anyhow!("ledger rejected {} for {}", delta, member));
        }
        *self
            .balances
            .write()
            .await
            .entry(member.id())
            .or_default() += delta;
        self.journal.lock().await.push(Movement {
            guild,
            member: member.id(),
            delta,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Member {
        Member::new(1.into(), "alice")
    }

    #[tokio::test]
    async fn adjusts_and_journals() {
        let vault = Vault::new([(alice().id(), 100)]);
        vault.adjust(5.into(), &alice(), -30).await.unwrap();
        vault.adjust(5.into(), &alice(), 10).await.unwrap();
        assert_eq!(vault.balance(alice().id()).await.unwrap(), 80);
        assert_eq!(vault.journal().await.len(), 2);
        assert_eq!(vault.journal().await[0].delta, -30);
    }

    #[tokio::test]
    async fn balance_never_negative() {
        let vault = Vault::default();
        vault.adjust(5.into(), &alice(), -10).await.unwrap();
        assert_eq!(vault.holding(alice().id()).await, -10);
        assert_eq!(vault.balance(alice().id()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn jammed_members_fail() {
        let vault = Vault::new([(alice().id(), 100)]);
        vault.jam(alice().id()).await;
        assert!(vault.adjust(5.into(), &alice(), -10).await.is_err());
        assert!(vault.balance(alice().id()).await.is_err());
        assert_eq!(vault.holding(alice().id()).await, 100);
        assert!(vault.journal().await.is_empty());
    }
}

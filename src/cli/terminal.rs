use crate::ID;
use crate::members::Channel;
use crate::notify::*;
use colored::Colorize;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Notifier that prints status cards and replies to stdout.
#[derive(Debug, Default)]
pub struct Terminal {
    next: AtomicU64,
}

impl Terminal {
    /// A snapshot drawn as a few coloured lines.
    pub fn card(channel: ID<Channel>, snapshot: &Snapshot) -> String {
        let title = format!("#{} {}", channel, snapshot.title());
        let seats = snapshot
            .seats
            .iter()
            .map(|seat| {
                let label = match snapshot.label(seat) {
                    "WINNER" => "WINNER".green().bold(),
                    "LOSER" => "LOSER".red(),
                    "in" => "in".green(),
                    other => other.dimmed(),
                };
                format!("  {:<16} {}", seat.name, label)
            })
            .collect::<Vec<String>>()
            .join("\n");
        let footer = format!("pot {} | {}", snapshot.pot, snapshot.footer());
        format!("{}\n{}\n{}", title.yellow().bold(), seats, footer.dimmed())
    }
}

#[async_trait::async_trait]
impl Notifier for Terminal {
    async fn publish(&self, channel: ID<Channel>, snapshot: &Snapshot) -> anyhow::Result<Handle> {
        println!("{}", Self::card(channel, snapshot));
        Ok(Handle::new(channel, self.next.fetch_add(1, Ordering::Relaxed)))
    }
    async fn retract(&self, handle: Handle) -> anyhow::Result<()> {
        log::debug!("[terminal] display {} retracted", handle.message());
        Ok(())
    }
    async fn reply(&self, channel: ID<Channel>, text: &str) -> anyhow::Result<()> {
        println!("{} {}", format!("#{}", channel).dimmed(), text.bold());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::members::*;
    use crate::wager::*;
    use std::time::SystemTime;

    #[test]
    fn card_lists_every_seat() {
        let alice = Member::new(1.into(), "alice");
        let bob = Member::new(2.into(), "bob");
        let mut session = Session::new(
            1.into(),
            Venue::new(3.into(), 4.into()),
            alice.clone(),
            25,
            Audience::Invited(vec![bob.clone()]),
            TimerConfig::default(),
            SystemTime::UNIX_EPOCH,
        );
        session.apply(Command::Commit(alice));
        let card = Terminal::card(3.into(), &Snapshot::from(&session));
        assert!(card.contains("Bet (25) Not Started"));
        assert!(card.contains("alice"));
        assert!(card.contains("bob"));
        assert!(card.contains("pot 25"));
    }

    #[tokio::test]
    async fn handles_count_up() {
        let terminal = Terminal::default();
        let session = Session::new(
            1.into(),
            Venue::new(3.into(), 4.into()),
            Member::new(1.into(), "alice"),
            25,
            Audience::Everyone,
            TimerConfig::default(),
            SystemTime::UNIX_EPOCH,
        );
        let snapshot = Snapshot::from(&session);
        let a = terminal.publish(3.into(), &snapshot).await.unwrap();
        let b = terminal.publish(3.into(), &snapshot).await.unwrap();
        assert_eq!(b.message(), a.message() + 1);
        assert!(terminal.retract(a).await.is_ok());
    }
}

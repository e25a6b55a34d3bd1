use super::Directory;
use crate::ID;
use crate::members::*;
use crate::wager::Audience;
use crate::wager::Order;

/// Channel used when a line does not name one.
const LOBBY: u64 = 1;
/// Every demo channel belongs to the same guild.
const GUILD: u64 = 1;

/// One parsed line of input: `[#channel] <member> bet <args...>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub venue: Venue,
    pub author: Member,
    /// None when the member asked for help.
    pub order: Option<Order>,
}

impl Line {
    pub fn parse(input: &str, directory: &Directory) -> anyhow::Result<Self> {
        let mut words = input.split_whitespace().peekable();
        let channel = match words.next_if(|w| w.starts_with('#')) {
            Some(tag) => tag[1..]
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("bad channel {}", tag))?,
            None => LOBBY,
        };
        let name = words.next().ok_or_else(|| anyhow::anyhow!("who is betting?"))?;
        let author = directory
            .find(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown member {}", name))?;
        match words.next() {
            Some(word) if word.eq_ignore_ascii_case("bet") => {}
            _ => return Err(anyhow::anyhow!("expected '{} bet ...'", name)),
        }
        let (mentions, rest): (Vec<&str>, Vec<&str>) = words.partition(|w| w.starts_with('@'));
        let audience = match mentions.iter().any(|m| m.eq_ignore_ascii_case("@everyone")) {
            true => Audience::Everyone,
            false => mentions
                .iter()
                .map(|m| {
                    directory
                        .find(&m[1..])
                        .cloned()
                        .ok_or_else(|| anyhow::anyhow!("unknown member {}", m))
                })
                .collect::<anyhow::Result<Vec<Member>>>()?
                .into(),
        };
        Ok(Self {
            venue: Venue::new(ID::from(channel), ID::from(GUILD)),
            author,
            order: Order::parse(&rest.join(" "), audience),
        })
    }
}

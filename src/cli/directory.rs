use crate::members::Member;

/// Everyone the demo knows about, addressable by name.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    members: Vec<Member>,
}

impl Directory {
    /// Members are numbered from 1 in order, bots after them.
    pub fn new(members: &[String], bots: &[String]) -> Self {
        let humans = members.iter().map(|name| (false, name));
        let robots = bots.iter().map(|name| (true, name));
        Self {
            members: humans
                .chain(robots)
                .map(|(bot, name)| (bot, name.trim()))
                .filter(|(_, name)| !name.is_empty())
                .enumerate()
                .map(|(i, (bot, name))| match bot {
                    true => Member::bot((i as u64 + 1).into(), name),
                    false => Member::new((i as u64 + 1).into(), name),
                })
                .collect(),
        }
    }
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }
    /// Case-insensitive lookup.
    pub fn find(&self, name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_members_then_bots() {
        let names = ["alice".to_string(), " ".to_string(), "bob".to_string()];
        let directory = Directory::new(&names, &["robot".to_string()]);
        assert_eq!(directory.members().count(), 3);
        assert_eq!(directory.find("BOB").map(Member::id), Some(2.into()));
        assert!(directory.find("robot").is_some_and(Member::is_bot));
        assert!(directory.find("carol").is_none());
    }
}

//! Implements Schema directly on the types each table stores.
use super::*;

impl Schema for Member {
    fn name() -> &'static str {
        MEMBERS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            MEMBERS,
            " (
                id          BIGINT PRIMARY KEY,
                name        TEXT NOT NULL,
                points      BIGINT NOT NULL DEFAULT 0
            );"
        )
    }
    fn indices() -> &'static str {
        ""
    }
    fn truncates() -> &'static str {
        const_format::concatcp!("TRUNCATE TABLE ", MEMBERS, " CASCADE;")
    }
}

impl Schema for Transfer {
    fn name() -> &'static str {
        TRANSFERS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            TRANSFERS,
            " (
                id          BIGSERIAL PRIMARY KEY,
                guild_id    BIGINT NOT NULL,
                member_id   BIGINT NOT NULL REFERENCES ",
            MEMBERS,
            " (id),
                delta       BIGINT NOT NULL,
                at          TIMESTAMPTZ NOT NULL
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_",
            TRANSFERS,
            "_member ON ",
            TRANSFERS,
            " (member_id);"
        )
    }
    fn truncates() -> &'static str {
        const_format::concatcp!("TRUNCATE TABLE ", TRANSFERS, ";")
    }
}

/// Bets and their bettors are written together, so they migrate together.
impl Schema for Outcome {
    fn name() -> &'static str {
        BETS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            BETS,
            " (
                id          BIGSERIAL PRIMARY KEY,
                stake       BIGINT NOT NULL,
                pot         BIGINT NOT NULL,
                channel_id  BIGINT NOT NULL,
                starter_id  BIGINT NOT NULL,
                winner_id   BIGINT NOT NULL,
                started     TIMESTAMPTZ NOT NULL
            );
            CREATE TABLE IF NOT EXISTS ",
            BETTORS,
            " (
                bet_id      BIGINT NOT NULL REFERENCES ",
            BETS,
            " (id) ON DELETE CASCADE,
                member_id   BIGINT NOT NULL,
                PRIMARY KEY (bet_id, member_id)
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_",
            BETS,
            "_winner ON ",
            BETS,
            " (winner_id);
            CREATE INDEX IF NOT EXISTS idx_",
            BETTORS,
            "_member ON ",
            BETTORS,
            " (member_id);"
        )
    }
    fn truncates() -> &'static str {
        const_format::concatcp!("TRUNCATE TABLE ", BETTORS, ", ", BETS, ";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_name_their_tables() {
        assert!(Member::creates().contains("members"));
        assert!(Transfer::creates().contains("REFERENCES members"));
        assert!(Outcome::creates().contains("bettors"));
        assert!(Outcome::truncates().starts_with("TRUNCATE TABLE bettors"));
        assert_eq!(Transfer::name(), "transfers");
        assert!(Member::indices().is_empty());
    }
}

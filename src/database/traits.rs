/// Schema metadata for PostgreSQL tables.
///
/// Describes structure only; statements are built at compile time with
/// [`const_format::concatcp!`] and executed by [`super::migrate`].
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements, possibly empty.
    fn indices() -> &'static str;
    /// Returns `TRUNCATE TABLE` statement for clearing data.
    fn truncates() -> &'static str;
}

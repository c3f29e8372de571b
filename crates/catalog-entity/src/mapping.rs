//! Table mapping used by the generic persistence context.

use catalog_core::Entity;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};

/// A bound PostgreSQL statement.
pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Maps an entity onto a single table with a `SERIAL` key column.
///
/// Rows are decoded through `sqlx::FromRow`; writes bind the non-key
/// columns in the order given by [`COLUMNS`](TableMapping::COLUMNS).
pub trait TableMapping: Entity + for<'r> FromRow<'r, PgRow> + Unpin {
    /// Table name.
    const TABLE: &'static str;

    /// Primary key column.
    const KEY: &'static str = "id";

    /// Non-key columns, in bind order.
    const COLUMNS: &'static [&'static str];

    /// Bind every non-key column value onto `query`, in [`COLUMNS`](TableMapping::COLUMNS) order.
    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q>;

    /// `SELECT` listing the key and every mapped column.
    fn select_sql() -> String {
        format!(
            "SELECT {}, {} FROM {}",
            Self::KEY,
            Self::COLUMNS.join(", "),
            Self::TABLE
        )
    }

    /// `INSERT` of every mapped column, returning the generated key.
    fn insert_sql() -> String {
        let placeholders: Vec<String> = (1..=Self::COLUMNS.len())
            .map(|i| format!("${i}"))
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            Self::TABLE,
            Self::COLUMNS.join(", "),
            placeholders.join(", "),
            Self::KEY
        )
    }

    /// `UPDATE` of every mapped column; the key binds last.
    fn update_sql() -> String {
        let assignments: Vec<String> = Self::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 1))
            .collect();
        format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            Self::TABLE,
            assignments.join(", "),
            Self::KEY,
            Self::COLUMNS.len() + 1
        )
    }

    /// `DELETE` by key.
    fn delete_sql() -> String {
        format!("DELETE FROM {} WHERE {} = $1", Self::TABLE, Self::KEY)
    }
}

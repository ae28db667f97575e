pub mod orders;
pub mod products;

use sqlx::Executor;

// Design:
//
// Functions that execute multiple statements take `&mut PgTransaction` so
// the whole function succeeds or fails together. Functions that execute a
// single statement take `&mut PgConnection`. We call the parameter `ex`
// for `Executor`, the trait whose methods run the queries. PgTransaction
// derefs to PgConnection so callers can use either standalone or as part
// of a bigger transaction.
//
// For tests a useful pattern is to start a transaction at the beginning of
// the test, use it for all queries and never commit it. The uncommitted
// transaction is rolled back on drop, which lets postgres tests run in
// parallel without clearing tables first.

pub type PgTransaction<'a> = sqlx::Transaction<'a, sqlx::Postgres>;

/// The names of the tables this service uses.
pub const TABLES: &[&str] = &["orders", "products"];

/// Notification channels raised by the triggers in `database/sql`. One
/// channel per table; the payload is the row id but consumers only use the
/// notification as a refetch signal.
pub const ORDERS_CHANNEL: &str = "orders_changed";
pub const PRODUCTS_CHANNEL: &str = "products_changed";

/// Delete all data in the database. Only used by tests.
#[allow(non_snake_case)]
pub async fn clear_DANGER_(ex: &mut PgTransaction<'_>) -> Result<(), sqlx::Error> {
    for table in TABLES {
        ex.execute(format!("TRUNCATE {table};").as_str()).await?;
    }
    Ok(())
}

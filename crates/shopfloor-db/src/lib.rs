//! SQLite storage layer for the shopfloor schema.
//!
//! Provides connection pooling (via `r2d2`), WAL-mode initialization,
//! embedded SQL migrations, and read-only query handles for the four
//! tables: `employees`, `lines`, `products`, and `work_orders`.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: the schema is small and read-dominated; WAL
//!   mode allows concurrent readers with a single writer, and no external
//!   database process is required.
//! - **`r2d2` connection pool**: bounded connection reuse without manual
//!   lifetime management. Connections are acquired per query and returned
//!   to the pool when dropped.
//! - **Embedded migrations**: SQL files are compiled into the binary via
//!   `include_str!`, so the schema ships with the code that depends on it.
//!   The two foreign keys on `work_orders` live here; referential integrity
//!   is enforced by the backend (`PRAGMA foreign_keys = ON`), never by
//!   application logic.
//!
//! This crate never writes domain rows. The backend is populated externally;
//! the only writes performed here are the migrations themselves.

mod migrations;
mod pool;
pub mod queries;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
pub use queries::StoreError;

//! The employee name report: the one operation this binary performs.
//!
//! Fetches every row from `employees`, writes one name per line in the
//! backend's natural return order, then writes the elapsed wall-clock time
//! of the whole operation. The label on the timing line is cosmetic; the
//! contract is one name per line followed by `<label>: <integer> ms`.

use std::io::Write;
use std::time::Instant;

use shopfloor_db::{queries, DbPool};
use thiserror::Error;

/// Label printed before the elapsed milliseconds.
const TIMING_LABEL: &str = "query time";

/// Errors that can occur while producing the report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to acquire a pooled connection.
    #[error("failed to get database connection: {0}")]
    Connection(#[from] r2d2::Error),

    /// The employee query failed.
    #[error(transparent)]
    Store(#[from] shopfloor_db::StoreError),

    /// Writing to the output failed.
    #[error("failed to write report output: {0}")]
    Output(#[from] std::io::Error),
}

/// Prints every employee name, one per line, followed by a timing line.
///
/// The connection is acquired from the pool for the duration of the single
/// query and returned when it drops. An empty table produces no name lines,
/// just the timing line.
///
/// # Errors
///
/// Returns `ReportError` if the connection cannot be acquired, the query
/// fails, or the writer rejects output.
pub fn print_employee_names(pool: &DbPool, out: &mut impl Write) -> Result<(), ReportError> {
    let started = Instant::now();

    let employees = {
        let conn = pool.get()?;
        queries::list_employees(&conn)?
    };

    tracing::debug!(count = employees.len(), "fetched employees");

    for employee in &employees {
        writeln!(out, "{}", employee.name)?;
    }

    writeln!(out, "{TIMING_LABEL}: {} ms", started.elapsed().as_millis())?;

    Ok(())
}

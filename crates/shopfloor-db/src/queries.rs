//! Read-only query handles for the shopfloor tables.
//!
//! One listing function and one by-id lookup per table, plus the derived
//! reverse lookups from a line or product to its work orders. All functions
//! take a borrowed [`Connection`] (typically freshly acquired from the pool)
//! and return materialized rows; nothing here holds state between calls.
//!
//! Rows come back in rowid order, which is the backend's natural return
//! order for these unfiltered scans.

use rusqlite::{params, Connection, Row};
use thiserror::Error;

use shopfloor_types::{Employee, Line, Product, WorkOrder, WorkOrderStatus};

/// Errors that can occur while reading the shopfloor tables.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database operation failed.
    #[error("shopfloor database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Lists all employees.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn list_employees(conn: &Connection) -> Result<Vec<Employee>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, name FROM employees")?;
    let rows = stmt.query_map([], |row| {
        Ok(Employee {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Fetches a single employee by id.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn get_employee(conn: &Connection, id: i64) -> Result<Option<Employee>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, name FROM employees WHERE id = ?1")?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(row) => Ok(Some(Employee {
            id: row.get(0)?,
            name: row.get(1)?,
        })),
        None => Ok(None),
    }
}

/// Lists all production lines.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn list_lines(conn: &Connection) -> Result<Vec<Line>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, name, location FROM lines")?;
    let rows = stmt.query_map([], |row| {
        Ok(Line {
            id: row.get(0)?,
            name: row.get(1)?,
            location: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Fetches a single production line by id.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn get_line(conn: &Connection, id: i64) -> Result<Option<Line>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, name, location FROM lines WHERE id = ?1")?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(row) => Ok(Some(Line {
            id: row.get(0)?,
            name: row.get(1)?,
            location: row.get(2)?,
        })),
        None => Ok(None),
    }
}

/// Lists all products.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn list_products(conn: &Connection) -> Result<Vec<Product>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, code, name, category FROM products")?;
    let rows = stmt.query_map([], |row| {
        Ok(Product {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
            category: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Fetches a single product by id.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn get_product(conn: &Connection, id: i64) -> Result<Option<Product>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, code, name, category FROM products WHERE id = ?1")?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(row) => Ok(Some(Product {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
            category: row.get(3)?,
        })),
        None => Ok(None),
    }
}

const WORK_ORDER_COLUMNS: &str =
    "id, order_number, created_at, quantity, status, line_id, product_id";

/// Maps a `work_orders` row to a [`WorkOrder`].
///
/// A stored status label that fails to parse is surfaced as a
/// `FromSqlConversionFailure` on the status column, so callers see it as a
/// row-conversion error rather than a silently invalid entity.
fn work_order_from_row(row: &Row<'_>) -> rusqlite::Result<WorkOrder> {
    let status_label: String = row.get(4)?;
    let status = WorkOrderStatus::parse(&status_label).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            4, // index of status
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;

    Ok(WorkOrder {
        id: row.get(0)?,
        order_number: row.get(1)?,
        created_at: row.get(2)?,
        quantity: row.get(3)?,
        status,
        line_id: row.get(5)?,
        product_id: row.get(6)?,
    })
}

/// Lists all work orders.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure or if a stored status
/// label is not recognized.
pub fn list_work_orders(conn: &Connection) -> Result<Vec<WorkOrder>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {WORK_ORDER_COLUMNS} FROM work_orders"))?;
    let rows = stmt.query_map([], work_order_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Fetches a single work order by id.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure or if the stored status
/// label is not recognized.
pub fn get_work_order(conn: &Connection, id: i64) -> Result<Option<WorkOrder>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE id = ?1"
    ))?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(row) => Ok(Some(work_order_from_row(row)?)),
        None => Ok(None),
    }
}

/// Lists the work orders scheduled on a given line.
///
/// This is the query-time reverse of the `work_orders.line_id` foreign key.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure or if a stored status
/// label is not recognized.
pub fn work_orders_for_line(conn: &Connection, line_id: i64) -> Result<Vec<WorkOrder>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE line_id = ?1"
    ))?;
    let rows = stmt.query_map(params![line_id], work_order_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Lists the work orders producing a given product.
///
/// This is the query-time reverse of the `work_orders.product_id` foreign key.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure or if a stored status
/// label is not recognized.
pub fn work_orders_for_product(
    conn: &Connection,
    product_id: i64,
) -> Result<Vec<WorkOrder>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE product_id = ?1"
    ))?;
    let rows = stmt.query_map(params![product_id], work_order_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

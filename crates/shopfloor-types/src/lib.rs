//! Shared entity types for the shopfloor data-access layer.
//!
//! These are plain data carriers mirroring the storage schema. Rows are
//! materialized per query and discarded after use; nothing in this workspace
//! mutates or persists them. The only behavior here is the conversion
//! between the stored `status` text and [`WorkOrderStatus`].
//!
//! Relationships are one-directional: `WorkOrder` holds the `line_id` and
//! `product_id` foreign keys, and the reverse direction (a line's or
//! product's work orders) is served by query-time lookups in `shopfloor-db`
//! rather than in-memory back-references.

use serde::{Deserialize, Serialize};

/// An employee, identified by id and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Row identifier (unique).
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// A physical or logical production line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Row identifier (unique).
    pub id: i64,
    /// Line name.
    pub name: String,
    /// Where the line is located.
    pub location: String,
}

/// A catalog item that work orders produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Row identifier (unique).
    pub id: i64,
    /// Catalog code.
    pub code: String,
    /// Product name.
    pub name: String,
    /// Catalog category.
    pub category: String,
}

/// A manufacturing task: produce `quantity` of a product on a line.
///
/// `line_id` and `product_id` are foreign keys into `lines` and `products`;
/// the schema guarantees both resolve to existing rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Row identifier (unique).
    pub id: i64,
    /// Human-facing order number.
    pub order_number: String,
    /// Creation timestamp as stored (SQLite `datetime('now')` text).
    pub created_at: String,
    /// Units to produce.
    pub quantity: i64,
    /// Current lifecycle status.
    pub status: WorkOrderStatus,
    /// Foreign key into `lines`.
    pub line_id: i64,
    /// Foreign key into `products`.
    pub product_id: i64,
}

/// Lifecycle status of a work order, stored as TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    /// Scheduled but not yet released to the floor.
    Planned,
    /// Released to a line, not yet started.
    Released,
    /// Currently in production.
    InProgress,
    /// All units produced.
    Completed,
    /// Abandoned before completion.
    Cancelled,
}

impl WorkOrderStatus {
    /// Returns the storage label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::Released => "RELEASED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Attempts to convert a storage label to a `WorkOrderStatus`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseStatusError`] if the label is not a known status.
    pub fn parse(label: &str) -> Result<Self, ParseStatusError> {
        match label {
            "PLANNED" => Ok(Self::Planned),
            "RELEASED" => Ok(Self::Released),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(ParseStatusError {
                label: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkOrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error returned when a stored status label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown work order status: '{label}'")]
pub struct ParseStatusError {
    /// The label that failed to parse.
    pub label: String,
}

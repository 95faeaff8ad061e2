//! Tree entity model.

use arbor_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `trees` table, serialized as-is to clients.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Tree {
    pub id: DbId,
    pub species: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub purchase_cost: Option<f64>,
    pub purchase_date: Option<Date>,
    pub planted_date: Option<Date>,
    pub age: Option<i64>,
    pub created_at: Timestamp,
    pub owner_id: String,
}

//! Repository for the `trees` table.

use arbor_core::tree::{NewTree, TreePatch};
use arbor_core::types::DbId;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::tree::Tree;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, species, name, description, purchase_cost, purchase_date, \
                       planted_date, age, created_at, owner_id";

/// Provides CRUD operations for trees.
///
/// Every write is a single statement, so each one commits atomically.
pub struct TreeRepo;

impl TreeRepo {
    /// Insert a new tree owned by `owner_id`, returning the created row.
    ///
    /// `id` comes from the rowid sequence and `created_at` is the current time.
    pub async fn create(
        pool: &SqlitePool,
        owner_id: &str,
        input: &NewTree,
    ) -> Result<Tree, sqlx::Error> {
        let query = format!(
            "INSERT INTO trees (species, name, description, purchase_cost, purchase_date,
                                planted_date, age, created_at, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(&input.species)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.purchase_cost)
            .bind(input.purchase_date)
            .bind(input.planted_date)
            .bind(input.age)
            .bind(chrono::Utc::now())
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find a tree by id regardless of owner.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Tree>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trees WHERE id = $1");
        sqlx::query_as::<_, Tree>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every tree owned by `owner_id` in insertion order.
    pub async fn list_by_owner(pool: &SqlitePool, owner_id: &str) -> Result<Vec<Tree>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trees WHERE owner_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Tree>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update to a tree owned by `owner_id`.
    ///
    /// Only the columns present in `patch` are written. Returns `None` if
    /// no row matches both `id` and `owner_id`. An empty patch writes
    /// nothing and returns the current row.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        owner_id: &str,
        patch: &TreePatch,
    ) -> Result<Option<Tree>, sqlx::Error> {
        if patch.is_empty() {
            let query = format!("SELECT {COLUMNS} FROM trees WHERE id = $1 AND owner_id = $2");
            return sqlx::query_as::<_, Tree>(&query)
                .bind(id)
                .bind(owner_id)
                .fetch_optional(pool)
                .await;
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE trees SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(species) = &patch.species {
                set.push("species = ").push_bind_unseparated(species.clone());
            }
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(description) = &patch.description {
                set.push("description = ")
                    .push_bind_unseparated(description.clone());
            }
            if let Some(cost) = patch.purchase_cost {
                set.push("purchase_cost = ").push_bind_unseparated(cost);
            }
            if let Some(date) = patch.purchase_date {
                set.push("purchase_date = ").push_bind_unseparated(date);
            }
            if let Some(date) = patch.planted_date {
                set.push("planted_date = ").push_bind_unseparated(date);
            }
            if let Some(age) = patch.age {
                set.push("age = ").push_bind_unseparated(age);
            }
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND owner_id = ")
            .push_bind(owner_id.to_string())
            .push(format!(" RETURNING {COLUMNS}"));

        builder
            .build_query_as::<Tree>()
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a tree owned by `owner_id`. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId, owner_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trees WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

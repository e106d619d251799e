//! Repository for the `category` table.

use sqlx::{PgConnection, PgPool};
use kanban_core::types::DbId;

use crate::models::category::{Category, CreateCategory, RenameCategory};
use crate::repositories::sibling_order::{self, SiblingScope};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, \"order\"";

/// Provides CRUD and ordering operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    ///
    /// The row takes the column default (the sentinel order) and sorts after
    /// every placed category until the scope is next renumbered.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!("INSERT INTO category (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM category WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories ordered by `order`, then id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM category ORDER BY \"order\", id");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Rename a category.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        input: &RenameCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("UPDATE category SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Move a category to 1-based `target` and renumber every category.
    ///
    /// Returns the moved category with its new order, or `None` if no row
    /// with the given `id` exists.
    pub async fn reorder(
        pool: &PgPool,
        id: DbId,
        target: usize,
    ) -> Result<Option<Category>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if Self::lock(&mut tx, id).await?.is_none() {
            return Ok(None);
        }
        sibling_order::move_to(&mut tx, SiblingScope::Categories, id, target).await?;
        let category = Self::lock(&mut tx, id).await?;

        tx.commit().await?;
        Ok(category)
    }

    /// Delete a category.
    ///
    /// Cards still attached to it are detached first (their `category_id`
    /// becomes NULL) and the remaining categories are renumbered, all in one
    /// transaction. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let detached = sqlx::query("UPDATE card SET category_id = NULL WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let removed = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if removed == 0 {
            return Ok(false);
        }

        sibling_order::compact(&mut tx, SiblingScope::Categories).await?;

        tx.commit().await?;
        tracing::debug!(category_id = id, detached, "Deleted category");
        Ok(true)
    }

    /// Fetch a category row inside a transaction, locking it.
    async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM category WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }
}

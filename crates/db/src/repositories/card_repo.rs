//! Repository for the `card` table.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use kanban_core::card_status::detaches_category;
use kanban_core::types::DbId;

use crate::models::card::{Card, CardWithCategory, CreateCard, UpdateCard};
use crate::models::category::Category;
use crate::repositories::category_repo::CategoryRepo;
use crate::repositories::sibling_order::{self, SiblingScope};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, \"order\", status, category_id, created_at, updated_at";

/// Provides CRUD, ordering and re-categorization operations for cards.
pub struct CardRepo;

impl CardRepo {
    /// Insert a new card attached to `input.category_id`.
    ///
    /// Returns `None`, inserting nothing, if the category does not exist.
    /// The category row is share-locked so it cannot disappear before commit.
    pub async fn create(pool: &PgPool, input: &CreateCard) -> Result<Option<Card>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let category_exists =
            sqlx::query_scalar::<_, DbId>("SELECT id FROM category WHERE id = $1 FOR SHARE")
                .bind(input.category_id)
                .fetch_optional(&mut *tx)
                .await?
                .is_some();
        if !category_exists {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO card (name, description, category_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let card = sqlx::query_as::<_, Card>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(card))
    }

    /// Find a card by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM card WHERE id = $1");
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a card by ID, enriched with its category.
    pub async fn find_by_id_with_category(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CardWithCategory>, sqlx::Error> {
        let Some(card) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let category = match card.category_id {
            Some(category_id) => CategoryRepo::find_by_id(pool, category_id).await?,
            None => None,
        };
        Ok(Some(CardWithCategory { card, category }))
    }

    /// List all cards, grouped by category then ordered within it.
    ///
    /// Detached cards come last.
    pub async fn list(pool: &PgPool) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM card ORDER BY category_id NULLS LAST, \"order\", id"
        );
        sqlx::query_as::<_, Card>(&query).fetch_all(pool).await
    }

    /// List all cards with their categories attached.
    pub async fn list_with_category(pool: &PgPool) -> Result<Vec<CardWithCategory>, sqlx::Error> {
        let cards = Self::list(pool).await?;
        let categories: HashMap<DbId, Category> = CategoryRepo::list(pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(cards
            .into_iter()
            .map(|card| {
                let category = card
                    .category_id
                    .and_then(|id| categories.get(&id).cloned());
                CardWithCategory { card, category }
            })
            .collect())
    }

    /// List the cards of one category in board order.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM card WHERE category_id = $1 ORDER BY \"order\", id"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Partially update a card. Only non-`None` fields are applied.
    ///
    /// A supplied status detaches the card from its category; the cards left
    /// behind are renumbered in the same transaction. Returns `None` if no
    /// row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCard,
    ) -> Result<Option<Card>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(previous) = Self::lock(&mut tx, id).await? else {
            return Ok(None);
        };
        let detach = detaches_category(input.status.as_deref());

        let query = format!(
            "UPDATE card SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                status = COALESCE($4, status), \
                category_id = CASE WHEN $5::BOOLEAN THEN NULL ELSE category_id END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let card = sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(detach)
            .fetch_one(&mut *tx)
            .await?;

        if let (true, Some(old_category)) = (detach, previous.category_id) {
            sibling_order::compact(&mut tx, SiblingScope::CardsIn(old_category)).await?;
        }

        tx.commit().await?;
        Ok(Some(card))
    }

    /// Move a card to 1-based `target` within `category_id` and renumber
    /// that category's cards.
    ///
    /// Returns `None` if the card does not exist or is no longer attached to
    /// `category_id`.
    pub async fn reorder(
        pool: &PgPool,
        id: DbId,
        category_id: DbId,
        target: usize,
    ) -> Result<Option<Card>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        match Self::lock(&mut tx, id).await? {
            Some(card) if card.category_id == Some(category_id) => {}
            _ => return Ok(None),
        }
        sibling_order::move_to(&mut tx, SiblingScope::CardsIn(category_id), id, target).await?;
        let card = Self::lock(&mut tx, id).await?;

        tx.commit().await?;
        Ok(card)
    }

    /// Attach a card to `category_id` at 1-based `target`.
    ///
    /// One transaction covers the reassignment, the renumbering of the
    /// category the card left and the splice into the new one, so no reader
    /// sees the card in its new category with an unassigned order. A
    /// category deleted concurrently surfaces as a foreign key violation.
    /// Returns `None` if the card does not exist.
    pub async fn categorize(
        pool: &PgPool,
        id: DbId,
        category_id: DbId,
        target: usize,
    ) -> Result<Option<Card>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(previous) = Self::lock(&mut tx, id).await? else {
            return Ok(None);
        };

        sqlx::query("UPDATE card SET category_id = $2 WHERE id = $1")
            .bind(id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        if let Some(old_category) = previous.category_id.filter(|old| *old != category_id) {
            sibling_order::compact(&mut tx, SiblingScope::CardsIn(old_category)).await?;
        }
        sibling_order::move_to(&mut tx, SiblingScope::CardsIn(category_id), id, target).await?;
        let card = Self::lock(&mut tx, id).await?;

        tx.commit().await?;
        Ok(card)
    }

    /// Delete a card.
    ///
    /// The card is detached before the row is removed and its former
    /// category is renumbered. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(previous) = Self::lock(&mut tx, id).await? else {
            return Ok(false);
        };

        sqlx::query("UPDATE card SET category_id = NULL WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let removed = sqlx::query("DELETE FROM card WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if removed != 1 {
            return Ok(false);
        }

        if let Some(old_category) = previous.category_id {
            sibling_order::compact(&mut tx, SiblingScope::CardsIn(old_category)).await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Fetch a card row inside a transaction, locking it.
    async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM card WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }
}

//! Transactional persistence for ordered sibling scopes.
//!
//! Scope membership is never stored as a list: it is rebuilt by query from
//! the foreign key (or, for categories, the whole table) on every move. All
//! functions here take a connection borrowed from an open transaction; the
//! caller commits.

use sqlx::PgConnection;
use kanban_core::ordering::{dense_orders, is_dense, plan_move};
use kanban_core::types::DbId;

/// A set of rows whose `order` values must stay dense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingScope {
    /// Every row of the `category` table.
    Categories,
    /// Every card attached to the given category.
    CardsIn(DbId),
}

impl SiblingScope {
    fn table(self) -> &'static str {
        match self {
            SiblingScope::Categories => "category",
            SiblingScope::CardsIn(_) => "card",
        }
    }

    fn category_id(self) -> Option<DbId> {
        match self {
            SiblingScope::Categories => None,
            SiblingScope::CardsIn(id) => Some(id),
        }
    }
}

/// Lock and load the ids of a scope, sorted by current `(order, id)`,
/// leaving out `exclude` if given.
///
/// Rows created with the sentinel order sort last; ties break on id so the
/// result is deterministic.
pub async fn load_ids(
    conn: &mut PgConnection,
    scope: SiblingScope,
    exclude: Option<DbId>,
) -> Result<Vec<DbId>, sqlx::Error> {
    let query = match scope {
        SiblingScope::Categories => {
            "SELECT id FROM category \
             WHERE ($1::BIGINT IS NULL OR id <> $1) \
             ORDER BY \"order\", id \
             FOR UPDATE"
        }
        SiblingScope::CardsIn(_) => {
            "SELECT id FROM card \
             WHERE category_id = $2 AND ($1::BIGINT IS NULL OR id <> $1) \
             ORDER BY \"order\", id \
             FOR UPDATE"
        }
    };
    let mut q = sqlx::query_scalar::<_, DbId>(query).bind(exclude);
    if let Some(category_id) = scope.category_id() {
        q = q.bind(category_id);
    }
    q.fetch_all(&mut *conn).await
}

/// Write a full `(id, order)` assignment in one statement.
pub async fn persist(
    conn: &mut PgConnection,
    scope: SiblingScope,
    assignments: &[(DbId, i32)],
) -> Result<(), sqlx::Error> {
    if assignments.is_empty() {
        return Ok(());
    }
    let ids: Vec<DbId> = assignments.iter().map(|(id, _)| *id).collect();
    let orders: Vec<i32> = assignments.iter().map(|(_, order)| *order).collect();

    let query = format!(
        "UPDATE {table} AS t SET \"order\" = v.new_order \
         FROM UNNEST($1::BIGINT[], $2::INT[]) AS v(id, new_order) \
         WHERE t.id = v.id AND t.\"order\" <> v.new_order",
        table = scope.table()
    );
    sqlx::query(&query)
        .bind(&ids)
        .bind(&orders)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Move `moving_id` to 1-based `target` within `scope` and renumber the
/// whole scope `1..=N`.
///
/// `moving_id` must already belong to `scope` (for cards: its `category_id`
/// must already point at the scope's category).
pub async fn move_to(
    conn: &mut PgConnection,
    scope: SiblingScope,
    moving_id: DbId,
    target: usize,
) -> Result<(), sqlx::Error> {
    let siblings = load_ids(conn, scope, Some(moving_id)).await?;
    let plan = plan_move(siblings, moving_id, target);
    debug_assert!(is_dense(&plan_orders(&plan)));
    persist(conn, scope, &plan).await?;
    tracing::debug!(
        ?scope,
        moving_id,
        position = target,
        size = plan.len(),
        "Renumbered sibling scope"
    );
    Ok(())
}

/// Renumber `scope` `1..=N` keeping the current relative order.
///
/// Used after a member leaves the scope so the remaining rows close the gap.
pub async fn compact(conn: &mut PgConnection, scope: SiblingScope) -> Result<(), sqlx::Error> {
    let ids = load_ids(conn, scope, None).await?;
    let plan = dense_orders(ids);
    debug_assert!(is_dense(&plan_orders(&plan)));
    persist(conn, scope, &plan).await?;
    tracing::debug!(?scope, size = plan.len(), "Compacted sibling scope");
    Ok(())
}

fn plan_orders(plan: &[(DbId, i32)]) -> Vec<i32> {
    plan.iter().map(|&(_, order)| order).collect()
}

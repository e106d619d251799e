//! HTTP-level integration tests for the `/cards` endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete, get, post_json, put_json, seed_cards, seed_categories,
};
use serde_json::json;
use sqlx::PgPool;

/// Names and orders of the cards of one category, in board order.
async fn board_column(pool: &PgPool, category_id: i64) -> Vec<(String, i64)> {
    let json = body_json(get(build_test_app(pool.clone()), "/cards").await).await;
    let mut column: Vec<(String, i64)> = json
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["category_id"].as_i64() == Some(category_id))
        .map(|c| {
            (
                c["name"].as_str().unwrap().to_string(),
                c["order"].as_i64().unwrap(),
            )
        })
        .collect();
    column.sort_by_key(|(_, order)| *order);
    column
}

fn named(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
    pairs.iter().map(|(n, o)| (n.to_string(), *o)).collect()
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_card_returns_201(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;

    let response = post_json(
        build_test_app(pool),
        "/cards",
        json!({"categoryId": cats[0], "name": "Write docs", "description": "README"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Write docs");
    assert_eq!(json["description"], "README");
    assert_eq!(json["category_id"], cats[0]);
    assert_eq!(json["order"], 999999);
    assert!(json["created_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_card_with_unknown_category_returns_400(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/cards",
        json!({"categoryId": 4242, "name": "Orphan"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REFERENCE");

    let json = body_json(get(build_test_app(pool), "/cards").await).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_card_with_missing_fields_returns_400(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;

    for body in [json!({"name": "No category"}), json!({"categoryId": cats[0]}), json!({})] {
        let response = post_json(build_test_app(pool.clone()), "/cards", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_cards_attaches_category(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    seed_cards(&pool, cats[0], &["A", "B"]).await;

    let response = get(build_test_app(pool), "/cards").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    for card in arr {
        assert_eq!(card["category"]["name"], "To do");
        assert_eq!(card["category"]["id"], cats[0]);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_card_returns_single_element_array(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    let cards = seed_cards(&pool, cats[0], &["A"]).await;

    let response = get(build_test_app(pool), &format!("/cards/{}", cards[0])).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "A");
    assert_eq!(json[0]["category"]["name"], "To do");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_unknown_card_returns_400(pool: PgPool) {
    let response = get(build_test_app(pool), "/cards/999999").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_legacy_todos_lists_cards_without_category(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    seed_cards(&pool, cats[0], &["A"]).await;

    let response = get(build_test_app(pool), "/api/todos").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json[0]["name"], "A");
    assert!(json[0].get("category").is_none());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_card_fields(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    let cards = seed_cards(&pool, cats[0], &["A"]).await;

    let response = put_json(
        build_test_app(pool),
        &format!("/cards/{}", cards[0]),
        json!({"name": "A+", "description": "more"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "A+");
    assert_eq!(json["description"], "more");
    assert_eq!(json["category_id"], cats[0]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_archiving_card_detaches_it(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    let cards = seed_cards(&pool, cats[0], &["A", "B", "C"]).await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/cards/{}", cards[0]),
        json!({"status": "archived"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "archived");
    assert!(json["category_id"].is_null());

    assert_eq!(
        board_column(&pool, cats[0]).await,
        named(&[("B", 1), ("C", 2)])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_card_returns_400(pool: PgPool) {
    let response = put_json(build_test_app(pool), "/cards/5150", json!({"name": "x"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_rejects_unknown_fields(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    let cards = seed_cards(&pool, cats[0], &["A"]).await;

    let response = put_json(
        build_test_app(pool),
        &format!("/cards/{}", cards[0]),
        json!({"categoryId": cats[0]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_last_card_to_front(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    let cards = seed_cards(&pool, cats[0], &["A", "B", "C", "D", "E"]).await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/cards/reorder/{}", cards[4]),
        json!({"order": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        board_column(&pool, cats[0]).await,
        named(&[("E", 1), ("A", 2), ("B", 3), ("C", 4), ("D", 5)])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_card_leaves_other_category_untouched(pool: PgPool) {
    let cats = seed_categories(&pool, &["A", "B"]).await;
    let in_a = seed_cards(&pool, cats[0], &["a1", "a2"]).await;
    seed_cards(&pool, cats[1], &["b1", "b2", "b3"]).await;
    let before = board_column(&pool, cats[1]).await;

    put_json(
        build_test_app(pool.clone()),
        &format!("/cards/reorder/{}", in_a[1]),
        json!({"order": 1}),
    )
    .await;

    assert_eq!(board_column(&pool, cats[1]).await, before);
    assert_eq!(
        board_column(&pool, cats[0]).await,
        named(&[("a2", 1), ("a1", 2)])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_card_invalid_order_returns_400(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    let cards = seed_cards(&pool, cats[0], &["A"]).await;

    let response = put_json(
        build_test_app(pool),
        &format!("/cards/reorder/{}", cards[0]),
        json!({"order": 0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_ORDER");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_card_non_integer_order_is_invalid_order(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    let cards = seed_cards(&pool, cats[0], &["A", "B"]).await;

    for body in [json!({"order": 1.5}), json!({"order": "2"})] {
        let response = put_json(
            build_test_app(pool.clone()),
            &format!("/cards/reorder/{}", cards[1]),
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "INVALID_ORDER");
    }

    assert_eq!(
        board_column(&pool, cats[0]).await,
        named(&[("A", 1), ("B", 2)])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_unknown_card_returns_400(pool: PgPool) {
    let response = put_json(build_test_app(pool), "/cards/reorder/77", json!({"order": 1})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_detached_card_returns_400(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    let cards = seed_cards(&pool, cats[0], &["A"]).await;
    put_json(
        build_test_app(pool.clone()),
        &format!("/cards/{}", cards[0]),
        json!({"status": "archived"}),
    )
    .await;

    let response = put_json(
        build_test_app(pool),
        &format!("/cards/reorder/{}", cards[0]),
        json!({"order": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Categorize
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categorize_moves_card_to_position(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do", "Done"]).await;
    let todo = seed_cards(&pool, cats[0], &["t1", "t2"]).await;
    seed_cards(&pool, cats[1], &["d1", "d2"]).await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/cards/categorize/{}", todo[0]),
        json!({"categoryId": cats[1], "order": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["category_id"], cats[1]);
    assert_eq!(json["order"], 1);

    assert_eq!(board_column(&pool, cats[0]).await, named(&[("t2", 1)]));
    assert_eq!(
        board_column(&pool, cats[1]).await,
        named(&[("t1", 1), ("d1", 2), ("d2", 3)])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categorize_with_unknown_category_returns_400(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    let cards = seed_cards(&pool, cats[0], &["A"]).await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/cards/categorize/{}", cards[0]),
        json!({"categoryId": 9090, "order": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REFERENCE");

    // Card stays where it was.
    assert_eq!(board_column(&pool, cats[0]).await, named(&[("A", 1)]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categorize_unknown_card_returns_400(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;

    let response = put_json(
        build_test_app(pool),
        "/cards/categorize/9999",
        json!({"categoryId": cats[0], "order": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categorize_non_integer_order_is_invalid_order(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do", "Done"]).await;
    let cards = seed_cards(&pool, cats[0], &["A"]).await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/cards/categorize/{}", cards[0]),
        json!({"categoryId": cats[1], "order": 0.5}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_ORDER");

    // Nothing moved.
    assert_eq!(board_column(&pool, cats[0]).await, named(&[("A", 1)]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categorize_requires_order(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    let cards = seed_cards(&pool, cats[0], &["A"]).await;

    let response = put_json(
        build_test_app(pool),
        &format!("/cards/categorize/{}", cards[0]),
        json!({"categoryId": cats[0]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_ORDER");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_card_compacts_category(pool: PgPool) {
    let cats = seed_categories(&pool, &["To do"]).await;
    let cards = seed_cards(&pool, cats[0], &["A", "B", "C"]).await;

    let response = delete(build_test_app(pool.clone()), &format!("/cards/{}", cards[0])).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(build_test_app(pool.clone()), &format!("/cards/{}", cards[0])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(
        board_column(&pool, cats[0]).await,
        named(&[("B", 1), ("C", 2)])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_unknown_card_returns_400(pool: PgPool) {
    let response = delete(build_test_app(pool), "/cards/123456").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_card_id_returns_json_400(pool: PgPool) {
    let response = delete(build_test_app(pool.clone()), "/cards/not-a-number").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = put_json(
        build_test_app(pool),
        "/cards/categorize/1.5",
        json!({"categoryId": 1, "order": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

mod common;

use common::*;
use order_sync::config::IngestConfig;
use order_sync::domain::order::IngestOutcome;
use order_sync::services::ingest_pipeline::{process_cart_reminder, process_order_paid};

// ── 1. cart_reminder_creates_lead ──────────────────────────────────────────

#[tokio::test]
async fn cart_reminder_creates_lead() {
    let pool = setup_pool("order_sync_test_leads").await;
    let config = IngestConfig::default();
    let produto_id = seed_product(&pool, "LEAD-01", None).await;

    let event = make_cart_event("15350946056", "lead1@example.com", &[("LEAD-01", 1, 4990)]);
    let outcome = process_cart_reminder(&pool, &config, &event).await.unwrap();
    assert!(matches!(outcome, IngestOutcome::LeadCreated { .. }));

    let lead = get_lead(&pool, "15350946056").await.unwrap();
    assert_eq!(lead.tipo_de_lead_id, 2);
    assert!(!lead.vendido);
    assert!(!lead.substituido);
    assert_eq!(lead.produto_id, Some(produto_id));
    assert_eq!(lead.email.as_deref(), Some("lead1@example.com"));
}

// ── 2. lead_product_null_when_sku_unresolved ───────────────────────────────

#[tokio::test]
async fn lead_product_null_when_sku_unresolved() {
    let pool = setup_pool("order_sync_test_leads").await;
    let config = IngestConfig::default();

    let event = make_cart_event("34608606002", "lead2@example.com", &[("NOPE-77", 1, 4990)]);
    let outcome = process_cart_reminder(&pool, &config, &event).await.unwrap();
    assert!(matches!(outcome, IngestOutcome::LeadCreated { .. }));

    let lead = get_lead(&pool, "34608606002").await.unwrap();
    assert_eq!(lead.produto_id, None);
}

// ── 3. cart_reminder_skipped_when_active_order ─────────────────────────────

#[tokio::test]
async fn cart_reminder_skipped_when_active_order() {
    let pool = setup_pool("order_sync_test_leads").await;
    let config = IngestConfig::default();
    seed_product(&pool, "LEAD-03", None).await;

    let order = make_order_event("8001", "71428793860", false, &[("LEAD-03", 1, 3000)]);
    process_order_paid(&pool, &StaticQuotes(vec![]), &config, &order)
        .await
        .unwrap();

    let cart = make_cart_event("71428793860", "lead3@example.com", &[("LEAD-03", 1, 3000)]);
    let outcome = process_cart_reminder(&pool, &config, &cart).await.unwrap();
    assert!(matches!(outcome, IngestOutcome::ActiveOrderExists));
    assert_eq!(count_leads(&pool, "71428793860").await, 0);
}

// ── 4. cart_reminder_allowed_when_order_terminal ───────────────────────────

#[tokio::test]
async fn cart_reminder_allowed_when_order_terminal() {
    let pool = setup_pool("order_sync_test_leads").await;
    let config = IngestConfig::default();
    seed_product(&pool, "LEAD-04", None).await;

    let order = make_order_event("8002", "87748248800", false, &[("LEAD-04", 1, 3000)]);
    let IngestOutcome::OrderCreated { pedido_id } =
        process_order_paid(&pool, &StaticQuotes(vec![]), &config, &order)
            .await
            .unwrap()
    else {
        panic!("expected OrderCreated");
    };
    // Shipped/canceled orders no longer block lead creation.
    set_order_status(&pool, pedido_id, config.terminal_status_ids[1]).await;

    let cart = make_cart_event("87748248800", "lead4@example.com", &[("LEAD-04", 1, 3000)]);
    let outcome = process_cart_reminder(&pool, &config, &cart).await.unwrap();
    assert!(matches!(outcome, IngestOutcome::LeadCreated { .. }));
}

// ── 5. cart_reminder_skipped_when_lead_exists_by_document ──────────────────

#[tokio::test]
async fn cart_reminder_skipped_when_lead_exists_by_document() {
    let pool = setup_pool("order_sync_test_leads").await;
    let config = IngestConfig::default();

    let first = make_cart_event("57690043304", "lead5a@example.com", &[("ANY-01", 1, 1000)]);
    process_cart_reminder(&pool, &config, &first).await.unwrap();

    // Same document, different email.
    let second = make_cart_event("57690043304", "lead5b@example.com", &[("ANY-01", 1, 1000)]);
    let outcome = process_cart_reminder(&pool, &config, &second).await.unwrap();
    assert!(matches!(outcome, IngestOutcome::LeadExists));
    assert_eq!(count_leads(&pool, "57690043304").await, 1);
}

// ── 6. cart_reminder_skipped_when_lead_exists_by_email ─────────────────────

#[tokio::test]
async fn cart_reminder_skipped_when_lead_exists_by_email() {
    let pool = setup_pool("order_sync_test_leads").await;
    let config = IngestConfig::default();

    let first = make_cart_event("81483983205", "shared@example.com", &[("ANY-02", 1, 1000)]);
    process_cart_reminder(&pool, &config, &first).await.unwrap();

    // Different document, same email.
    let second = make_cart_event("04894871103", "shared@example.com", &[("ANY-02", 1, 1000)]);
    let outcome = process_cart_reminder(&pool, &config, &second).await.unwrap();
    assert!(matches!(outcome, IngestOutcome::LeadExists));
    assert_eq!(count_leads(&pool, "04894871103").await, 0);
}

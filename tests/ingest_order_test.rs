mod common;

use common::*;
use order_sync::config::IngestConfig;
use order_sync::domain::order::IngestOutcome;
use order_sync::services::ingest_pipeline::process_order_paid;

// ── 1. order_paid_creates_order_customer_items ─────────────────────────────

#[tokio::test]
async fn order_paid_creates_order_customer_items() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "CAN-01", Some("789100000001")).await;
    seed_packaging(&pool, "CAN-01", 10.0, 20.0, 15.0, 0.5).await;

    let event = make_order_event("9001", "52998224725", false, &[("CAN-01", 2, 4990)]);
    let quotes = StaticQuotes(vec![candidate("Correios", "SEDEX", 3, 2795)]);

    let outcome = process_order_paid(&pool, &quotes, &config, &event)
        .await
        .unwrap();
    let IngestOutcome::OrderCreated { pedido_id } = outcome else {
        panic!("expected OrderCreated, got {outcome:?}");
    };

    let order = get_order(&pool, "9001").await.unwrap();
    assert_eq!(order.id, pedido_id);
    assert_eq!(order.status_id, config.initial_status_id);
    assert_eq!(order.metodo_pagamento, "pix");
    assert_eq!(order.valor_produtos, 9980);
    assert_eq!(order.valor_frete, 1990);
    assert_eq!(order.valor_total, 11970);

    let customer = get_customer(&pool, pedido_id).await.unwrap();
    assert_eq!(customer.nome, "Maria Souza");
    assert_eq!(customer.cpf.as_deref(), Some("52998224725"));
    assert_eq!(customer.cnpj, None);
    assert_eq!(customer.cep.as_deref(), Some("04538132"));

    // Quantity 2 expands into 2 unit rows.
    let items = get_items(&pool, pedido_id).await;
    assert_eq!(items.len(), 2);
    for item in &items {
        assert_eq!(item.quantidade, 1);
        assert_eq!(item.preco_unitario, 4990);
        assert_eq!(item.codigo_barras.as_deref(), Some("789100000001"));
    }
}

// ── 2. quantity_expansion_preserves_per_sku_counts ─────────────────────────

#[tokio::test]
async fn quantity_expansion_preserves_per_sku_counts() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    let produto_a = seed_product(&pool, "EXP-A", None).await;
    let produto_b = seed_product(&pool, "EXP-B", None).await;

    let event = make_order_event(
        "9002",
        "52998224725",
        false,
        &[("EXP-A", 3, 1000), ("EXP-B", 1, 2000)],
    );
    let outcome = process_order_paid(&pool, &StaticQuotes(vec![]), &config, &event)
        .await
        .unwrap();
    let IngestOutcome::OrderCreated { pedido_id } = outcome else {
        panic!("expected OrderCreated");
    };

    let items = get_items(&pool, pedido_id).await;
    assert_eq!(items.len(), 4);
    assert_eq!(items.iter().filter(|i| i.produto_id == produto_a).count(), 3);
    assert_eq!(items.iter().filter(|i| i.produto_id == produto_b).count(), 1);
}

// ── 3. variant_sku_resolves_to_variant_and_product ─────────────────────────

#[tokio::test]
async fn variant_sku_resolves_to_variant_and_product() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    let produto_id = seed_product(&pool, "VAR-BASE", None).await;
    let variante_id = seed_variant(&pool, produto_id, "VAR-BASE-P", Some("789100000077")).await;

    let event = make_order_event("9003", "52998224725", false, &[("VAR-BASE-P", 1, 5500)]);
    let outcome = process_order_paid(&pool, &StaticQuotes(vec![]), &config, &event)
        .await
        .unwrap();
    let IngestOutcome::OrderCreated { pedido_id } = outcome else {
        panic!("expected OrderCreated");
    };

    let items = get_items(&pool, pedido_id).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].produto_id, produto_id);
    assert_eq!(items[0].variante_id, Some(variante_id));
    assert_eq!(items[0].codigo_barras.as_deref(), Some("789100000077"));
}

// ── 4. cheapest_candidate_snapshot_stored ──────────────────────────────────

#[tokio::test]
async fn cheapest_candidate_snapshot_stored() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "CHEAP-01", None).await;

    let event = make_order_event("9004", "52998224725", false, &[("CHEAP-01", 1, 3000)]);
    let quotes = StaticQuotes(vec![
        candidate("Jadlog", ".Package", 5, 4210),
        candidate("Correios", "PAC", 7, 3990),
        candidate("Azul", "Expresso", 2, 5500),
    ]);

    let outcome = process_order_paid(&pool, &quotes, &config, &event)
        .await
        .unwrap();
    assert!(matches!(outcome, IngestOutcome::OrderCreated { .. }));

    let order = get_order(&pool, "9004").await.unwrap();
    let cotacao = order.cotacao.expect("quote snapshot should be stored");
    assert_eq!(cotacao["preco_centavos"], 3990);
    assert_eq!(cotacao["transportadora"], "Correios");
    assert_eq!(cotacao["servico"], "PAC");
}

// ── 5. quote_failure_still_creates_order ───────────────────────────────────

#[tokio::test]
async fn quote_failure_still_creates_order() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "DOWN-01", None).await;

    let event = make_order_event("9005", "52998224725", false, &[("DOWN-01", 1, 3000)]);
    let outcome = process_order_paid(&pool, &FailingQuotes, &config, &event)
        .await
        .unwrap();
    assert!(matches!(outcome, IngestOutcome::OrderCreated { .. }));

    let order = get_order(&pool, "9005").await.unwrap();
    assert!(order.cotacao.is_none());
}

// ── 6. no_candidates_yields_null_quote ─────────────────────────────────────

#[tokio::test]
async fn no_candidates_yields_null_quote() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "EMPTY-01", None).await;

    let event = make_order_event("9006", "52998224725", false, &[("EMPTY-01", 1, 3000)]);
    let outcome = process_order_paid(&pool, &StaticQuotes(vec![]), &config, &event)
        .await
        .unwrap();
    assert!(matches!(outcome, IngestOutcome::OrderCreated { .. }));

    let order = get_order(&pool, "9006").await.unwrap();
    assert!(order.cotacao.is_none());
}

// ── 7. upsell_appends_to_active_order ──────────────────────────────────────

#[tokio::test]
async fn upsell_appends_to_active_order() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "UPS-01", None).await;
    seed_product(&pool, "UPS-02", None).await;

    let first = make_order_event("9007", "04252011000110", false, &[("UPS-01", 1, 3000)]);
    let outcome = process_order_paid(&pool, &StaticQuotes(vec![]), &config, &first)
        .await
        .unwrap();
    let IngestOutcome::OrderCreated { pedido_id } = outcome else {
        panic!("expected OrderCreated");
    };

    // Same document, upsell flag set: items land on the prior order.
    let upsell = make_order_event("9008", "04252011000110", true, &[("UPS-02", 2, 1500)]);
    let outcome = process_order_paid(&pool, &StaticQuotes(vec![]), &config, &upsell)
        .await
        .unwrap();
    let IngestOutcome::ItemsAppended {
        pedido_id: appended_to,
        items,
    } = outcome
    else {
        panic!("expected ItemsAppended, got {outcome:?}");
    };
    assert_eq!(appended_to, pedido_id);
    assert_eq!(items, 2);

    assert_eq!(count_orders(&pool, "9008").await, 0);
    assert_eq!(get_items(&pool, pedido_id).await.len(), 3);
}

// ── 8. upsell_without_active_order_creates_new ─────────────────────────────

#[tokio::test]
async fn upsell_without_active_order_creates_new() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "UPS-03", None).await;

    let event = make_order_event("9009", "16470612000183", true, &[("UPS-03", 1, 3000)]);
    let outcome = process_order_paid(&pool, &StaticQuotes(vec![]), &config, &event)
        .await
        .unwrap();
    assert!(matches!(outcome, IngestOutcome::OrderCreated { .. }));
    assert_eq!(count_orders(&pool, "9009").await, 1);
}

// ── 9. upsell_skips_terminal_orders ────────────────────────────────────────

#[tokio::test]
async fn upsell_skips_terminal_orders() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "UPS-04", None).await;

    let first = make_order_event("9010", "11222333000181", false, &[("UPS-04", 1, 3000)]);
    let IngestOutcome::OrderCreated { pedido_id } =
        process_order_paid(&pool, &StaticQuotes(vec![]), &config, &first)
            .await
            .unwrap()
    else {
        panic!("expected OrderCreated");
    };
    set_order_status(&pool, pedido_id, config.terminal_status_ids[0]).await;

    let upsell = make_order_event("9011", "11222333000181", true, &[("UPS-04", 1, 3000)]);
    let outcome = process_order_paid(&pool, &StaticQuotes(vec![]), &config, &upsell)
        .await
        .unwrap();
    assert!(matches!(outcome, IngestOutcome::OrderCreated { .. }));
    assert_eq!(count_orders(&pool, "9011").await, 1);
}

// ── 10. customer_cnpj_sets_cnpj_not_cpf ────────────────────────────────────

#[tokio::test]
async fn customer_cnpj_sets_cnpj_not_cpf() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "DOC-01", None).await;

    let event = make_order_event("9012", "45723174000110", false, &[("DOC-01", 1, 3000)]);
    let IngestOutcome::OrderCreated { pedido_id } =
        process_order_paid(&pool, &StaticQuotes(vec![]), &config, &event)
            .await
            .unwrap()
    else {
        panic!("expected OrderCreated");
    };

    let customer = get_customer(&pool, pedido_id).await.unwrap();
    assert_eq!(customer.cnpj.as_deref(), Some("45723174000110"));
    assert_eq!(customer.cpf, None);
}

// ── 11. unresolved_sku_produces_no_item_rows ───────────────────────────────

#[tokio::test]
async fn unresolved_sku_produces_no_item_rows() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "KNOWN-01", None).await;

    let event = make_order_event(
        "9013",
        "52998224725",
        false,
        &[("KNOWN-01", 1, 3000), ("GHOST-99", 2, 1000)],
    );
    let IngestOutcome::OrderCreated { pedido_id } =
        process_order_paid(&pool, &StaticQuotes(vec![]), &config, &event)
            .await
            .unwrap()
    else {
        panic!("expected OrderCreated");
    };

    // Only the resolvable SKU lands; the unknown one is silently skipped.
    assert_eq!(get_items(&pool, pedido_id).await.len(), 1);
}

// ── 12. order_paid_clears_pix_waitlist ─────────────────────────────────────

#[tokio::test]
async fn order_paid_clears_pix_waitlist() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "PIXW-01", None).await;
    seed_waitlist(&pool, "9014").await;

    let event = make_order_event("9014", "52998224725", false, &[("PIXW-01", 1, 3000)]);
    process_order_paid(&pool, &StaticQuotes(vec![]), &config, &event)
        .await
        .unwrap();

    assert!(!waitlist_contains(&pool, "9014").await);
}

// ── 13. upsell_append_still_clears_pix_waitlist ────────────────────────────

#[tokio::test]
async fn upsell_append_still_clears_pix_waitlist() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "PIXW-02", None).await;
    seed_product(&pool, "PIXW-03", None).await;

    let first = make_order_event("9016", "33014556000196", false, &[("PIXW-02", 1, 3000)]);
    process_order_paid(&pool, &StaticQuotes(vec![]), &config, &first)
        .await
        .unwrap();

    // The appended order number was waiting on a PIX confirmation; the paid
    // event must clear it even though no new order row is created.
    seed_waitlist(&pool, "9017").await;
    let upsell = make_order_event("9017", "33014556000196", true, &[("PIXW-03", 1, 1500)]);
    let outcome = process_order_paid(&pool, &StaticQuotes(vec![]), &config, &upsell)
        .await
        .unwrap();
    assert!(matches!(outcome, IngestOutcome::ItemsAppended { .. }));

    assert!(!waitlist_contains(&pool, "9017").await);
}

// ── 14. repeated_order_paid_inserts_duplicate ──────────────────────────────

// The guard logic has no existing-order-id check on the plain order-paid
// path, so a redelivered event inserts a second order row. This test
// documents that exposure; it is NOT a guarantee to rely on.
#[tokio::test]
async fn repeated_order_paid_inserts_duplicate() {
    let pool = setup_pool("order_sync_test_ingest").await;
    let config = IngestConfig::default();
    seed_product(&pool, "DUP-01", None).await;

    let event = make_order_event("9015", "52998224725", false, &[("DUP-01", 1, 3000)]);
    process_order_paid(&pool, &StaticQuotes(vec![]), &config, &event)
        .await
        .unwrap();
    process_order_paid(&pool, &StaticQuotes(vec![]), &config, &event)
        .await
        .unwrap();

    assert_eq!(count_orders(&pool, "9015").await, 2);
}

use {
    crate::config::IngestConfig,
    crate::domain::{
        error::PipelineError,
        event::{CartEvent, OrderEvent, PixEvent, PurchasedItem},
        order::{IngestOutcome, NewCustomer, NewLead, NewLineItem, NewOrder},
        package::{PackageDims, aggregate_packages},
        quote::{QuoteProvider, QuoteRequest, select_cheapest},
    },
    crate::infra::postgres::{
        catalog_repo::{self, ResolvedLineItem},
        lead_repo, order_repo, pix_repo,
    },
    sqlx::PgPool,
    uuid::Uuid,
};

/// Full order-paid pass: clear any PIX waitlist row for the order number,
/// resolve SKUs, guard the upsell path, aggregate the shipment box, fetch a
/// quote (best effort), and persist order + customer + unit line items as
/// one transaction.
///
/// Note there is deliberately no existing-order check for plain (non-upsell)
/// deliveries: a repeated `order.paid` for the same external id inserts a
/// second order. Known duplicate-insert exposure, kept for parity with the
/// platform's behavior.
pub async fn process_order_paid(
    pool: &PgPool,
    quotes: &dyn QuoteProvider,
    config: &IngestConfig,
    event: &OrderEvent,
) -> Result<IngestOutcome, PipelineError> {
    // Waitlist membership implies payment not yet confirmed; a paid order
    // settles the question regardless of how the payment landed, so the row
    // goes before the upsell branch can short-circuit.
    if pix_repo::remove_waitlist_entry(pool, &event.number).await? {
        tracing::info!("pix waitlist entry cleared by paid order");
    }

    let resolved = resolve_items(pool, &event.items).await?;

    if event.upsell {
        if let Some(pedido_id) =
            order_repo::find_active_order(pool, &event.customer.document, &config.terminal_status_ids)
                .await?
        {
            let items = expand_line_items(pedido_id, &resolved);
            order_repo::append_items(pool, &items).await?;
            return Ok(IngestOutcome::ItemsAppended {
                pedido_id,
                items: items.len(),
            });
        }
        tracing::info!("upsell flag set but no active order found, creating a new order");
    }

    let package = aggregate_shipment(&resolved, &config.fallback_box);

    let quote = match quotes
        .fetch_quotes(&QuoteRequest {
            from_cep: config.sender.cep.clone(),
            to_cep: event.address.cep.clone(),
            package,
            insured_value: event.totals.products,
        })
        .await
    {
        Ok(candidates) => select_cheapest(candidates),
        // An order must still be recorded when pricing is unavailable.
        Err(e) => {
            tracing::warn!("shipping quote unavailable: {e}");
            None
        }
    };

    let pedido_id = Uuid::now_v7();
    let order = NewOrder {
        id: pedido_id,
        external_id: event.number.as_str().to_string(),
        customer_name: event.customer.name.clone(),
        phone: event.customer.phone.clone(),
        status_id: config.initial_status_id,
        platform: config.platform.clone(),
        payment_method: event.payment.method.clone(),
        payment_external_id: event.payment.external_payment_id.clone(),
        value_products: event.totals.products,
        value_shipping: event.totals.shipping,
        value_total: event.totals.total(),
        quote: quote.as_ref().map(|q| q.snapshot()),
        company_id: config.company_id,
    };
    let customer = NewCustomer {
        id: Uuid::now_v7(),
        pedido_id,
        name: event.customer.name.clone(),
        email: event.customer.email.clone(),
        document: event.customer.document.clone(),
        phone: event.customer.phone.clone(),
        address: Some(event.address.clone()),
        submitted: false,
    };
    let items = expand_line_items(pedido_id, &resolved);

    order_repo::insert_order(pool, &order, &customer, &items).await?;

    Ok(IngestOutcome::OrderCreated { pedido_id })
}

/// Cart-reminder pass: guard against active orders and existing leads,
/// otherwise record an abandoned-cart lead.
pub async fn process_cart_reminder(
    pool: &PgPool,
    config: &IngestConfig,
    event: &CartEvent,
) -> Result<IngestOutcome, PipelineError> {
    let document = &event.customer.document;

    if order_repo::find_active_order(pool, document, &config.terminal_status_ids)
        .await?
        .is_some()
    {
        return Ok(IngestOutcome::ActiveOrderExists);
    }

    if lead_repo::lead_exists(
        pool,
        document,
        &event.customer.email,
        config.abandoned_cart_lead_type,
    )
    .await?
    {
        return Ok(IngestOutcome::LeadExists);
    }

    // Best-effort product reference: first item's SKU only.
    let produto_id = match event.items.first() {
        Some(item) => catalog_repo::resolve_line_item(pool, &item.sku)
            .await?
            .map(|r| r.produto_id),
        None => None,
    };

    let lead_id = Uuid::now_v7();
    lead_repo::insert_lead(
        pool,
        &NewLead {
            id: lead_id,
            name: event.customer.name.clone(),
            email: Some(event.customer.email.clone()),
            document: Some(document.clone()),
            phone: event.customer.phone.clone(),
            address: event.address.clone(),
            produto_id,
            tipo_de_lead_id: config.abandoned_cart_lead_type,
            vendido: false,
            substituido: false,
        },
    )
    .await?;

    Ok(IngestOutcome::LeadCreated { lead_id })
}

/// PIX status pass: approval clears the waitlist row, anything else is
/// acknowledged without action.
pub async fn process_pix_status(
    pool: &PgPool,
    event: &PixEvent,
) -> Result<IngestOutcome, PipelineError> {
    if !event.approved {
        return Ok(IngestOutcome::Ignored);
    }

    if pix_repo::remove_waitlist_entry(pool, &event.order_number).await? {
        Ok(IngestOutcome::WaitlistCleared)
    } else {
        Ok(IngestOutcome::WaitlistMiss)
    }
}

/// One catalog lookup per SKU, shared by the aggregator and the persistence
/// step so they can never disagree on what a SKU resolves to.
async fn resolve_items<'a>(
    pool: &PgPool,
    items: &'a [PurchasedItem],
) -> Result<Vec<(&'a PurchasedItem, Option<ResolvedLineItem>)>, PipelineError> {
    let mut resolved = Vec::with_capacity(items.len());
    for item in items {
        let resolution = catalog_repo::resolve_line_item(pool, &item.sku).await?;
        if resolution.is_none() {
            tracing::warn!(sku = %item.sku, "sku not in catalog, item will be skipped");
        }
        resolved.push((item, resolution));
    }
    Ok(resolved)
}

fn aggregate_shipment(
    resolved: &[(&PurchasedItem, Option<ResolvedLineItem>)],
    fallback: &PackageDims,
) -> PackageDims {
    aggregate_packages(
        resolved
            .iter()
            .map(|(item, r)| (r.as_ref().and_then(|r| r.packaging.as_ref()), item.quantity)),
        fallback,
    )
}

/// Expand declared quantities into unit rows: quantity N becomes N rows of
/// one unit each. Unresolvable SKUs produce no rows.
fn expand_line_items(
    pedido_id: Uuid,
    resolved: &[(&PurchasedItem, Option<ResolvedLineItem>)],
) -> Vec<NewLineItem> {
    let mut rows = Vec::new();
    for (item, resolution) in resolved {
        let Some(resolution) = resolution else { continue };
        for _ in 0..item.quantity {
            rows.push(NewLineItem {
                id: Uuid::now_v7(),
                pedido_id,
                produto_id: resolution.produto_id,
                variante_id: resolution.variante_id,
                unit_price: item.unit_price,
                barcode: resolution.barcode.clone(),
            });
        }
    }
    rows
}

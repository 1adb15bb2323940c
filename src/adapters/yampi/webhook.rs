use {
    super::schema::{self, WebhookBody},
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{error::PipelineError, event::EventKind, order::IngestOutcome},
        services::ingest_pipeline,
    },
    axum::{Json, extract::State},
};

fn parse_body(body: &str) -> Result<WebhookBody, PipelineError> {
    serde_json::from_str(body)
        .map_err(|e| PipelineError::Validation(format!("malformed webhook body: {e}")))
}

fn ignored(event: &str) -> Json<serde_json::Value> {
    tracing::info!(event_type = %event, "unrecognized event, acknowledging as no-op");
    Json(serde_json::json!({ "message": "event ignored" }))
}

#[tracing::instrument(
    name = "order_webhook",
    skip_all,
    fields(event_type = tracing::field::Empty, order_number = tracing::field::Empty)
)]
pub async fn order_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let body = parse_body(&body)?;
    tracing::Span::current().record("event_type", tracing::field::display(&body.event));

    if EventKind::classify(&body.event) != Some(EventKind::OrderPaid) {
        return Ok(ignored(&body.event));
    }

    let event = schema::parse_order(body.resource)?;
    tracing::Span::current().record("order_number", tracing::field::display(&event.number));

    let outcome = ingest_pipeline::process_order_paid(
        &state.pool,
        state.quotes.as_ref(),
        &state.config,
        &event,
    )
    .await?;

    Ok(Json(match outcome {
        IngestOutcome::OrderCreated { pedido_id } => {
            tracing::info!(%pedido_id, "order ingested");
            serde_json::json!({ "message": "order created", "pedido_id": pedido_id })
        }
        IngestOutcome::ItemsAppended { pedido_id, items } => {
            tracing::info!(%pedido_id, items, "upsell items appended");
            serde_json::json!({
                "message": "items appended to existing order",
                "pedido_id": pedido_id,
            })
        }
        other => {
            tracing::warn!(?other, "unexpected outcome on order path");
            serde_json::json!({ "message": "event processed" })
        }
    }))
}

#[tracing::instrument(
    name = "cart_webhook",
    skip_all,
    fields(event_type = tracing::field::Empty)
)]
pub async fn cart_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let body = parse_body(&body)?;
    tracing::Span::current().record("event_type", tracing::field::display(&body.event));

    if EventKind::classify(&body.event) != Some(EventKind::CartReminder) {
        return Ok(ignored(&body.event));
    }

    let event = schema::parse_cart(body.resource)?;
    let outcome = ingest_pipeline::process_cart_reminder(&state.pool, &state.config, &event).await?;

    Ok(Json(match outcome {
        IngestOutcome::LeadCreated { lead_id } => {
            tracing::info!(%lead_id, "abandoned-cart lead created");
            serde_json::json!({ "message": "lead created", "lead_id": lead_id })
        }
        IngestOutcome::ActiveOrderExists => {
            tracing::info!("customer already has an active order, skipping lead");
            serde_json::json!({ "message": "customer already has an active order" })
        }
        IngestOutcome::LeadExists => {
            tracing::info!("lead already on file, skipping");
            serde_json::json!({ "message": "lead already exists" })
        }
        other => {
            tracing::warn!(?other, "unexpected outcome on cart path");
            serde_json::json!({ "message": "event processed" })
        }
    }))
}

#[tracing::instrument(
    name = "pix_webhook",
    skip_all,
    fields(event_type = tracing::field::Empty, order_number = tracing::field::Empty)
)]
pub async fn pix_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let body = parse_body(&body)?;
    tracing::Span::current().record("event_type", tracing::field::display(&body.event));

    if EventKind::classify(&body.event) != Some(EventKind::PixStatusChanged) {
        return Ok(ignored(&body.event));
    }

    let event = schema::parse_pix(body.resource)?;
    tracing::Span::current().record("order_number", tracing::field::display(&event.order_number));

    match ingest_pipeline::process_pix_status(&state.pool, &event).await? {
        IngestOutcome::WaitlistCleared => {
            tracing::info!("pix waitlist entry removed");
        }
        IngestOutcome::WaitlistMiss => {
            tracing::info!("order number not on pix waitlist, no-op");
        }
        _ => {}
    }

    // The sender only checks for acknowledgement on this path.
    Ok(Json(serde_json::json!({ "success": true })))
}

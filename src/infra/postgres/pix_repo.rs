use {
    crate::domain::{error::PipelineError, id::OrderNumber},
    sqlx::PgPool,
};

/// Remove the waitlist row for an order number. Returns whether a row was
/// actually there — deleting an absent number is a legitimate no-op.
pub async fn remove_waitlist_entry(
    pool: &PgPool,
    order_number: &OrderNumber,
) -> Result<bool, PipelineError> {
    let result = sqlx::query("DELETE FROM lista_espera_pix WHERE numero_pedido = $1")
        .bind(order_number.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

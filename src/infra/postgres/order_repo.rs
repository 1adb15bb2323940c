use {
    crate::domain::{
        document::Document,
        error::PipelineError,
        order::{NewCustomer, NewLineItem, NewOrder},
    },
    sqlx::{PgPool, Postgres, Transaction},
    uuid::Uuid,
};

/// Most recent order for the purchasing document whose workflow status is
/// not terminal. The terminal set is injected, never hardcoded here.
pub async fn find_active_order(
    pool: &PgPool,
    document: &Document,
    terminal_status_ids: &[i32],
) -> Result<Option<Uuid>, PipelineError> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT p.id
        FROM pedidos p
        JOIN clientes c ON c.pedido_id = p.id
        WHERE (c.cpf = $1 OR c.cnpj = $1)
          AND p.status_id <> ALL($2)
        ORDER BY p.criado_em DESC
        LIMIT 1
        "#,
    )
    .bind(document.digits())
    .bind(terminal_status_ids)
    .fetch_optional(pool)
    .await?;

    Ok(id)
}

/// Order + customer + expanded unit line items in one transaction:
/// they land together or not at all.
pub async fn insert_order(
    pool: &PgPool,
    order: &NewOrder,
    customer: &NewCustomer,
    items: &[NewLineItem],
) -> Result<(), PipelineError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO pedidos
            (id, id_externo, nome_cliente, telefone, status_id, plataforma,
             metodo_pagamento, id_pagamento, valor_produtos, valor_frete,
             valor_total, cotacao, empresa_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(order.id)
    .bind(&order.external_id)
    .bind(&order.customer_name)
    .bind(order.phone.as_deref())
    .bind(order.status_id)
    .bind(&order.platform)
    .bind(&order.payment_method)
    .bind(order.payment_external_id.as_deref())
    .bind(order.value_products.cents())
    .bind(order.value_shipping.cents())
    .bind(order.value_total.cents())
    .bind(order.quote.as_ref())
    .bind(order.company_id)
    .execute(&mut *tx)
    .await?;

    insert_customer(&mut tx, customer).await?;

    for item in items {
        insert_line_item(&mut tx, item).await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Upsell path: append unit rows to an existing order.
pub async fn append_items(pool: &PgPool, items: &[NewLineItem]) -> Result<(), PipelineError> {
    let mut tx = pool.begin().await?;
    for item in items {
        insert_line_item(&mut tx, item).await?;
    }
    tx.commit().await?;
    Ok(())
}

async fn insert_customer(
    tx: &mut Transaction<'_, Postgres>,
    customer: &NewCustomer,
) -> Result<(), PipelineError> {
    let address = customer.address.as_ref();

    sqlx::query(
        r#"
        INSERT INTO clientes
            (id, pedido_id, nome, email, cpf, cnpj, telefone,
             cep, rua, numero, complemento, bairro, cidade, uf, enviado)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
    )
    .bind(customer.id)
    .bind(customer.pedido_id)
    .bind(&customer.name)
    .bind(&customer.email)
    .bind(customer.document.cpf())
    .bind(customer.document.cnpj())
    .bind(customer.phone.as_deref())
    .bind(address.map(|a| a.cep.as_str()))
    .bind(address.map(|a| a.street.as_str()))
    .bind(address.and_then(|a| a.number.as_deref()))
    .bind(address.and_then(|a| a.complement.as_deref()))
    .bind(address.and_then(|a| a.district.as_deref()))
    .bind(address.map(|a| a.city.as_str()))
    .bind(address.map(|a| a.state.as_str()))
    .bind(customer.submitted)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_line_item(
    tx: &mut Transaction<'_, Postgres>,
    item: &NewLineItem,
) -> Result<(), PipelineError> {
    sqlx::query(
        r#"
        INSERT INTO itens_pedido
            (id, pedido_id, produto_id, variante_id, quantidade, preco_unitario, codigo_barras)
        VALUES ($1, $2, $3, $4, 1, $5, $6)
        "#,
    )
    .bind(item.id)
    .bind(item.pedido_id)
    .bind(item.produto_id)
    .bind(item.variante_id)
    .bind(item.unit_price.cents())
    .bind(item.barcode.as_deref())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

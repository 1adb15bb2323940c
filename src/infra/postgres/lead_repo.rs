use {
    crate::domain::{document::Document, error::PipelineError, order::NewLead},
    sqlx::PgPool,
};

/// Whether a lead of the given type already exists for the document OR the
/// email. Read-then-write with the insert that follows — not atomic, which
/// is an accepted race for webhook traffic.
pub async fn lead_exists(
    pool: &PgPool,
    document: &Document,
    email: &str,
    lead_type: i32,
) -> Result<bool, PipelineError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM leads
            WHERE tipo_de_lead_id = $3
              AND (documento = $1 OR email = $2)
        )
        "#,
    )
    .bind(document.digits())
    .bind(email)
    .bind(lead_type)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn insert_lead(pool: &PgPool, lead: &NewLead) -> Result<(), PipelineError> {
    let address = lead.address.as_ref();

    sqlx::query(
        r#"
        INSERT INTO leads
            (id, nome, email, documento, telefone,
             cep, rua, numero, complemento, bairro, cidade, uf,
             produto_id, tipo_de_lead_id, vendido, substituido)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#,
    )
    .bind(lead.id)
    .bind(&lead.name)
    .bind(lead.email.as_deref())
    .bind(lead.document.as_ref().map(|d| d.digits()))
    .bind(lead.phone.as_deref())
    .bind(address.map(|a| a.cep.as_str()))
    .bind(address.map(|a| a.street.as_str()))
    .bind(address.and_then(|a| a.number.as_deref()))
    .bind(address.and_then(|a| a.complement.as_deref()))
    .bind(address.and_then(|a| a.district.as_deref()))
    .bind(address.map(|a| a.city.as_str()))
    .bind(address.map(|a| a.state.as_str()))
    .bind(lead.produto_id)
    .bind(lead.tipo_de_lead_id)
    .bind(lead.vendido)
    .bind(lead.substituido)
    .execute(pool)
    .await?;

    Ok(())
}

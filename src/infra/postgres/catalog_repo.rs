use {
    crate::domain::{error::PipelineError, id::Sku, package::PackageDims},
    sqlx::PgPool,
    uuid::Uuid,
};

/// Everything the pipeline needs to know about one SKU: the catalog
/// references for the line-item rows plus the packaging profile for
/// aggregation. One lookup serves both consumers.
#[derive(Debug, Clone)]
pub struct ResolvedLineItem {
    pub produto_id: Uuid,
    pub variante_id: Option<Uuid>,
    pub barcode: Option<String>,
    pub packaging: Option<PackageDims>,
}

/// Best-effort SKU resolution: variant SKUs first, then product SKUs,
/// then the packaging catalog. Unknown SKUs resolve to `None`.
pub async fn resolve_line_item(
    pool: &PgPool,
    sku: &Sku,
) -> Result<Option<ResolvedLineItem>, PipelineError> {
    let variant = sqlx::query_as::<_, (Uuid, Uuid, Option<String>)>(
        "SELECT produto_id, id, codigo_barras FROM variantes WHERE sku = $1",
    )
    .bind(sku.as_str())
    .fetch_optional(pool)
    .await?;

    let (produto_id, variante_id, barcode) = match variant {
        Some((produto_id, variante_id, barcode)) => (produto_id, Some(variante_id), barcode),
        None => {
            let product = sqlx::query_as::<_, (Uuid, Option<String>)>(
                "SELECT id, codigo_barras FROM produtos WHERE sku = $1",
            )
            .bind(sku.as_str())
            .fetch_optional(pool)
            .await?;

            match product {
                Some((produto_id, barcode)) => (produto_id, None, barcode),
                None => return Ok(None),
            }
        }
    };

    let packaging = sqlx::query_as::<_, (f64, f64, f64, f64)>(
        "SELECT altura_cm, largura_cm, comprimento_cm, peso_kg FROM embalagens WHERE sku = $1",
    )
    .bind(sku.as_str())
    .fetch_optional(pool)
    .await?
    .map(|(height_cm, width_cm, length_cm, weight_kg)| PackageDims {
        height_cm,
        width_cm,
        length_cm,
        weight_kg,
    });

    Ok(Some(ResolvedLineItem {
        produto_id,
        variante_id,
        barcode,
        packaging,
    }))
}

use {
    super::error::PipelineError,
    super::id::Cep,
    super::money::Centavos,
    super::package::PackageDims,
    serde::Serialize,
    std::{future::Future, pin::Pin},
};

/// What the pipeline sends to the carrier-quote provider: origin and
/// destination postal codes, the aggregated box, and the declared value
/// for insurance.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub from_cep: Cep,
    pub to_cep: Cep,
    pub package: PackageDims,
    pub insured_value: Centavos,
}

/// One carrier/service/price option returned by the provider.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteCandidate {
    pub carrier: String,
    pub service: String,
    pub delivery_days: Option<i64>,
    pub price: Centavos,
    /// Upstream entry as received, kept for the denormalized order snapshot.
    pub raw: serde_json::Value,
}

impl QuoteCandidate {
    /// Denormalized snapshot stored on the order row.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "transportadora": self.carrier,
            "servico": self.service,
            "prazo_dias": self.delivery_days,
            "preco_centavos": self.price.cents(),
            "resposta": self.raw,
        })
    }
}

/// Deterministic selection: the cheapest usable candidate wins.
pub fn select_cheapest(candidates: Vec<QuoteCandidate>) -> Option<QuoteCandidate> {
    candidates.into_iter().min_by_key(|c| c.price.cents())
}

pub trait QuoteProvider: Send + Sync {
    fn fetch_quotes(
        &self,
        request: &QuoteRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<QuoteCandidate>, PipelineError>> + Send + '_>>;
}

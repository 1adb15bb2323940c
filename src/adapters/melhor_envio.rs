use {
    crate::domain::{
        error::PipelineError,
        money::Centavos,
        quote::{QuoteCandidate, QuoteProvider, QuoteRequest},
    },
    std::{future::Future, pin::Pin, time::Duration},
};

pub const DEFAULT_BASE_URL: &str = "https://melhorenvio.com.br";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Carrier-aggregator quote client. One POST per aggregated box; the
/// pipeline treats any error from here as "quote unavailable" and keeps
/// going.
pub struct MelhorEnvioClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl MelhorEnvioClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    async fn calculate(&self, request: &QuoteRequest) -> Result<Vec<QuoteCandidate>, PipelineError> {
        let body = serde_json::json!({
            "from": { "postal_code": request.from_cep.as_str() },
            "to": { "postal_code": request.to_cep.as_str() },
            "products": [{
                "id": "caixa",
                "height": request.package.height_cm,
                "width": request.package.width_cm,
                "length": request.package.length_cm,
                "weight": request.package.weight_kg,
                "insurance_value": request.insured_value.as_reais(),
                "quantity": 1,
            }],
        });

        let response = self
            .http
            .post(format!("{}/api/v2/me/shipment/calculate", self.base_url))
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| PipelineError::Quote(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Quote(format!("provider returned {status}")));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PipelineError::Quote(format!("unparseable response: {e}")))?;

        // The provider answers with either an array of candidates or a
        // single error object; both must be tolerated.
        let Some(entries) = payload.as_array() else {
            return Err(PipelineError::Quote(format!(
                "unexpected response shape: {payload}"
            )));
        };

        let mut candidates = Vec::new();
        for entry in entries {
            // Per-carrier errors come inline ("area not served" etc).
            if entry.get("error").is_some() {
                continue;
            }
            let Some(price) = entry.get("price").and_then(parse_price) else {
                continue;
            };

            candidates.push(QuoteCandidate {
                carrier: entry
                    .pointer("/company/name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string(),
                service: entry
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string(),
                delivery_days: entry.get("delivery_time").and_then(|v| v.as_i64()),
                price,
                raw: entry.clone(),
            });
        }

        Ok(candidates)
    }
}

/// Prices arrive as decimal strings ("27.95") but some deployments send
/// plain numbers.
fn parse_price(value: &serde_json::Value) -> Option<Centavos> {
    match value {
        serde_json::Value::String(s) => Centavos::parse_decimal(s).ok(),
        serde_json::Value::Number(n) => n.as_f64().and_then(|f| Centavos::from_reais(f).ok()),
        _ => None,
    }
}

impl QuoteProvider for MelhorEnvioClient {
    fn fetch_quotes(
        &self,
        request: &QuoteRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<QuoteCandidate>, PipelineError>> + Send + '_>> {
        let request = request.clone();
        Box::pin(async move { self.calculate(&request).await })
    }
}

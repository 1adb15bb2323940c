use {
    super::error::PipelineError,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Monetary amount in integer centavos. Webhook payloads carry float reais;
/// conversion happens once at the parsing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centavos(i64);

impl Centavos {
    pub const ZERO: Centavos = Centavos(0);

    pub fn new(cents: i64) -> Result<Self, PipelineError> {
        if cents < 0 {
            return Err(PipelineError::Validation(format!(
                "Centavos cannot be negative, got: {cents}"
            )));
        }
        Ok(Self(cents))
    }

    /// Convert a float reais amount (e.g. `129.9` from a webhook payload),
    /// rounding to the nearest centavo.
    pub fn from_reais(reais: f64) -> Result<Self, PipelineError> {
        if !reais.is_finite() || reais < 0.0 {
            return Err(PipelineError::Validation(format!(
                "invalid monetary amount: {reais}"
            )));
        }
        Self::new((reais * 100.0).round() as i64)
    }

    /// Parse a decimal string such as `"27.95"` — the quote API returns
    /// prices as strings.
    pub fn parse_decimal(s: &str) -> Result<Self, PipelineError> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| PipelineError::Validation(format!("unparseable amount: {s}")))?;
        Self::from_reais(value)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn as_reais(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn checked_add(self, other: Centavos) -> Option<Centavos> {
        self.0.checked_add(other.0).map(Centavos)
    }
}

impl fmt::Display for Centavos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

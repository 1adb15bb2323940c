use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::error::PipelineError;

/// Catalog SKU as it appears on a purchased line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    pub fn new(sku: impl Into<String>) -> Result<Self, PipelineError> {
        let sku = sku.into().trim().to_string();
        if sku.is_empty() {
            return Err(PipelineError::Validation("Sku cannot be empty".into()));
        }
        Ok(Self(sku))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Platform-side order number (`id_externo` on the order row).
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn new(number: impl Into<String>) -> Result<Self, PipelineError> {
        let number = number.into().trim().to_string();
        if number.is_empty() {
            return Err(PipelineError::Validation(
                "OrderNumber cannot be empty".into(),
            ));
        }
        Ok(Self(number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Brazilian postal code, normalized to its 8 digits.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cep(String);

impl Cep {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PipelineError> {
        let digits: String = raw.as_ref().chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != 8 {
            return Err(PipelineError::Validation(format!(
                "Cep must have 8 digits, got: {}",
                raw.as_ref()
            )));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

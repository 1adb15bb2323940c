use {
    super::error::PipelineError,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Purchasing document: CPF (11 digits) or CNPJ (14 digits), never both.
/// The xor invariant on the customer row holds by construction here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Document {
    Cpf(String),
    Cnpj(String),
}

impl Document {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PipelineError> {
        let digits: String = raw.as_ref().chars().filter(|c| c.is_ascii_digit()).collect();
        match digits.len() {
            11 => Ok(Self::Cpf(digits)),
            14 => Ok(Self::Cnpj(digits)),
            _ => Err(PipelineError::Validation(format!(
                "document must be a CPF (11 digits) or CNPJ (14 digits), got: {}",
                raw.as_ref()
            ))),
        }
    }

    pub fn digits(&self) -> &str {
        match self {
            Self::Cpf(d) | Self::Cnpj(d) => d,
        }
    }

    pub fn cpf(&self) -> Option<&str> {
        match self {
            Self::Cpf(d) => Some(d),
            Self::Cnpj(_) => None,
        }
    }

    pub fn cnpj(&self) -> Option<&str> {
        match self {
            Self::Cpf(_) => None,
            Self::Cnpj(d) => Some(d),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits())
    }
}

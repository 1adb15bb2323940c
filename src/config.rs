use {
    crate::domain::{id::Cep, package::PackageDims},
    std::env,
};

/// Origin sender profile used when building quote requests. The default
/// profile matches the company warehouse; every field can be overridden
/// via `SENDER_*` environment variables.
#[derive(Debug, Clone)]
pub struct SenderProfile {
    pub name: String,
    pub cep: Cep,
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub state: String,
}

/// Ingestion pipeline configuration, built once at startup and carried in
/// `AppState`. Defaults here are the documented production values; tests
/// construct their own instance to override them.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub sender: SenderProfile,
    /// Substituted when no purchased SKU has a packaging profile.
    pub fallback_box: PackageDims,
    /// Workflow status ids the active-order guard treats as terminal
    /// (shipped, canceled).
    pub terminal_status_ids: Vec<i32>,
    /// Status newly created orders enter the workflow with.
    pub initial_status_id: i32,
    /// Lead type id for abandoned-cart leads.
    pub abandoned_cart_lead_type: i32,
    pub platform: String,
    pub company_id: Option<i64>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            sender: SenderProfile {
                name: "Expedição".to_string(),
                cep: Cep::new("01310100").expect("default sender cep is valid"),
                street: "Avenida Paulista".to_string(),
                number: "1000".to_string(),
                district: "Bela Vista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
            },
            fallback_box: PackageDims {
                height_cm: 18.0,
                width_cm: 30.0,
                length_cm: 30.0,
                weight_kg: 2.0,
            },
            terminal_status_ids: vec![6, 7],
            initial_status_id: 1,
            abandoned_cart_lead_type: 2,
            platform: "yampi".to_string(),
            company_id: None,
        }
    }
}

impl IngestConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(cep) = env::var("SENDER_CEP") {
            config.sender.cep = Cep::new(&cep).expect("SENDER_CEP must be a valid postal code");
        }
        if let Ok(name) = env::var("SENDER_NAME") {
            config.sender.name = name;
        }
        if let Ok(street) = env::var("SENDER_STREET") {
            config.sender.street = street;
        }
        if let Ok(number) = env::var("SENDER_NUMBER") {
            config.sender.number = number;
        }
        if let Ok(district) = env::var("SENDER_DISTRICT") {
            config.sender.district = district;
        }
        if let Ok(city) = env::var("SENDER_CITY") {
            config.sender.city = city;
        }
        if let Ok(state) = env::var("SENDER_STATE") {
            config.sender.state = state;
        }

        if let Ok(ids) = env::var("TERMINAL_STATUS_IDS") {
            config.terminal_status_ids = ids
                .split(',')
                .map(|s| {
                    s.trim()
                        .parse()
                        .expect("TERMINAL_STATUS_IDS must be comma-separated integers")
                })
                .collect();
        }

        if let Ok(company) = env::var("COMPANY_ID") {
            config.company_id = Some(company.parse().expect("COMPANY_ID must be an integer"));
        }

        config
    }
}

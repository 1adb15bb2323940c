pub mod api_errors;
pub mod melhor_envio;
pub mod yampi;

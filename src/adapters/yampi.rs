pub mod schema;
pub mod webhook;

pub mod document;
pub mod error;
pub mod event;
pub mod id;
pub mod money;
pub mod order;
pub mod package;
pub mod quote;

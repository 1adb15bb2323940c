pub mod catalog_repo;
pub mod lead_repo;
pub mod order_repo;
pub mod pix_repo;

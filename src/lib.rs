pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod money;
pub mod service;

pub use config::AppConfig;
pub use error::BillError;
pub use models::{BillInput, BillResult, BillRow};
pub use service::{calculate, try_calculate, BillService};

pub mod handlers;

pub use handlers::*;

use crate::config::ExportConfig;
use crate::service::BillService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub service: BillService,
    pub export: Arc<ExportConfig>,
}

impl AppState {
    pub fn new(export: ExportConfig) -> Self {
        Self {
            service: BillService::new(),
            export: Arc::new(export),
        }
    }
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/bill/calculate", post(calculate_bill))
        .route("/api/bill/calculate/batch", post(calculate_batch))
        .route("/api/bill/already-paid", post(resolve_already_paid))
        .route("/api/bill/export/csv", post(export_csv))
        .route("/api/bill/export/pdf", post(export_pdf))
        .route("/api/bill/export/xlsx", post(export_xlsx))
        .with_state(state)
}

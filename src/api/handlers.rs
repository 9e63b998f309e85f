use super::AppState;
use crate::error::BillError;
use crate::export;
use crate::models::bill::check_non_negative;
use crate::models::{BillInput, BillResult, StateTriple};
use crate::service::{AlreadyPaidAllocation, AlreadyPaidEntry, BatchItem};
use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// 请求体: 批量账单
#[derive(Debug, Deserialize)]
pub struct BatchCalculateRequest {
    pub bills: Vec<BillInput>,
}

/// 批量响应体
#[derive(Debug, Serialize)]
pub struct BatchCalculateResponse {
    pub success: bool,
    pub message: String,
    pub results: Vec<BatchItem>,
}

/// 请求体: 已付金额录入
#[derive(Debug, Deserialize)]
pub struct AlreadyPaidRequest {
    pub quantities: StateTriple,
    #[serde(flatten)]
    pub entry: AlreadyPaidEntry,
}

/// 通用失败响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// API 错误：校验失败返回 422，导出失败返回 500
#[derive(Debug)]
pub struct AppError(pub BillError);

impl From<BillError> for AppError {
    fn from(e: BillError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BillError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            BillError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let response = ErrorResponse {
            success: false,
            message: format!("Error: {}", self.0),
        };
        (status, Json(response)).into_response()
    }
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 计算单笔账单
pub async fn calculate_bill(
    State(state): State<AppState>,
    Json(input): Json<BillInput>,
) -> Result<Json<BillResult>, AppError> {
    let result = state.service.calculate(&input)?;
    Ok(Json(result))
}

/// 批量计算
pub async fn calculate_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchCalculateRequest>,
) -> Response {
    let results = state.service.calculate_batch(&req.bills);
    let succeeded = results.iter().filter(|r| r.is_ok()).count();

    let response = BatchCalculateResponse {
        success: succeeded == results.len(),
        message: format!("Calculated {} of {} bills", succeeded, results.len()),
        results,
    };
    (StatusCode::OK, Json(response)).into_response()
}

impl AlreadyPaidRequest {
    /// 数量与已付金额不得为负或非有限数
    pub fn validate(&self) -> Result<(), BillError> {
        for (idx, &q) in self.quantities.iter().enumerate() {
            check_non_negative("quantities", q).map_err(|e| e.for_state(idx))?;
        }
        self.entry.validate()
    }
}

/// 已付金额分摊与描述
pub async fn resolve_already_paid(
    Json(req): Json<AlreadyPaidRequest>,
) -> Result<Json<AlreadyPaidAllocation>, AppError> {
    if let Err(e) = req.validate() {
        tracing::warn!("[AlreadyPaid] 输入校验失败: {}", e);
        return Err(e.into());
    }

    let allocation = req.entry.resolve(&req.quantities);
    tracing::info!(
        "[AlreadyPaid] 分摊完成: 数量 {:?}, 已付 {:?}",
        req.quantities,
        allocation.already_paid
    );
    Ok(Json(allocation))
}

/// 导出 CSV
pub async fn export_csv(
    State(state): State<AppState>,
    Json(input): Json<BillInput>,
) -> Result<Response, AppError> {
    let result = state.service.calculate(&input)?;
    let bytes = export::to_csv_bytes(&result)?;
    Ok(attachment(
        "text/csv; charset=utf-8",
        format!("{}.csv", state.export.file_stem),
        bytes,
    ))
}

/// 导出 PDF
pub async fn export_pdf(
    State(state): State<AppState>,
    Json(input): Json<BillInput>,
) -> Result<Response, AppError> {
    let result = state.service.calculate(&input)?;
    let bytes = export::to_pdf_bytes(&result, &state.export.document_title)?;
    Ok(attachment(
        "application/pdf",
        format!("{}.pdf", state.export.file_stem),
        bytes,
    ))
}

/// 导出 Excel 工作簿
pub async fn export_xlsx(
    State(state): State<AppState>,
    Json(input): Json<BillInput>,
) -> Result<Response, AppError> {
    let result = state.service.calculate(&input)?;
    let bytes = export::to_xlsx_bytes(&result)?;
    Ok(attachment(
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        format!("{}.xlsx", state.export.file_stem),
        bytes,
    ))
}

fn attachment(content_type: &'static str, file_name: String, bytes: Vec<u8>) -> Response {
    tracing::info!("[Export] {} ({} 字节)", file_name, bytes.len());
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response()
}

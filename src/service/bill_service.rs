use crate::error::BillError;
use crate::models::{BillInput, BillResult};
use crate::service::calculator;
use rayon::prelude::*;
use serde::Serialize;

/// 批量计算中单笔账单的结果
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<BillResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItem {
    pub fn is_ok(&self) -> bool {
        self.result.is_some()
    }
}

/// 账单服务：边界校验 + 纯计算 + 日志
#[derive(Debug, Default, Clone, Copy)]
pub struct BillService;

impl BillService {
    pub fn new() -> Self {
        Self
    }

    /// 校验并计算单笔账单
    pub fn calculate(&self, input: &BillInput) -> Result<BillResult, BillError> {
        let result = match calculator::try_calculate(input) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("[Bill] 输入校验失败: {}", e);
                return Err(e);
            }
        };
        tracing::info!(
            "[Bill] 计算完成: 数量 {:?}, 合计 {:.2}, 应付HARTRON {:.2}",
            input.quantities,
            result.grand_total().unwrap_or_default(),
            result.payment_total().unwrap_or_default()
        );
        Ok(result)
    }

    /// 并行批量计算，单笔失败不影响其他账单
    pub fn calculate_batch(&self, inputs: &[BillInput]) -> Vec<BatchItem> {
        let items: Vec<BatchItem> = inputs
            .par_iter()
            .enumerate()
            .map(|(index, input)| match self.calculate(input) {
                Ok(result) => BatchItem {
                    index,
                    result: Some(result),
                    error: None,
                },
                Err(e) => BatchItem {
                    index,
                    result: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();

        let failed = items.iter().filter(|i| !i.is_ok()).count();
        tracing::info!(
            "[Bill] 批量计算完成: 共 {} 笔, 成功 {}, 失败 {}",
            items.len(),
            items.len() - failed,
            failed
        );
        items
    }
}

use crate::models::STATES;
use thiserror::Error;

/// 账单计算/导出错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BillError {
    /// 输入校验失败 (在调用计算器之前拒绝)
    #[error("invalid input for {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// 导出文档失败
    #[error("export failed: {0}")]
    Export(String),
}

impl BillError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// 在原因前加上州名
    pub fn for_state(self, idx: usize) -> Self {
        match self {
            BillError::InvalidInput { field, reason } => BillError::InvalidInput {
                field,
                reason: format!("{} {}", STATES[idx], reason),
            },
            other => other,
        }
    }
}

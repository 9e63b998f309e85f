//! 已付金额 (第13行) 的辅助计算：按数量比例分摊与描述文本生成。
//!
//! 这些函数由调用方在表单变化时显式调用，不嵌入计算器。

use crate::error::BillError;
use crate::models::bill::check_non_negative;
use crate::models::{StateTriple, DEFAULT_ALREADY_PAID_DESC, STATES};
use crate::money::{format2, round2};
use serde::{Deserialize, Serialize};

/// 按各州数量比例分摊总已付金额，结果保留两位小数
///
/// 数量合计不为正时返回全零，不做除法。
pub fn distribute_proportionally(total: f64, quantities: &StateTriple) -> StateTriple {
    let total_quantity: f64 = quantities.iter().sum();
    if total_quantity <= 0.0 {
        return [0.0; 3];
    }

    let mut shares = [0.0; 3];
    for (share, &q) in shares.iter_mut().zip(quantities) {
        *share = round2(total * q / total_quantity);
    }
    shares
}

/// 生成第13行描述，只列出金额大于零的州
pub fn format_already_paid_description(amounts: &StateTriple, labels: &[&str; 3]) -> String {
    let parts: Vec<String> = labels
        .iter()
        .zip(amounts)
        .filter(|(_, amount)| **amount > 0.0)
        .map(|(label, amount)| format!("{}: {}", label, format2(*amount)))
        .collect();

    if parts.is_empty() {
        DEFAULT_ALREADY_PAID_DESC.to_string()
    } else {
        format!("{} ({})", DEFAULT_ALREADY_PAID_DESC, parts.join(", "))
    }
}

/// 已付金额录入方式
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AlreadyPaidEntry {
    /// 无已付金额
    #[default]
    None,
    /// 合计录入，按数量分摊
    Collective { total: f64 },
    /// 按州分别录入
    PerState { amounts: StateTriple },
}

/// 分摊结果：三州金额及对应描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlreadyPaidAllocation {
    pub already_paid: StateTriple,
    pub description: String,
}

impl AlreadyPaidEntry {
    /// 边界校验：已付金额不得为负或非有限数
    pub fn validate(&self) -> Result<(), BillError> {
        match self {
            AlreadyPaidEntry::None => Ok(()),
            AlreadyPaidEntry::Collective { total } => check_non_negative("total", *total),
            AlreadyPaidEntry::PerState { amounts } => {
                for (idx, &amount) in amounts.iter().enumerate() {
                    check_non_negative("amounts", amount).map_err(|e| e.for_state(idx))?;
                }
                Ok(())
            }
        }
    }

    pub fn resolve(&self, quantities: &StateTriple) -> AlreadyPaidAllocation {
        let already_paid = match self {
            AlreadyPaidEntry::None => [0.0; 3],
            AlreadyPaidEntry::Collective { total } => distribute_proportionally(*total, quantities),
            AlreadyPaidEntry::PerState { amounts } => *amounts,
        };

        AlreadyPaidAllocation {
            description: format_already_paid_description(&already_paid, &STATES),
            already_paid,
        }
    }
}

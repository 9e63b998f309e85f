use crate::error::BillError;
use serde::{Deserialize, Serialize};

/// 三个州的固定顺序 (所有三元组均按此位置对应)
pub const STATES: [&str; 3] = ["Punjab", "Haryana", "Chandigarh"];

/// 第13行默认描述
pub const DEFAULT_ALREADY_PAID_DESC: &str = "Amount already available with HARTRON";

/// 按州排列的三元组 [Punjab, Haryana, Chandigarh]
pub type StateTriple = [f64; 3];

/// 单价录入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntryType {
    /// 不含税单价
    #[default]
    #[serde(rename = "BV", alias = "base_value")]
    BaseValue,
    /// 含税单价
    #[serde(rename = "PV", alias = "product_value")]
    ProductValue,
}

/// 项目资金来源，决定咨询费率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectFunding {
    #[default]
    #[serde(rename = "state")]
    StateGovt,
    #[serde(rename = "ecommittee")]
    ECommittee,
}

impl ProjectFunding {
    /// HARTRON 咨询费率 (%)
    pub fn hartron_percent(self) -> f64 {
        match self {
            ProjectFunding::StateGovt => 4.0,
            ProjectFunding::ECommittee => 2.0,
        }
    }
}

/// 账单输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillInput {
    pub entry_type: EntryType,
    pub value_per_unit: f64,
    pub gst_percent: f64,
    pub project_funding: ProjectFunding,
    pub quantities: StateTriple,
    #[serde(default)]
    pub penalties: StateTriple,
    #[serde(default)]
    pub already_paid: StateTriple,
    #[serde(default = "default_already_paid_desc")]
    pub already_paid_desc: String,
}

fn default_already_paid_desc() -> String {
    DEFAULT_ALREADY_PAID_DESC.to_string()
}

impl Default for BillInput {
    fn default() -> Self {
        Self {
            entry_type: EntryType::BaseValue,
            value_per_unit: 0.0,
            gst_percent: 18.0,
            project_funding: ProjectFunding::StateGovt,
            quantities: [0.0; 3],
            penalties: [0.0; 3],
            already_paid: [0.0; 3],
            already_paid_desc: default_already_paid_desc(),
        }
    }
}

impl BillInput {
    /// 边界校验：拒绝非有限数、负数量/罚金/单价、负税率
    ///
    /// 只检查单个字段；数值过大导致的溢出由 `try_calculate` 在计算后拒绝。
    pub fn validate(&self) -> Result<(), BillError> {
        check_non_negative("value_per_unit", self.value_per_unit)?;
        // 负税率包含 -100 (含税反算时分母为零)
        check_non_negative("gst_percent", self.gst_percent)?;

        for (idx, &q) in self.quantities.iter().enumerate() {
            check_non_negative("quantities", q)
                .map_err(|e| e.for_state(idx))?;
        }
        for (idx, &p) in self.penalties.iter().enumerate() {
            check_non_negative("penalties", p)
                .map_err(|e| e.for_state(idx))?;
        }
        for (idx, &a) in self.already_paid.iter().enumerate() {
            if !a.is_finite() {
                return Err(BillError::invalid(
                    "already_paid",
                    format!("{} amount must be a finite number", STATES[idx]),
                ));
            }
        }

        Ok(())
    }
}

pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<(), BillError> {
    if !value.is_finite() {
        return Err(BillError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(BillError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

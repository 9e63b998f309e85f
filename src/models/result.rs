use super::bill::StateTriple;
use serde::{Deserialize, Serialize};

/// 账单固定行数
pub const ROW_COUNT: usize = 16;

/// 导出/展示时需要突出显示的行 (7: 合计, 15: 应付HARTRON, 16: 应提取金额)
pub const KEY_FIGURE_ROWS: [u32; 3] = [7, 15, 16];

/// 仅作标题的行 (扣款)
pub const SECTION_HEADER_ROW: u32 = 8;

/// 账单行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillRow {
    pub sr: u32,
    pub description: String,
    pub values: StateTriple,
    pub total: f64,
}

impl BillRow {
    /// total 始终由三州数值求和得出
    pub fn new(sr: u32, description: impl Into<String>, values: StateTriple) -> Self {
        Self {
            sr,
            description: description.into(),
            values,
            total: values[0] + values[1] + values[2],
        }
    }

    pub fn is_key_figure(&self) -> bool {
        KEY_FIGURE_ROWS.contains(&self.sr)
    }

    pub fn is_section_header(&self) -> bool {
        self.sr == SECTION_HEADER_ROW
    }
}

/// 账单计算结果 (固定16行)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillResult {
    pub rows: Vec<BillRow>,
}

impl BillResult {
    /// 按序号查找行
    pub fn row(&self, sr: u32) -> Option<&BillRow> {
        self.rows.iter().find(|r| r.sr == sr)
    }

    /// 第7行合计
    pub fn grand_total(&self) -> Option<f64> {
        self.row(7).map(|r| r.total)
    }

    /// 第15行：应付 HARTRON
    pub fn payment_total(&self) -> Option<f64> {
        self.row(15).map(|r| r.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_total_is_sum_of_values() {
        let row = BillRow::new(2, "Base value", [10000.0, 5000.0, 0.25]);
        assert_eq!(row.total, 10000.0 + 5000.0 + 0.25);
    }

    #[test]
    fn key_figures_and_header() {
        assert!(BillRow::new(7, "", [0.0; 3]).is_key_figure());
        assert!(BillRow::new(16, "", [0.0; 3]).is_key_figure());
        assert!(!BillRow::new(14, "", [0.0; 3]).is_key_figure());
        assert!(BillRow::new(8, "Deductions", [0.0; 3]).is_section_header());
    }
}

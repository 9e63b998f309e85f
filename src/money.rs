//! 金额两位小数取整 (四舍五入，远离零)
//!
//! 先把 f64 的二进制精确值展开为十进制再取整，与前端 `toFixed(2)` 一致：
//! 0.125 是精确的二进制值，得 0.13；1.005 实际略小于 1.005，得 1.00。

use bigdecimal::BigDecimal;
use std::str::FromStr;

// 足以区分任何金额量级的 f64 与两位小数进位点
const EXPANSION_DIGITS: usize = 40;

/// 四舍五入到两位小数，非有限数返回 None
pub fn round_half_up(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }

    let exact = BigDecimal::from_str(&format!("{:.*}", EXPANSION_DIGITS, value)).ok()?;
    let half = BigDecimal::from_str("0.005").ok()?;
    // with_scale 向零截断
    let shifted = if value < 0.0 { exact - half } else { exact + half };
    Some(shifted.with_scale(2))
}

/// 四舍五入到两位小数并转回 f64，非有限数原样返回
pub fn round2(value: f64) -> f64 {
    round_half_up(value)
        .and_then(|d| d.to_string().parse::<f64>().ok())
        .unwrap_or(value)
}

/// 两位小数文本，用于描述文字中嵌入的金额
pub fn format2(value: f64) -> String {
    round_half_up(value)
        .map(|d| d.to_string())
        .unwrap_or_else(|| value.to_string())
}

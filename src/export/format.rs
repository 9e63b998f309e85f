use crate::error::BillError;
use crate::money::round_half_up;
use bigdecimal::BigDecimal;

/// 导出时取两位小数 (计算过程中不做任何取整)
///
/// `-0.00` 会被规整为 `0.00`。
pub fn round_amount(value: f64) -> Result<BigDecimal, BillError> {
    round_half_up(value).ok_or_else(|| BillError::Export(format!("non-finite amount: {}", value)))
}

/// 印度数字分组格式 (12,34,567.89)
pub fn format_amount(value: f64) -> Result<String, BillError> {
    let rounded = round_amount(value)?.to_string();
    let (negative, digits) = match rounded.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, rounded.as_str()),
    };
    let (int_part, dec_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let grouped = group_indian(int_part);
    Ok(if negative {
        format!("-{}.{}", grouped, dec_part)
    } else {
        format!("{}.{}", grouped, dec_part)
    })
}

// 末三位一组，其余每两位一组
fn group_indian(int_part: &str) -> String {
    if int_part.len() <= 3 {
        return int_part.to_string();
    }

    let (head, last3) = int_part.split_at(int_part.len() - 3);
    let head_chars: Vec<char> = head.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = head_chars.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(head_chars[start..end].iter().collect());
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), last3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_places_at_export_time() {
        assert_eq!(round_amount(12272.0).unwrap().to_string(), "12272.00");
        assert_eq!(round_amount(33.333333).unwrap().to_string(), "33.33");
        assert_eq!(round_amount(-0.0000001).unwrap().to_string(), "0.00");
        assert_eq!(round_amount(0.125).unwrap().to_string(), "0.13");
    }

    #[test]
    fn non_finite_amount_is_an_export_error() {
        assert!(matches!(round_amount(f64::NAN), Err(BillError::Export(_))));
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(format_amount(0.0).unwrap(), "0.00");
        assert_eq!(format_amount(999.5).unwrap(), "999.50");
        assert_eq!(format_amount(18408.0).unwrap(), "18,408.00");
        assert_eq!(format_amount(1234567.891).unwrap(), "12,34,567.89");
        assert_eq!(format_amount(-123456.0).unwrap(), "-1,23,456.00");
    }
}

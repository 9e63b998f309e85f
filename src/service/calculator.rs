use crate::error::BillError;
use crate::models::{BillInput, BillResult, BillRow, EntryType, StateTriple};
use crate::money::format2;
use serde::Serialize;

/// 咨询费 GST 税率
const GST_ON_HARTRON_RATE: f64 = 0.18;
/// 产品 GST TDS 扣缴率
const GST_TDS_PRODUCT_RATE: f64 = 0.02;
/// 咨询费 GST TDS 扣缴率
const GST_TDS_HARTRON_RATE: f64 = 0.02;
/// 咨询费所得税 TDS 扣缴率
const TDS_HARTRON_RATE: f64 = 0.10;

/// 单位价格推导 (仅用于展示，三州计算基于各州的不含税金额重新计算)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitFigures {
    pub base_value: f64,
    pub product_value: f64,
    pub gst_product: f64,
    pub hartron_percent: f64,
    pub hartron: f64,
    pub gst_hartron: f64,
}

/// 单位阶段：含税/不含税单价互推
pub fn unit_figures(input: &BillInput) -> UnitFigures {
    let gst = input.gst_percent;
    let (base_value, product_value, gst_product) = match input.entry_type {
        EntryType::ProductValue => {
            let pv = input.value_per_unit;
            let gst_product = pv * (gst / (100.0 + gst));
            (pv - gst_product, pv, gst_product)
        }
        EntryType::BaseValue => {
            let bv = input.value_per_unit;
            let gst_product = bv * (gst / 100.0);
            (bv, bv + gst_product, gst_product)
        }
    };

    let hartron_percent = input.project_funding.hartron_percent();
    let hartron = base_value * (hartron_percent / 100.0);

    UnitFigures {
        base_value,
        product_value,
        gst_product,
        hartron_percent,
        hartron,
        gst_hartron: hartron * GST_ON_HARTRON_RATE,
    }
}

fn map3(a: &StateTriple, f: impl Fn(f64) -> f64) -> StateTriple {
    [f(a[0]), f(a[1]), f(a[2])]
}

fn zip3(a: &StateTriple, b: &StateTriple, f: impl Fn(f64, f64) -> f64) -> StateTriple {
    [f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2])]
}

/// 计算 HARTRON 账单 (纯函数，无副作用)
///
/// 对任意输入都返回完整的16行结果，从不 panic；输入是否合法由调用方
/// 通过 [`BillInput::validate`] 或 [`try_calculate`] 保证。
pub fn calculate(input: &BillInput) -> BillResult {
    let unit = unit_figures(input);
    let gst = input.gst_percent;
    let hartron_percent = unit.hartron_percent;

    // 三州计算
    let base_values = map3(&input.quantities, |q| q * unit.base_value);
    let gst_products = map3(&base_values, |bv| bv * (gst / 100.0));
    let product_totals = zip3(&base_values, &gst_products, |bv, g| bv + g);
    let hartrons = map3(&base_values, |bv| bv * (hartron_percent / 100.0));
    let gst_hartrons = map3(&hartrons, |h| h * GST_ON_HARTRON_RATE);
    let mut totals = zip3(&product_totals, &hartrons, |pt, h| pt + h);
    totals = zip3(&totals, &gst_hartrons, |t, gh| t + gh);

    // 扣款
    let gst_tds_products = map3(&base_values, |bv| bv * GST_TDS_PRODUCT_RATE);
    let gst_tds_hartrons = map3(&hartrons, |h| h * GST_TDS_HARTRON_RATE);
    let tds_hartrons = map3(&hartrons, |h| h * TDS_HARTRON_RATE);

    let mut deductions = [0.0; 3];
    let mut payments = [0.0; 3];
    let mut withdraws = [0.0; 3];
    for i in 0..3 {
        deductions[i] = gst_tds_products[i]
            + gst_tds_hartrons[i]
            + tds_hartrons[i]
            + input.penalties[i]
            + input.already_paid[i];
        payments[i] = totals[i] - deductions[i];
        // 仅加回三项 TDS，罚金与已付金额不加回
        withdraws[i] = payments[i] + gst_tds_products[i] + gst_tds_hartrons[i] + tds_hartrons[i];
    }

    let rows = vec![
        BillRow::new(1, "Total qty supplied", input.quantities),
        BillRow::new(
            2,
            format!("Base value of product (i.e. {} per unit * #1)", format2(unit.base_value)),
            base_values,
        ),
        BillRow::new(
            3,
            format!("{}% GST on base value of product (# 2)", gst),
            gst_products,
        ),
        BillRow::new(4, "Total product cost inclusive of GST(# 2+3)", product_totals),
        BillRow::new(
            5,
            format!(
                "Hartron consultancy Charges @{}% on the base value of product at #2",
                hartron_percent
            ),
            hartrons,
        ),
        BillRow::new(6, "GST on Hartron Consultancy Charges @ 18% on # 5", gst_hartrons),
        BillRow::new(7, "Total (# 4+5+6)", totals),
        BillRow::new(8, "Deductions", [0.0; 3]),
        BillRow::new(
            9,
            "2% GST TDS required to be deducted on base value of product #2",
            gst_tds_products,
        ),
        BillRow::new(
            10,
            "2% GST TDS required to be deducted on Hartron Consultancy Charges #5",
            gst_tds_hartrons,
        ),
        BillRow::new(
            11,
            "10% TDS required to be deducted on base value of Hartron consultancy charges #5",
            tds_hartrons,
        ),
        BillRow::new(12, "Statewise Late delivery/installation penalty", input.penalties),
        BillRow::new(13, input.already_paid_desc.clone(), input.already_paid),
        BillRow::new(14, "Total deductions (#9+10+11+12+13)", deductions),
        BillRow::new(15, "Payment to be made to HARTRON (#7-14)", payments),
        BillRow::new(16, "Statewise Amount to be withdrawn", withdraws),
    ];

    BillResult { rows }
}

/// 校验后计算
///
/// 各字段合法但乘积溢出 (例如单价 1e308) 时按输入错误拒绝，保证返回的
/// 每一行都是有限数。
pub fn try_calculate(input: &BillInput) -> Result<BillResult, BillError> {
    input.validate()?;
    let result = calculate(input);

    if let Some(row) = result
        .rows
        .iter()
        .find(|r| !r.total.is_finite() || r.values.iter().any(|v| !v.is_finite()))
    {
        return Err(BillError::invalid(
            "input",
            format!("amounts too large, row {} overflows", row.sr),
        ));
    }
    Ok(result)
}

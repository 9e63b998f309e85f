use super::format::round_amount;
use super::{COLUMN_HEADERS, COLUMN_WIDTHS};
use crate::error::BillError;
use crate::models::BillResult;
use rust_xlsxwriter::{Format, Workbook};

/// 工作表名
const SHEET_NAME: &str = "Bill";

fn xlsx_err(e: impl std::fmt::Display) -> BillError {
    BillError::Export(format!("xlsx: {}", e))
}

// 两位小数后的数值写入单元格，与 CSV/PDF 一致
fn cell_amount(value: f64) -> Result<f64, BillError> {
    let rounded = round_amount(value)?.to_string();
    rounded.parse::<f64>().map_err(xlsx_err)
}

/// 生成 Excel 工作簿 (表头 + 16行，关键行 7/15/16 加粗)
pub fn to_xlsx_bytes(result: &BillResult) -> Result<Vec<u8>, BillError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format("#,##0.00");
    let key_amount_format = Format::new().set_bold().set_num_format("#,##0.00");
    let key_text_format = Format::new().set_bold();
    let plain_format = Format::new();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(xlsx_err)?;

    for (col, (header, width)) in COLUMN_HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, width).map_err(xlsx_err)?;
        worksheet
            .write_string_with_format(0, col, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    for (idx, row) in result.rows.iter().enumerate() {
        let line = idx as u32 + 1;
        let (text_format, number_format) = if row.is_key_figure() {
            (&key_text_format, &key_amount_format)
        } else {
            (&plain_format, &amount_format)
        };

        worksheet
            .write_number_with_format(line, 0, row.sr, text_format)
            .map_err(xlsx_err)?;
        worksheet
            .write_string_with_format(line, 1, row.description.as_str(), text_format)
            .map_err(xlsx_err)?;

        let amounts = [row.values[0], row.values[1], row.values[2], row.total];
        for (offset, amount) in amounts.into_iter().enumerate() {
            worksheet
                .write_number_with_format(line, 2 + offset as u16, cell_amount(amount)?, number_format)
                .map_err(xlsx_err)?;
        }
    }

    let bytes = workbook.save_to_buffer().map_err(xlsx_err)?;
    tracing::debug!("XLSX导出完成, {} 字节", bytes.len());
    Ok(bytes)
}

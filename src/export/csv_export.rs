use super::format::round_amount;
use super::COLUMN_HEADERS;
use crate::error::BillError;
use crate::models::BillResult;
use std::io::Write;
use std::path::Path;

fn csv_err(e: impl std::fmt::Display) -> BillError {
    BillError::Export(format!("csv: {}", e))
}

/// 将账单写入任意 writer (表头 + 16行)
pub fn write_csv<W: Write>(result: &BillResult, writer: W) -> Result<(), BillError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(COLUMN_HEADERS).map_err(csv_err)?;

    for row in &result.rows {
        writer
            .write_record(&[
                row.sr.to_string(),
                row.description.clone(),
                round_amount(row.values[0])?.to_string(),
                round_amount(row.values[1])?.to_string(),
                round_amount(row.values[2])?.to_string(),
                round_amount(row.total)?.to_string(),
            ])
            .map_err(csv_err)?;
    }

    writer.flush().map_err(csv_err)?;
    Ok(())
}

/// 导出为内存中的 CSV
pub fn to_csv_bytes(result: &BillResult) -> Result<Vec<u8>, BillError> {
    let mut buf = Vec::new();
    write_csv(result, &mut buf)?;
    tracing::debug!("CSV导出完成, {} 字节", buf.len());
    Ok(buf)
}

/// 导出账单到 CSV 文件
pub fn export_to_csv(result: &BillResult, output_path: &Path) -> Result<(), BillError> {
    let file = std::fs::File::create(output_path).map_err(csv_err)?;
    write_csv(result, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillInput;
    use crate::service::calculate;

    fn sample() -> BillResult {
        calculate(&BillInput {
            value_per_unit: 1000.0,
            quantities: [10.0, 5.0, 0.0],
            ..BillInput::default()
        })
    }

    #[test]
    fn writes_header_and_sixteen_rows() {
        let bytes = to_csv_bytes(&sample()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 17);
        assert_eq!(
            lines[0],
            "Sr.,Item Description,(A) Punjab,(B) Haryana,(C) Chandigarh,D = A+B+C"
        );
        assert_eq!(lines[7], "7,Total (# 4+5+6),12272.00,6136.00,0.00,18408.00");
        assert_eq!(lines[8], "8,Deductions,0.00,0.00,0.00,0.00");
    }

    #[test]
    fn gst_ties_round_half_up() {
        let result = calculate(&BillInput {
            value_per_unit: 1.0,
            gst_percent: 12.5,
            quantities: [1.0, 0.0, 0.0],
            ..BillInput::default()
        });
        let text = String::from_utf8(to_csv_bytes(&result).unwrap()).unwrap();
        assert_eq!(
            text.lines().nth(3).unwrap(),
            "3,12.5% GST on base value of product (# 2),0.13,0.00,0.00,0.13"
        );
    }

    #[test]
    fn quotes_descriptions_containing_commas() {
        let result = calculate(&BillInput {
            value_per_unit: 10.0,
            quantities: [1.0, 1.0, 0.0],
            already_paid: [5.0, 2.0, 0.0],
            already_paid_desc: "Amount already available with HARTRON (Punjab: 5.00, Haryana: 2.00)"
                .to_string(),
            ..BillInput::default()
        });
        let text = String::from_utf8(to_csv_bytes(&result).unwrap()).unwrap();

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 16);
        assert_eq!(&records[12][1], result.rows[12].description.as_str());
        assert_eq!(&records[12][5], "7.00");
    }

    #[test]
    fn exports_to_file() {
        let path = std::env::temp_dir().join(format!("hartron-bill-{}.csv", std::process::id()));
        export_to_csv(&sample(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(text.starts_with("Sr.,"));
    }
}

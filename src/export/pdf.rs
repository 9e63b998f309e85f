use super::format::format_amount;
use super::COLUMN_HEADERS;
use crate::error::BillError;
use crate::models::{BillResult, BillRow};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

// A4 横向
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN_LEFT: f32 = 10.0;
const MARGIN_RIGHT: f32 = 287.0;
const MARGIN_BOTTOM: f32 = 20.0;

const FONT_SIZE: f32 = 8.0;
const LINE_HEIGHT: f32 = 4.5;
const DESCRIPTION_WRAP: usize = 90;

// 列起始位置 (mm)
const COLUMN_X: [f32; 6] = [10.0, 22.0, 175.0, 203.0, 231.0, 259.0];

fn pdf_err(e: impl std::fmt::Display) -> BillError {
    BillError::Export(format!("pdf: {}", e))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn push_text(layer: &PdfLayerReference, font: &IndirectFontRef, text: &str, size: f32, x: f32, y: f32) {
    layer.use_text(text, size, Mm(x), Mm(y), font);
}

fn push_rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_LEFT), Mm(y)), false),
            (Point::new(Mm(MARGIN_RIGHT), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// 按单词换行
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn new_page(doc: &PdfDocumentReference, page_no: usize) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Layer {}", page_no));
    doc.get_page(page).get_layer(layer)
}

fn push_table_header(layer: &PdfLayerReference, fonts: &Fonts, y: f32) -> f32 {
    for (header, x) in COLUMN_HEADERS.iter().zip(COLUMN_X) {
        push_text(layer, &fonts.bold, header, FONT_SIZE, x, y);
    }
    push_rule(layer, y - 2.0);
    y - LINE_HEIGHT - 2.0
}

fn row_cells(row: &BillRow) -> Result<[String; 4], BillError> {
    Ok([
        format_amount(row.values[0])?,
        format_amount(row.values[1])?,
        format_amount(row.values[2])?,
        format_amount(row.total)?,
    ])
}

/// 生成可打印的 PDF 账单 (关键行 7/15/16 加粗，超出一页自动分页)
pub fn to_pdf_bytes(result: &BillResult, title: &str) -> Result<Vec<u8>, BillError> {
    let (doc, page1, layer1) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut page_no = 1;

    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
    };

    let mut y = PAGE_HEIGHT - 15.0;
    push_text(&layer, &fonts.bold, title, 14.0, MARGIN_LEFT, y);
    y -= 10.0;
    y = push_table_header(&layer, &fonts, y);

    for row in &result.rows {
        let description = wrap(&row.description, DESCRIPTION_WRAP);
        let height = LINE_HEIGHT * description.len() as f32;
        if y - height < MARGIN_BOTTOM {
            page_no += 1;
            layer = new_page(&doc, page_no);
            y = push_table_header(&layer, &fonts, PAGE_HEIGHT - 15.0);
        }

        let font = if row.is_key_figure() { &fonts.bold } else { &fonts.regular };
        push_text(&layer, font, &row.sr.to_string(), FONT_SIZE, COLUMN_X[0], y);
        for (i, line) in description.iter().enumerate() {
            push_text(&layer, font, line, FONT_SIZE, COLUMN_X[1], y - LINE_HEIGHT * i as f32);
        }
        if !row.is_section_header() {
            for (cell, x) in row_cells(row)?.iter().zip(&COLUMN_X[2..]) {
                push_text(&layer, font, cell, FONT_SIZE, *x, y);
            }
        }
        y -= height;
    }
    push_rule(&layer, y + 2.0);

    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    push_text(
        &layer,
        &fonts.regular,
        &format!("Generated on {}", generated),
        7.0,
        MARGIN_LEFT,
        10.0,
    );

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(pdf_err)?;
    let bytes = writer.into_inner().map_err(pdf_err)?;
    tracing::debug!("PDF导出完成, {} 页, {} 字节", page_no, bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillInput;
    use crate::service::calculate;

    #[test]
    fn wraps_long_descriptions_on_word_boundaries() {
        let lines = wrap("Amount already available with HARTRON (Punjab: 1200.00, Haryana: 600.00)", 40);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= 40));
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn renders_a_pdf_document() {
        let result = calculate(&BillInput {
            value_per_unit: 1000.0,
            quantities: [10.0, 5.0, 0.0],
            ..BillInput::default()
        });
        let bytes = to_pdf_bytes(&result, "HARTRON Bill Details").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn non_finite_values_fail_export() {
        let mut result = calculate(&BillInput::default());
        result.rows[1].values[0] = f64::INFINITY;
        assert!(matches!(
            to_pdf_bytes(&result, "x"),
            Err(BillError::Export(_))
        ));
    }
}

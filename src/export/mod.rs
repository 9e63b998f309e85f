pub mod csv_export;
pub mod format;
pub mod pdf;
pub mod workbook;

pub use csv_export::{export_to_csv, to_csv_bytes, write_csv};
pub use format::{format_amount, round_amount};
pub use pdf::to_pdf_bytes;
pub use workbook::to_xlsx_bytes;

/// 导出表头 (与展示表格列一致)
pub const COLUMN_HEADERS: [&str; 6] = [
    "Sr.",
    "Item Description",
    "(A) Punjab",
    "(B) Haryana",
    "(C) Chandigarh",
    "D = A+B+C",
];

/// 工作簿列宽 (字符)
pub const COLUMN_WIDTHS: [f64; 6] = [10.0, 60.0, 15.0, 15.0, 15.0, 15.0];

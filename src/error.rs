use std::fmt;
use thiserror::Error;

/// 输入表类型 (用于错误定位)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Invoice,
    Erp,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Invoice => write!(f, "invoice"),
            TableKind::Erp => write!(f, "ERP"),
        }
    }
}

/// 科学计数法修复提示
pub const CORRUPTION_HINT: &str = "Open the ERP CSV in a spreadsheet, format the 'Codean' column as Number with no decimals, and save it again";

/// 对账流水线错误 (任一阶段失败即终止)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconcileError {
    #[error("{table} table is missing required columns: {}", .missing.join(", "))]
    Schema {
        table: TableKind,
        missing: Vec<String>,
    },

    #[error(
        "ERP barcodes are in scientific notation ({total} values, e.g. {}); matching would be wrong. {hint}",
        .samples.join(", ")
    )]
    EncodingCorruption {
        samples: Vec<String>,
        total: usize,
        hint: &'static str,
    },

    #[error("{table} row {row}, column '{column}': '{value}' is not a valid number")]
    InvalidNumber {
        table: TableKind,
        row: usize,
        column: String,
        value: String,
    },

    #[error("ERP export has duplicate barcodes matched by the invoice: {}", .barcodes.join(", "))]
    DuplicateBarcode { barcodes: Vec<String> },
}

impl ReconcileError {
    /// 稳定的错误代码 (API 响应使用)
    pub fn code(&self) -> &'static str {
        match self {
            ReconcileError::Schema { .. } => "schema_error",
            ReconcileError::EncodingCorruption { .. } => "encoding_corruption",
            ReconcileError::InvalidNumber { .. } => "invalid_number",
            ReconcileError::DuplicateBarcode { .. } => "duplicate_barcode",
        }
    }
}

/// 文件读写错误
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("file read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel parse failed: {0}")]
    Excel(String),

    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("report write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("CSV delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),

    #[error("{0} has no header row")]
    MissingHeader(String),
}

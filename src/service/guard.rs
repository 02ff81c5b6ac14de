use crate::error::{ReconcileError, CORRUPTION_HINT};
use crate::models::Table;
use regex::Regex;
use std::sync::OnceLock;

/// 数字后跟带符号的指数标记, 例如 9,42022E+12
fn scientific_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9][Ee][+-]").expect("static regex"))
}

pub fn is_scientific_notation(value: &str) -> bool {
    scientific_pattern().is_match(value)
}

/// 检查 ERP 条码列是否被表格软件改写成科学计数法
///
/// 必须在任何清洗之前运行: 去空白或数值转换可能掩盖损坏的值。
pub fn check_erp_barcodes(
    erp: &Table,
    ean_column: usize,
    sample_limit: usize,
) -> Result<(), ReconcileError> {
    let mut samples = Vec::new();
    let mut total = 0usize;

    for row in 0..erp.len() {
        let value = erp.cell(row, ean_column).to_text();
        if is_scientific_notation(&value) {
            total += 1;
            if samples.len() < sample_limit {
                samples.push(value);
            }
        }
    }

    if total > 0 {
        tracing::error!(
            "ERP 条码列检测到科学计数法: {} 条, 样例: {:?}",
            total, samples
        );
        return Err(ReconcileError::EncodingCorruption {
            samples,
            total,
            hint: CORRUPTION_HINT,
        });
    }
    Ok(())
}

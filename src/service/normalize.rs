use super::schema::{ErpColumnIndex, InvoiceColumnIndex};
use crate::error::{ReconcileError, TableKind};
use crate::models::{Cell, ErpEntry, InvoiceLine, Table};
use bigdecimal::BigDecimal;
use std::str::FromStr;

/// 规范化后的 ERP 数据
#[derive(Debug, Clone, Default)]
pub struct NormalizedErp {
    pub records: Vec<ErpEntry>,
    /// 因 SKU 缺失/空白/含控制字符被丢弃的行数
    pub dropped: usize,
    /// 价格列表头 (命中行价格无效时报错使用)
    pub price_column: String,
}

/// 条码规范形式: 转文本 + 去首尾空白
pub fn normalize_barcode(cell: &Cell) -> String {
    cell.to_text().trim().to_string()
}

/// SKU 有效: 非空、非纯空白、不含控制字符 (源系统编码残留的 \x1a)
pub fn is_valid_sku(sku: &str) -> bool {
    let trimmed = sku.trim();
    !trimmed.is_empty() && !trimmed.chars().any(char::is_control)
}

/// 解析十进制数; 单个逗号且无小数点时按小数逗号处理 (4,50)
pub fn parse_decimal(cell: &Cell) -> Option<BigDecimal> {
    match cell {
        Cell::Empty => None,
        Cell::Int(i) => Some(BigDecimal::from(*i)),
        Cell::Float(f) if f.is_finite() => BigDecimal::from_str(&f.to_string()).ok(),
        Cell::Float(_) => None,
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            BigDecimal::from_str(s).ok().or_else(|| {
                if s.matches(',').count() == 1 && !s.contains('.') {
                    BigDecimal::from_str(&s.replace(',', ".")).ok()
                } else {
                    None
                }
            })
        }
    }
}

fn require_decimal(
    table: &Table,
    kind: TableKind,
    row: usize,
    col: usize,
) -> Result<BigDecimal, ReconcileError> {
    let cell = table.cell(row, col);
    parse_decimal(cell).ok_or_else(|| ReconcileError::InvalidNumber {
        table: kind,
        row: row + 1,
        column: table.headers[col].trim().to_string(),
        value: cell.to_text(),
    })
}

fn row_is_blank(table: &Table, row: usize) -> bool {
    table.rows[row].iter().all(Cell::is_blank)
}

/// 发票行规范化; 整行空白的行被跳过
pub fn normalize_invoice(
    table: &Table,
    idx: &InvoiceColumnIndex,
) -> Result<Vec<InvoiceLine>, ReconcileError> {
    let mut lines = Vec::with_capacity(table.len());

    for row in 0..table.len() {
        if row_is_blank(table, row) {
            continue;
        }

        lines.push(InvoiceLine {
            row: row + 1,
            barcode: normalize_barcode(table.cell(row, idx.barcode)),
            product_name: table.cell(row, idx.product_name).to_text().trim().to_string(),
            quantity: require_decimal(table, TableKind::Invoice, row, idx.quantity)?,
            unit_price: require_decimal(table, TableKind::Invoice, row, idx.unit_price)?,
        });
    }

    Ok(lines)
}

/// ERP 行规范化: 按 SKU 过滤; 价格解析失败记为 None, 由连接阶段决定是否报错
pub fn normalize_erp(table: &Table, idx: &ErpColumnIndex) -> NormalizedErp {
    let mut out = NormalizedErp {
        price_column: table.headers[idx.unit_value].trim().to_string(),
        ..NormalizedErp::default()
    };

    for row in 0..table.len() {
        let sku = table.cell(row, idx.sku).to_text();
        if !is_valid_sku(&sku) {
            out.dropped += 1;
            continue;
        }

        let price = table.cell(row, idx.unit_value);
        out.records.push(ErpEntry {
            row: row + 1,
            ean: normalize_barcode(table.cell(row, idx.ean)),
            sku: sku.trim().to_string(),
            product_name: table.cell(row, idx.product_name).to_text().trim().to_string(),
            unit_value: parse_decimal(price),
            raw_unit_value: price.to_text(),
        });
    }

    out
}

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 供应商发票明细行 (规范化之后)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// 源表中的数据行号 (从 1 开始, 不含表头)
    pub row: usize,
    pub barcode: String,
    pub product_name: String,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
}

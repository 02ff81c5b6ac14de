use super::{ErpRecord, InvoiceLine};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 对账状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    New,
    PriceChange,
    Unchanged,
}

impl Status {
    /// 报告中使用的标签
    pub fn label(&self) -> &'static str {
        match self {
            Status::New => "Nuevo",
            Status::PriceChange => "Cambio de precio",
            Status::Unchanged => "Sin cambios",
        }
    }
}

/// 左连接结果: 一条发票行 + 最多一条 ERP 记录
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRow {
    pub invoice: InvoiceLine,
    pub erp: Option<ErpRecord>,
}

/// 价格差异; percent 为 None 表示 ERP 价格为 0, 百分比无定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDiff {
    pub absolute: BigDecimal,
    pub percent: Option<BigDecimal>,
}

/// 分类后的行
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    pub matched: MatchedRow,
    pub status: Status,
    pub diff: Option<PriceDiff>,
}

/// 表1: 价格变动 (Cambios de Precio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChangeRow {
    pub barcode: String,
    pub sku: String,
    pub product_name: String,
    pub invoice_price: BigDecimal,
    pub erp_price: BigDecimal,
    pub absolute_diff: BigDecimal,
    pub percent_diff: Option<BigDecimal>,
}

/// 表2: 新商品 (Productos Nuevos)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductRow {
    pub barcode: String,
    pub product_name: String,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
}

/// 表3: 完整汇总 (Resumen Completo)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub barcode: String,
    pub sku: Option<String>,
    pub invoice_product_name: String,
    pub erp_product_name: Option<String>,
    pub quantity: BigDecimal,
    pub invoice_price: BigDecimal,
    pub erp_price: Option<BigDecimal>,
    pub status: Status,
}

/// 汇总计数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileStats {
    pub total_invoice_rows: usize,
    pub price_changes: usize,
    pub new_products: usize,
    pub unchanged: usize,
    /// 因 SKU 无效被丢弃的 ERP 行
    pub erp_rows_dropped: usize,
}

/// 对账最终结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub price_changes: Vec<PriceChangeRow>,
    pub new_products: Vec<NewProductRow>,
    pub full_summary: Vec<SummaryRow>,
    pub stats: ReconcileStats,
}

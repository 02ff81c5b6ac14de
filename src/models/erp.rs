use crate::error::{ReconcileError, TableKind};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// ERP 商品记录 (已过滤无效 SKU, 价格有效)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpRecord {
    pub row: usize,
    pub ean: String,
    pub sku: String,
    pub product_name: String,
    pub unit_value: BigDecimal,
}

/// 规范化后的 ERP 行; 价格只在被发票命中时才要求可解析
#[derive(Debug, Clone, PartialEq)]
pub struct ErpEntry {
    pub row: usize,
    pub ean: String,
    pub sku: String,
    pub product_name: String,
    pub unit_value: Option<BigDecimal>,
    /// 价格单元格原文 (错误信息使用)
    pub raw_unit_value: String,
}

impl ErpEntry {
    /// 转为带有效价格的记录, 价格缺失或无法解析时报错
    pub fn resolve(&self, price_column: &str) -> Result<ErpRecord, ReconcileError> {
        let unit_value = self
            .unit_value
            .clone()
            .ok_or_else(|| ReconcileError::InvalidNumber {
                table: TableKind::Erp,
                row: self.row,
                column: price_column.to_string(),
                value: self.raw_unit_value.clone(),
            })?;

        Ok(ErpRecord {
            row: self.row,
            ean: self.ean.clone(),
            sku: self.sku.clone(),
            product_name: self.product_name.clone(),
            unit_value,
        })
    }
}

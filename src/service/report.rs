use crate::models::{
    ClassifiedRow, NewProductRow, PriceChangeRow, ReconcileStats, ReconciliationResult, Status,
    SummaryRow,
};
use bigdecimal::BigDecimal;

/// 百分比无定义时报告中显示的值
pub const UNDEFINED_PERCENT: &str = "N/D";

/// 报告中的三张表, 顺序固定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSheet {
    PriceChanges,
    NewProducts,
    FullSummary,
}

impl ReportSheet {
    pub const ALL: [ReportSheet; 3] = [
        ReportSheet::PriceChanges,
        ReportSheet::NewProducts,
        ReportSheet::FullSummary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReportSheet::PriceChanges => "Cambios de Precio",
            ReportSheet::NewProducts => "Productos Nuevos",
            ReportSheet::FullSummary => "Resumen Completo",
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ReportSheet::PriceChanges => &[
                "Codigo de barras",
                "SKU",
                "Nombre producto",
                "Precio Factura",
                "Precio TBC",
                "Diferencia ($)",
                "Diferencia (%)",
            ],
            ReportSheet::NewProducts => &[
                "Codigo de barras",
                "Nombre producto",
                "Cantidad",
                "Precio unitario",
            ],
            ReportSheet::FullSummary => &[
                "Codigo de barras",
                "SKU",
                "Nombre Factura",
                "Nombre TBC",
                "Cantidad",
                "Precio Factura",
                "Precio TBC",
                "Status",
            ],
        }
    }
}

/// 报告单元格
#[derive(Debug, Clone, PartialEq)]
pub enum ReportValue {
    Text(String),
    Number(BigDecimal),
    Blank,
    Undefined,
}

impl ReportValue {
    fn text(s: &str) -> Self {
        ReportValue::Text(s.to_string())
    }

    fn opt_text(s: &Option<String>) -> Self {
        s.as_deref().map(Self::text).unwrap_or(ReportValue::Blank)
    }

    fn opt_number(n: &Option<BigDecimal>) -> Self {
        n.clone().map(ReportValue::Number).unwrap_or(ReportValue::Blank)
    }

    /// 纯文本形式 (CSV 导出)
    pub fn to_text(&self) -> String {
        match self {
            ReportValue::Text(s) => s.clone(),
            ReportValue::Number(n) => n.to_string(),
            ReportValue::Blank => String::new(),
            ReportValue::Undefined => UNDEFINED_PERCENT.to_string(),
        }
    }
}

/// 报告行 -> 按表头顺序的单元格
pub trait SheetRow {
    fn cells(&self) -> Vec<ReportValue>;
}

impl SheetRow for PriceChangeRow {
    fn cells(&self) -> Vec<ReportValue> {
        vec![
            ReportValue::text(&self.barcode),
            ReportValue::text(&self.sku),
            ReportValue::text(&self.product_name),
            ReportValue::Number(self.invoice_price.clone()),
            ReportValue::Number(self.erp_price.clone()),
            ReportValue::Number(self.absolute_diff.clone()),
            self.percent_diff
                .clone()
                .map(ReportValue::Number)
                .unwrap_or(ReportValue::Undefined),
        ]
    }
}

impl SheetRow for NewProductRow {
    fn cells(&self) -> Vec<ReportValue> {
        vec![
            ReportValue::text(&self.barcode),
            ReportValue::text(&self.product_name),
            ReportValue::Number(self.quantity.clone()),
            ReportValue::Number(self.unit_price.clone()),
        ]
    }
}

impl SheetRow for SummaryRow {
    fn cells(&self) -> Vec<ReportValue> {
        vec![
            ReportValue::text(&self.barcode),
            ReportValue::opt_text(&self.sku),
            ReportValue::text(&self.invoice_product_name),
            ReportValue::opt_text(&self.erp_product_name),
            ReportValue::Number(self.quantity.clone()),
            ReportValue::Number(self.invoice_price.clone()),
            ReportValue::opt_number(&self.erp_price),
            ReportValue::text(self.status.label()),
        ]
    }
}

impl ReconciliationResult {
    /// 某张表的全部行
    pub fn sheet_rows(&self, sheet: ReportSheet) -> Vec<Vec<ReportValue>> {
        match sheet {
            ReportSheet::PriceChanges => self.price_changes.iter().map(SheetRow::cells).collect(),
            ReportSheet::NewProducts => self.new_products.iter().map(SheetRow::cells).collect(),
            ReportSheet::FullSummary => self.full_summary.iter().map(SheetRow::cells).collect(),
        }
    }
}

/// 从分类结果投影出三张表; 只做投影与重命名, 不做计算
pub fn assemble(rows: &[ClassifiedRow], total_invoice_rows: usize, erp_rows_dropped: usize) -> ReconciliationResult {
    let mut price_changes = Vec::new();
    let mut new_products = Vec::new();
    let mut full_summary = Vec::with_capacity(rows.len());
    let mut unchanged = 0usize;

    for row in rows {
        let inv = &row.matched.invoice;
        let erp = row.matched.erp.as_ref();

        match (row.status, erp, &row.diff) {
            (Status::PriceChange, Some(erp), Some(diff)) => price_changes.push(PriceChangeRow {
                barcode: inv.barcode.clone(),
                sku: erp.sku.clone(),
                product_name: inv.product_name.clone(),
                invoice_price: inv.unit_price.clone(),
                erp_price: erp.unit_value.clone(),
                absolute_diff: diff.absolute.clone(),
                percent_diff: diff.percent.clone(),
            }),
            (Status::New, _, _) => new_products.push(NewProductRow {
                barcode: inv.barcode.clone(),
                product_name: inv.product_name.clone(),
                quantity: inv.quantity.clone(),
                unit_price: inv.unit_price.clone(),
            }),
            (Status::Unchanged, _, _) => unchanged += 1,
            (Status::PriceChange, _, _) => {
                tracing::warn!("变价行缺少 ERP 记录或价差: 发票行 {}", inv.row);
            }
        }

        full_summary.push(SummaryRow {
            barcode: inv.barcode.clone(),
            sku: erp.map(|e| e.sku.clone()),
            invoice_product_name: inv.product_name.clone(),
            erp_product_name: erp.map(|e| e.product_name.clone()),
            quantity: inv.quantity.clone(),
            invoice_price: inv.unit_price.clone(),
            erp_price: erp.map(|e| e.unit_value.clone()),
            status: row.status,
        });
    }

    let stats = ReconcileStats {
        total_invoice_rows,
        price_changes: price_changes.len(),
        new_products: new_products.len(),
        unchanged,
        erp_rows_dropped,
    };

    ReconciliationResult {
        price_changes,
        new_products,
        full_summary,
        stats,
    }
}

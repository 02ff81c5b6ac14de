use super::{classify, guard, matcher, normalize, report, schema};
use crate::config::{AppConfig, ErpColumns, InvoiceColumns, ReconcileConfig};
use crate::error::ReconcileError;
use crate::models::{ReconciliationResult, Table};

/// 对账服务: 无状态, 每次调用独立完成整条流水线
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    settings: ReconcileConfig,
    invoice_columns: InvoiceColumns,
    erp_columns: ErpColumns,
}

impl Reconciler {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            settings: config.reconcile.clone(),
            invoice_columns: config.invoice_columns.clone(),
            erp_columns: config.erp_columns.clone(),
        }
    }

    pub fn with_settings(mut self, settings: ReconcileConfig) -> Self {
        self.settings = settings;
        self
    }

    /// 发票 vs ERP 对账
    ///
    /// 顺序: 表头校验 -> 科学计数法检查 -> 规范化 -> 左连接 -> 分类 -> 报表。
    /// 任一阶段失败立即返回错误, 不产生部分结果。
    pub fn reconcile(&self, invoice: &Table, erp: &Table) -> Result<ReconciliationResult, ReconcileError> {
        // 1. 表头校验
        let invoice_idx = schema::validate_invoice(invoice, &self.invoice_columns)?;
        let erp_idx = schema::validate_erp(erp, &self.erp_columns)?;

        // 2. 条码损坏检查 (必须在清洗前)
        guard::check_erp_barcodes(erp, erp_idx.ean, self.settings.sample_limit)?;

        // 3. 规范化
        let lines = normalize::normalize_invoice(invoice, &invoice_idx)?;
        let erp_data = normalize::normalize_erp(erp, &erp_idx);
        tracing::info!(
            "规范化完成: 发票 {} 行, ERP 保留 {} 行, 丢弃 {} 行",
            lines.len(),
            erp_data.records.len(),
            erp_data.dropped
        );

        // 4. 左连接
        let matched = matcher::left_join(
            &lines,
            &erp_data.records,
            &erp_data.price_column,
            self.settings.duplicate_policy,
            self.settings.sample_limit,
        )?;

        // 5. 分类 + 价差
        let classified = classify::classify_rows(matched, self.settings.percent_scale);

        // 6. 报表
        let result = report::assemble(&classified, lines.len(), erp_data.dropped);
        tracing::info!(
            "对账完成: 总商品 {}, 价格变动 {}, 新商品 {}, 无变化 {}",
            result.stats.total_invoice_rows,
            result.stats.price_changes,
            result.stats.new_products,
            result.stats.unchanged
        );

        Ok(result)
    }
}

/// 使用默认配置对账
pub fn reconcile(invoice: &Table, erp: &Table) -> Result<ReconciliationResult, ReconcileError> {
    Reconciler::default().reconcile(invoice, erp)
}

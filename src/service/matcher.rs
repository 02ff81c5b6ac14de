use crate::config::DuplicatePolicy;
use crate::error::ReconcileError;
use crate::models::{ErpEntry, InvoiceLine, MatchedRow};
use indexmap::{IndexMap, IndexSet};

/// 条码 -> ERP 记录倒排索引 (保持文件顺序)
#[derive(Debug)]
pub struct ErpIndex<'a> {
    by_barcode: IndexMap<&'a str, Vec<&'a ErpEntry>>,
}

impl<'a> ErpIndex<'a> {
    /// 空条码的记录不入索引, 永远不会被匹配
    pub fn build(records: &'a [ErpEntry]) -> Self {
        let mut by_barcode: IndexMap<&'a str, Vec<&'a ErpEntry>> = IndexMap::new();
        for rec in records {
            if rec.ean.is_empty() {
                continue;
            }
            by_barcode.entry(rec.ean.as_str()).or_default().push(rec);
        }
        Self { by_barcode }
    }

    pub fn lookup(&self, barcode: &str) -> &[&'a ErpEntry] {
        self.by_barcode
            .get(barcode)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// 出现多次的条码
    pub fn duplicates(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.by_barcode
            .iter()
            .filter(|(_, recs)| recs.len() > 1)
            .map(|(code, _)| *code)
    }

    pub fn len(&self) -> usize {
        self.by_barcode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_barcode.is_empty()
    }
}

/// 以发票为主表的左外连接, 条码逐字节相等
///
/// 只有被发票命中的 ERP 行才要求价格有效, 未引用的行不参与校验。
pub fn left_join(
    invoice: &[InvoiceLine],
    erp: &[ErpEntry],
    price_column: &str,
    policy: DuplicatePolicy,
    sample_limit: usize,
) -> Result<Vec<MatchedRow>, ReconcileError> {
    let index = ErpIndex::build(erp);

    // 发票实际命中的重复条码 (去重、保序)
    let mut hit_duplicates: IndexSet<&str> = IndexSet::new();
    for line in invoice {
        if index.lookup(&line.barcode).len() > 1 {
            hit_duplicates.insert(line.barcode.as_str());
        }
    }

    let unused_duplicates = index
        .duplicates()
        .filter(|code| !hit_duplicates.contains(code))
        .count();
    if unused_duplicates > 0 {
        tracing::warn!(
            "ERP 导出中有 {} 个重复条码未被发票引用, 已忽略",
            unused_duplicates
        );
    }

    if !hit_duplicates.is_empty() {
        match policy {
            DuplicatePolicy::Reject => {
                let barcodes: Vec<String> = hit_duplicates
                    .iter()
                    .take(sample_limit)
                    .map(|s| s.to_string())
                    .collect();
                tracing::error!(
                    "发票命中 {} 个重复 ERP 条码: {:?}",
                    hit_duplicates.len(),
                    barcodes
                );
                return Err(ReconcileError::DuplicateBarcode { barcodes });
            }
            DuplicatePolicy::FirstMatch => {
                tracing::warn!(
                    "发票命中 {} 个重复 ERP 条码, 取首条记录",
                    hit_duplicates.len()
                );
            }
            DuplicatePolicy::FanOut => {
                tracing::warn!(
                    "发票命中 {} 个重复 ERP 条码, 结果行将展开",
                    hit_duplicates.len()
                );
            }
        }
    }

    let mut rows = Vec::with_capacity(invoice.len());
    let mut matched = 0usize;

    for line in invoice {
        let candidates = index.lookup(&line.barcode);
        match candidates {
            [] => rows.push(MatchedRow {
                invoice: line.clone(),
                erp: None,
            }),
            [first, ..] if policy != DuplicatePolicy::FanOut => {
                matched += 1;
                rows.push(MatchedRow {
                    invoice: line.clone(),
                    erp: Some(first.resolve(price_column)?),
                });
            }
            all => {
                matched += 1;
                for rec in all {
                    rows.push(MatchedRow {
                        invoice: line.clone(),
                        erp: Some(rec.resolve(price_column)?),
                    });
                }
            }
        }
    }

    tracing::info!(
        "左连接完成: 发票行 {}, 命中 {}, ERP 条码 {}",
        invoice.len(),
        matched,
        index.len()
    );

    Ok(rows)
}

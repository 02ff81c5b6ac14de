use crate::models::{ClassifiedRow, MatchedRow, PriceDiff, Status};
use bigdecimal::{BigDecimal, Zero};

/// 行状态, 纯函数: 无 ERP 记录为新品, 价格不等 (精确比较) 为变价
pub fn classify(row: &MatchedRow) -> Status {
    match &row.erp {
        None => Status::New,
        Some(erp) if row.invoice.unit_price != erp.unit_value => Status::PriceChange,
        Some(_) => Status::Unchanged,
    }
}

/// 价差: 绝对值与百分比; ERP 价格为 0 时百分比无定义
pub fn price_diff(invoice_price: &BigDecimal, erp_price: &BigDecimal, percent_scale: i64) -> PriceDiff {
    let absolute = invoice_price - erp_price;
    let percent = if erp_price.is_zero() {
        None
    } else {
        Some(((&absolute * &BigDecimal::from(100)) / erp_price).round(percent_scale))
    };
    PriceDiff { absolute, percent }
}

pub fn classify_rows(rows: Vec<MatchedRow>, percent_scale: i64) -> Vec<ClassifiedRow> {
    rows.into_iter()
        .map(|matched| {
            let status = classify(&matched);
            let diff = match (&status, &matched.erp) {
                (Status::PriceChange, Some(erp)) => Some(price_diff(
                    &matched.invoice.unit_price,
                    &erp.unit_value,
                    percent_scale,
                )),
                _ => None,
            };
            ClassifiedRow {
                matched,
                status,
                diff,
            }
        })
        .collect()
}

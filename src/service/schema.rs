use crate::config::{ErpColumns, InvoiceColumns};
use crate::error::{ReconcileError, TableKind};
use crate::models::Table;

/// 发票必需列在表中的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceColumnIndex {
    pub barcode: usize,
    pub product_name: usize,
    pub quantity: usize,
    pub unit_price: usize,
}

/// ERP 必需列在表中的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErpColumnIndex {
    pub ean: usize,
    pub sku: usize,
    pub product_name: usize,
    pub unit_value: usize,
}

/// 校验发票表头, 一次性报告全部缺失列
pub fn validate_invoice(
    table: &Table,
    columns: &InvoiceColumns,
) -> Result<InvoiceColumnIndex, ReconcileError> {
    let [barcode, product_name, quantity, unit_price] =
        resolve(table, columns.required(), TableKind::Invoice)?;
    Ok(InvoiceColumnIndex {
        barcode,
        product_name,
        quantity,
        unit_price,
    })
}

/// 校验 ERP 表头
pub fn validate_erp(table: &Table, columns: &ErpColumns) -> Result<ErpColumnIndex, ReconcileError> {
    let [ean, sku, product_name, unit_value] = resolve(table, columns.required(), TableKind::Erp)?;
    Ok(ErpColumnIndex {
        ean,
        sku,
        product_name,
        unit_value,
    })
}

fn resolve<const N: usize>(
    table: &Table,
    required: [&str; N],
    kind: TableKind,
) -> Result<[usize; N], ReconcileError> {
    let mut found = [0usize; N];
    let mut missing = Vec::new();

    for (slot, name) in found.iter_mut().zip(required) {
        match table.column_index(name) {
            Some(idx) => *slot = idx,
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        tracing::warn!("{} table missing columns: {:?}", kind, missing);
        return Err(ReconcileError::Schema {
            table: kind,
            missing,
        });
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> Table {
        Table::new(headers.iter().map(|h| h.to_string()).collect())
    }

    #[test]
    fn resolves_invoice_columns_in_any_order() {
        let t = table(&["Precio unitario", " Codigo de barras ", "Cantidad", "Nombre producto", "Extra"]);
        let idx = validate_invoice(&t, &InvoiceColumns::default()).unwrap();
        assert_eq!(
            idx,
            InvoiceColumnIndex {
                barcode: 1,
                product_name: 3,
                quantity: 2,
                unit_price: 0,
            }
        );
    }

    #[test]
    fn reports_every_missing_invoice_column_at_once() {
        let t = table(&["Codigo de barras", "Cantidad"]);
        let err = validate_invoice(&t, &InvoiceColumns::default()).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::Schema {
                table: TableKind::Invoice,
                missing: vec!["Nombre producto".to_string(), "Precio unitario".to_string()],
            }
        );
        assert!(err.to_string().contains("Nombre producto, Precio unitario"));
    }

    #[test]
    fn erp_schema_is_checked_too() {
        let t = table(&["Codean", "Codpro", "Nompro"]);
        match validate_erp(&t, &ErpColumns::default()) {
            Err(ReconcileError::Schema { table, missing }) => {
                assert_eq!(table, TableKind::Erp);
                assert_eq!(missing, vec!["Valuni"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}

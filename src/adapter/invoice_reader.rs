use crate::error::AdapterError;
use crate::models::{Cell, Table};
use calamine::{open_workbook_auto, open_workbook_from_rs, Data, Range, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

/// calamine 单元格 -> 内部单元格
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::from(*i),
        Data::Float(f) => Cell::from(*f),
        Data::String(s) => Cell::from(s.as_str()),
        other => Cell::Text(other.to_string()),
    }
}

/// 第一行为表头, 其余为数据; 跳过整行空白
fn range_to_table(range: &Range<Data>, source: &str) -> Result<Table, AdapterError> {
    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| AdapterError::MissingHeader(source.to_string()))?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut table = Table::new(headers);
    for data_row in rows {
        let cells: Vec<Cell> = data_row.iter().map(to_cell).collect();
        if cells.iter().all(Cell::is_blank) {
            continue;
        }
        table.push_row(cells);
    }

    tracing::debug!("{}: 读取 {} 行", source, table.len());
    Ok(table)
}

/// 读取发票 Excel (xlsx/xls/ods) 的第一个工作表
pub fn read_invoice_file(path: &Path) -> Result<Table, AdapterError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| AdapterError::Excel(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AdapterError::Excel("workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AdapterError::Excel(e.to_string()))?;

    range_to_table(&range, &path.display().to_string())
}

/// 从内存中的 xlsx 字节读取发票
pub fn read_invoice_xlsx_bytes(bytes: &[u8]) -> Result<Table, AdapterError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: calamine::XlsxError| AdapterError::Excel(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AdapterError::Excel("workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AdapterError::Excel(e.to_string()))?;

    range_to_table(&range, "invoice upload")
}

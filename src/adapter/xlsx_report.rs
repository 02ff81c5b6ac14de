use crate::error::AdapterError;
use crate::models::ReconciliationResult;
use crate::service::{ReportSheet, ReportValue};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// 下载文件的默认文件名
pub const REPORT_FILE_NAME: &str = "Reporte_Factura_vs_TBC.xlsx";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn write_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &ReportValue,
) -> Result<(), AdapterError> {
    match value {
        ReportValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        // 经十进制文本转换, 0.3 写入后仍为 0.3
        ReportValue::Number(n) => match n.to_string().parse::<f64>() {
            Ok(f) if f.is_finite() => {
                worksheet.write_number(row, col, f)?;
            }
            _ => {
                worksheet.write_string(row, col, n.to_string())?;
            }
        },
        ReportValue::Undefined => {
            worksheet.write_string(row, col, value.to_text())?;
        }
        ReportValue::Blank => {}
    }
    Ok(())
}

fn build_workbook(result: &ReconciliationResult) -> Result<Workbook, AdapterError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for sheet in ReportSheet::ALL {
        let worksheet = workbook.add_worksheet().set_name(sheet.name())?;

        for (col, header) in sheet.headers().iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        let rows = result.sheet_rows(sheet);
        for (r, cells) in rows.iter().enumerate() {
            for (c, value) in cells.iter().enumerate() {
                write_value(worksheet, r as u32 + 1, c as u16, value)?;
            }
        }

        tracing::debug!("工作表 {} 写入 {} 行", sheet.name(), rows.len());
    }

    Ok(workbook)
}

/// 生成三表报告 (内存)
pub fn write_report_to_buffer(result: &ReconciliationResult) -> Result<Vec<u8>, AdapterError> {
    let mut workbook = build_workbook(result)?;
    Ok(workbook.save_to_buffer()?)
}

/// 生成三表报告到文件
pub fn write_report(result: &ReconciliationResult, path: &Path) -> Result<(), AdapterError> {
    let mut workbook = build_workbook(result)?;
    workbook.save(path)?;
    tracing::info!("报告已写入 {}", path.display());
    Ok(())
}

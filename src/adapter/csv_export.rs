use crate::error::AdapterError;
use crate::models::ReconciliationResult;
use crate::service::ReportSheet;
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 将报告中的一张表导出为 CSV (含表头)
pub fn write_sheet_csv<W: Write>(
    result: &ReconciliationResult,
    sheet: ReportSheet,
    out: W,
) -> Result<(), AdapterError> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(sheet.headers())?;

    for cells in result.sheet_rows(sheet) {
        writer.write_record(cells.iter().map(|c| c.to_text()))?;
    }

    writer.flush()?;
    Ok(())
}

/// 导出到文件
pub fn export_to_csv(
    result: &ReconciliationResult,
    sheet: ReportSheet,
    output_path: &Path,
) -> Result<(), AdapterError> {
    let file = File::create(output_path)?;
    write_sheet_csv(result, sheet, file)
}

use crate::config::ErpSourceConfig;
use crate::error::AdapterError;
use crate::models::{Cell, Table};
use csv::ReaderBuilder;
use encoding_rs::Encoding;
use std::path::Path;

/// 字节 -> 文本: 先按 UTF-8 (去 BOM), 失败则按配置的单字节编码解码
pub fn decode_text(bytes: &[u8], fallback_label: &str) -> Result<String, AdapterError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_string()),
        Err(_) => {
            let encoding = Encoding::for_label(fallback_label.as_bytes())
                .ok_or_else(|| AdapterError::UnknownEncoding(fallback_label.to_string()))?;
            let (decoded, _, _) = encoding.decode(bytes);
            tracing::debug!("ERP 导出按 {} 解码", encoding.name());
            Ok(decoded.into_owned())
        }
    }
}

/// 解析 ERP CSV; 所有字段按文本保留, 科学计数法检查依赖原始文本
pub fn parse_erp_csv(bytes: &[u8], source: &ErpSourceConfig) -> Result<Table, AdapterError> {
    // csv 只支持单字节分隔符
    let delimiter = u8::try_from(source.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(AdapterError::InvalidDelimiter(source.delimiter))?;
    let text = decode_text(bytes, &source.encoding)?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(AdapterError::MissingHeader("ERP export".to_string()));
    }

    let mut table = Table::new(headers);
    for result in reader.records() {
        let record = result?;
        let cells: Vec<Cell> = record
            .iter()
            .map(|v| if v.is_empty() { Cell::Empty } else { Cell::text(v) })
            .collect();
        table.push_row(cells);
    }

    tracing::debug!("ERP 导出: 读取 {} 行", table.len());
    Ok(table)
}

pub fn read_erp_file(path: &Path, source: &ErpSourceConfig) -> Result<Table, AdapterError> {
    let bytes = std::fs::read(path)?;
    parse_erp_csv(&bytes, source)
}

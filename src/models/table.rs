use serde::{Deserialize, Serialize};
use std::fmt;

/// 单元格值 (Excel / JSON 适配层的统一表示)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// 规范文本表示: 整数不带小数位, 浮点取最短往返表示
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }

    /// 去除首尾空白后是否为空
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Int(_) | Cell::Float(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

/// 内存表: 表头 + 数据行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// 按表头名查找列下标 (忽略首尾空白)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// 取单元格, 越界视为空
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_render_canonically() {
        assert_eq!(Cell::Int(7501234567890).to_text(), "7501234567890");
        assert_eq!(Cell::Float(7501234567890.0).to_text(), "7501234567890");
        assert_eq!(Cell::Float(4.5).to_text(), "4.5");
        assert_eq!(Cell::Empty.to_text(), "");
    }

    #[test]
    fn cells_deserialize_from_json_scalars() {
        let cells: Vec<Cell> = serde_json::from_str(r#"[null, 12, 4.5, "abc"]"#).unwrap();
        assert_eq!(
            cells,
            vec![Cell::Empty, Cell::Int(12), Cell::Float(4.5), Cell::text("abc")]
        );
    }

    #[test]
    fn cells_convert_from_scalars() {
        assert_eq!(Cell::from("abc"), Cell::Text("abc".to_string()));
        assert_eq!(Cell::from(12i64), Cell::Int(12));
        assert_eq!(Cell::from(4.5), Cell::Float(4.5));
        assert_eq!(Cell::from(" "), Cell::text(" "));
        assert!(Cell::from(" ").is_blank());
    }

    #[test]
    fn short_rows_read_as_empty() {
        let mut table = Table::new(vec!["a".into(), " b ".into()]);
        assert!(table.is_empty());
        table.push_row(vec![Cell::from(1i64)]);
        assert!(!table.is_empty());
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.cell(0, 1), &Cell::Empty);
        assert!(table.cell(5, 0).is_blank());
    }
}

use std::fmt::{self, Display};

/// 表格单元格的值
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            // 整数不显示小数部分
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// 表格中的一行：列名 → 值，按列顺序保存，空单元格不保存
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpreadsheetRow {
    cells: Vec<(String, CellValue)>,
}

impl SpreadsheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.push((column.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// 按列名取值
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// 第 `index` 个非空值
    pub fn value_at(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index).map(|(_, value)| value)
    }

    /// 前三个位置值，缺失的位置为空字符串
    pub fn leading_values(&self) -> [String; 3] {
        let at = |i: usize| self.value_at(i).map(|v| v.to_string()).unwrap_or_default();
        [at(0), at(1), at(2)]
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for SpreadsheetRow {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display() {
        assert_eq!(CellValue::Number(1.0).to_string(), "1");
        assert_eq!(CellValue::Number(-20.0).to_string(), "-20");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_leading_values_pads_short_rows() {
        let row: SpreadsheetRow = vec![
            ("Drawing", CellValue::Text("S-101".to_string())),
            ("Rev", CellValue::Number(3.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(row.leading_values(), ["S-101".to_string(), "3".to_string(), String::new()]);
        assert_eq!(row.get("Rev"), Some(&CellValue::Number(3.0)));
    }
}

//! 表格读取服务 - 业务能力层
//!
//! 只读取第一个工作表，首行作为列名，其余每行转换为一个 `SpreadsheetRow`

use crate::error::{AppResult, SpreadsheetError};
use crate::models::{CellValue, SpreadsheetFile, SpreadsheetRow};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use tracing::debug;

/// 表格格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SheetFormat {
    Workbook,
    Csv,
}

/// 表格读取服务
#[derive(Debug, Default, Clone, Copy)]
pub struct SpreadsheetReader;

impl SpreadsheetReader {
    pub fn new() -> Self {
        Self
    }

    /// 一次性读取全部数据行
    ///
    /// 空单元格不计入位置值，整行为空的行被跳过
    pub fn read_rows(&self, file: &SpreadsheetFile) -> AppResult<Vec<SpreadsheetRow>> {
        let rows = match detect_format(file)? {
            SheetFormat::Workbook => read_workbook(file)?,
            SheetFormat::Csv => read_csv(file)?,
        };
        debug!("表格 {} 读取完成: {} 行", file.name, rows.len());
        Ok(rows)
    }
}

fn detect_format(file: &SpreadsheetFile) -> Result<SheetFormat, SpreadsheetError> {
    match file.extension().as_deref() {
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(SheetFormat::Workbook),
        Some("csv") => Ok(SheetFormat::Csv),
        _ => Err(SpreadsheetError::UnsupportedFormat {
            name: file.name.clone(),
        }),
    }
}

fn read_workbook(file: &SpreadsheetFile) -> AppResult<Vec<SpreadsheetRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(file.bytes.clone()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SpreadsheetError::NoSheets {
            name: file.name.clone(),
        })??;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_names(header_row.iter().map(|c| cell_text(c))),
        None => return Ok(Vec::new()),
    };

    Ok(rows
        .map(|cells| build_row(&headers, cells.iter().map(workbook_cell)))
        .filter(|row| !row.is_empty())
        .collect())
}

fn read_csv(file: &SpreadsheetFile) -> AppResult<Vec<SpreadsheetRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file.bytes.as_slice());

    let headers = header_names(reader.headers()?.iter().map(|h| h.to_string()));

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = build_row(&headers, record.iter().map(csv_cell));
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// 空列名用 `__EMPTY_<列号>` 代替
fn header_names(names: impl Iterator<Item = String>) -> Vec<String> {
    names
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim().to_string();
            if name.is_empty() {
                format!("__EMPTY_{}", i)
            } else {
                name
            }
        })
        .collect()
}

fn build_row(headers: &[String], cells: impl Iterator<Item = Option<CellValue>>) -> SpreadsheetRow {
    cells
        .enumerate()
        .filter_map(|(i, value)| {
            let column = headers
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("__EMPTY_{}", i));
            value.map(|v| (column, v))
        })
        .collect()
}

fn cell_text(cell: &Data) -> String {
    workbook_cell(cell).map(|v| v.to_string()).unwrap_or_default()
}

fn workbook_cell(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            Some(CellValue::Text(s.clone()))
        }
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        // 日期按序列号输出
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::Error(e) => Some(CellValue::Text(e.to_string())),
    }
}

/// CSV 单元格一律按文本保存，保留前导零和小数位
fn csv_cell(raw: &str) -> Option<CellValue> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(CellValue::Text(raw.to_string()))
}

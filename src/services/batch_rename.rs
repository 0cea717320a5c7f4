//! 批量重命名流程
//!
//! 表格 → 行缓冲区 → 文件名列表 → 清理上传

use crate::clients::DocumentStore;
use crate::error::AppResult;
use crate::models::{OperationOutcome, ResolvedJob, SpreadsheetFile, SpreadsheetRow};
use crate::services::spreadsheet_reader::SpreadsheetReader;
use std::sync::Arc;
use tracing::{debug, info};

/// 清理上传成功提示
pub const CLEANED_MESSAGE: &str = "Successfully uploaded cleaned files";

/// 由项目名和前三个位置值生成文件名 `"<项目名>_<v0>_<v1>_<v2>"`
pub fn synthesize_file_name(job_name: &str, row: &SpreadsheetRow) -> String {
    let [first, second, third] = row.leading_values();
    format!("{}_{}_{}_{}", job_name, first, second, third)
}

/// 批量重命名流程
///
/// 行缓冲区在每次运行的开始和结束都会清空，失败时也一样
pub struct BatchRenamePipeline {
    reader: SpreadsheetReader,
    store: Arc<dyn DocumentStore>,
    rows: Vec<SpreadsheetRow>,
}

impl BatchRenamePipeline {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            reader: SpreadsheetReader::new(),
            store,
            rows: Vec::new(),
        }
    }

    /// 当前缓冲的行（运行结束后总为空）
    pub fn buffered_rows(&self) -> &[SpreadsheetRow] {
        &self.rows
    }

    pub async fn run(
        &mut self,
        job: &ResolvedJob,
        spreadsheet: &SpreadsheetFile,
    ) -> AppResult<OperationOutcome> {
        self.rows.clear();
        let result = self.run_inner(job, spreadsheet).await;
        self.rows.clear();
        result
    }

    async fn run_inner(
        &mut self,
        job: &ResolvedJob,
        spreadsheet: &SpreadsheetFile,
    ) -> AppResult<OperationOutcome> {
        // 先完整读取全部行，再发起上传
        // 没有数据行时上传空列表
        self.rows = self.reader.read_rows(spreadsheet)?;

        let file_names: Vec<String> = self
            .rows
            .iter()
            .map(|row| synthesize_file_name(&job.name, row))
            .collect();

        info!("📄 {} 根据 {} 生成 {} 个文件名", job, spreadsheet.name, file_names.len());
        debug!("文件名列表: {:?}", file_names);

        let remark = self.store.clean_upload(job, &file_names).await?;
        Ok(OperationOutcome::new(CLEANED_MESSAGE, Some(remark)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;

    #[test]
    fn test_synthesize_file_name() {
        let row: SpreadsheetRow = vec![
            ("Drawing", CellValue::Text("S-101".to_string())),
            ("Title", CellValue::Text("Ground Floor".to_string())),
            ("Rev", CellValue::Number(2.0)),
            ("Notes", CellValue::Text("ignored".to_string())),
        ]
        .into_iter()
        .collect();

        assert_eq!(synthesize_file_name("1234M", &row), "1234M_S-101_Ground Floor_2");
    }

    #[test]
    fn test_synthesize_file_name_short_row() {
        let row: SpreadsheetRow = vec![("Drawing", CellValue::Text("S-101".to_string()))]
            .into_iter()
            .collect();
        assert_eq!(synthesize_file_name("1234M", &row), "1234M_S-101__");
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 任务清单：先选择项目，再依次执行文件操作
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchPlan {
    /// 项目输入（与输入框中的文字一致）
    pub job: String,
    /// 自动补全中选中的条目
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    #[serde(default)]
    pub operations: Vec<PlannedOperation>,
    /// 清单文件路径，相对路径以此为基准
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<PathBuf>,
}

/// 清单中的单个文件操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlannedOperation {
    /// 收到的文件，按分类上传
    Upload {
        category: String,
        files: Vec<PathBuf>,
    },
    /// 签发文件
    Issue { files: Vec<PathBuf> },
    /// 按表格批量重命名
    Clean { spreadsheet: PathBuf },
}

impl PlannedOperation {
    pub fn describe(&self) -> String {
        match self {
            PlannedOperation::Upload { category, files } => {
                format!("上传 {} 个文件到 {}", files.len(), category)
            }
            PlannedOperation::Issue { files } => format!("签发 {} 个文件", files.len()),
            PlannedOperation::Clean { spreadsheet } => {
                format!("按表格 {} 重命名", spreadsheet.display())
            }
        }
    }
}

impl DispatchPlan {
    /// 以清单所在目录为基准解析路径
    pub fn resolve_path(&self, path: &std::path::Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.file_path.as_ref().and_then(|p| p.parent()) {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }
}

use crate::error::{AppError, AppResult};
use crate::models::ResolvedJob;

/// 未选择项目时的提示
pub const NO_JOB_SELECTED: &str =
    "No job selected. Please select a job before attempting to upload a file.";

/// 上传前置检查：没有当前项目时禁止任何文件操作
pub struct UploadGate;

impl UploadGate {
    /// 有当前项目时返回该项目，否则返回 `Blocked`
    pub fn check(current: Option<&ResolvedJob>) -> AppResult<&ResolvedJob> {
        current.ok_or_else(|| AppError::Blocked(NO_JOB_SELECTED.to_string()))
    }
}

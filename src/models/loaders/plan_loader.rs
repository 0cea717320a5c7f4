use crate::error::{AppError, AppResult, FileError};
use crate::models::plan::DispatchPlan;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载任务清单
pub async fn load_dispatch_plan(plan_path: &Path) -> AppResult<DispatchPlan> {
    let content = fs::read_to_string(plan_path)
        .await
        .map_err(|e| AppError::file_read_failed(plan_path.display().to_string(), e))?;

    let mut plan: DispatchPlan =
        toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: plan_path.display().to_string(),
            source,
        })?;

    // 设置文件路径
    plan.file_path = Some(plan_path.to_path_buf());

    tracing::info!(
        "已加载任务清单 {}: 共 {} 个操作",
        plan_path.display(),
        plan.operations.len()
    );

    Ok(plan)
}

//! 外部协作方接口
//!
//! 核心流程只通过这些 trait 访问远程服务和界面，具体实现见 `DriveClient`、
//! `ProjectWorksClient` 和 `LogNotifier`

use crate::error::AppResult;
use crate::models::{FileSet, Remark, ResolvedJob};
use async_trait::async_trait;
use serde_json::Value;

/// 文件夹搜索
#[async_trait]
pub trait FolderSearch: Send + Sync {
    /// 按查询语句搜索文件夹，返回 `{id, name}` 列表
    async fn search_folders(&self, query: &str, fields: &str) -> AppResult<Vec<ResolvedJob>>;
}

/// 文件上传服务
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 上传收到的文件到项目的分类子文件夹
    async fn upload_to_subfolder(
        &self,
        job: &ResolvedJob,
        subfolder: &str,
        files: &FileSet,
    ) -> AppResult<Remark>;

    /// 记录签发事件
    async fn record_issued(&self, job: &ResolvedJob, files: &FileSet) -> AppResult<Remark>;

    /// 更新“当前版本”指针，返回值不展示给用户
    async fn update_current(&self, job: &ResolvedJob, files: &FileSet) -> AppResult<Value>;

    /// 按文件名列表生成并上传清理后的文件
    async fn clean_upload(&self, job: &ResolvedJob, file_names: &[String]) -> AppResult<Remark>;
}

/// 项目目录（只用于自动补全，允许过期）
#[async_trait]
pub trait JobDirectory: Send + Sync {
    /// 返回 `"<编号> | <名称>"` 列表
    async fn list_jobs(&self) -> AppResult<Vec<String>>;
}

/// 界面通知
///
/// 三种通知由用户各自关闭
pub trait NotificationSurface: Send + Sync {
    fn show_success(&self, message: &str);
    fn show_error(&self, message: &str);
    fn show_remark(&self, remark: &Remark);
}

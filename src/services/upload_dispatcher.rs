//! 分类上传服务 - 业务能力层
//!
//! 只负责“把一组文件上传到某个项目”，不处理界面状态

use crate::clients::DocumentStore;
use crate::error::AppResult;
use crate::models::{FileSet, OperationOutcome, Remark, ResolvedJob, UploadTarget};
use std::sync::Arc;
use tracing::{debug, info};

/// 上传成功提示
pub fn uploaded_message(count: usize) -> String {
    format!("Successfully uploaded {} files", count)
}

/// 分类上传服务
pub struct UploadDispatcher {
    store: Arc<dyn DocumentStore>,
}

impl UploadDispatcher {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// 上传文件
    ///
    /// # 参数
    /// - `job`: 当前项目
    /// - `target`: 分类子文件夹或签发
    /// - `files`: 文件集合
    ///
    /// # 返回
    /// 成功提示和上传接口返回的备注；远程调用失败直接向上返回
    pub async fn dispatch(
        &self,
        job: &ResolvedJob,
        target: UploadTarget,
        files: &FileSet,
    ) -> AppResult<OperationOutcome> {
        info!("📤 {} 上传 {} 个文件 → {}", job, files.len(), target);

        let remark = match target {
            UploadTarget::Subfolder(category) => {
                self.store
                    .upload_to_subfolder(job, category.subfolder(), files)
                    .await?
            }
            UploadTarget::Issued => self.dispatch_issued(job, files).await?,
        };

        info!("✓ {} 上传完成", job);
        Ok(OperationOutcome::new(uploaded_message(files.len()), Some(remark)))
    }

    /// 签发文件：先记录签发，再更新当前版本
    ///
    /// 两次调用依次完成；只展示第一次调用的备注，第二次的返回值丢弃
    async fn dispatch_issued(&self, job: &ResolvedJob, files: &FileSet) -> AppResult<Remark> {
        let remark = self.store.record_issued(job, files).await?;
        let current = self.store.update_current(job, files).await?;
        debug!("当前版本已更新: {}", current);
        Ok(remark)
    }
}

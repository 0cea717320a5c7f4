//! 操作流程控制 - 流程层
//!
//! 每次操作的状态流转：
//!
//! ```text
//! Idle → Validating → (Failed | Resolving | Dispatching) → (Succeeded | Failed)
//! ```
//!
//! - 选择项目：Validating（输入校验）→ Resolving（文件夹搜索）
//! - 文件操作：Validating（UploadGate 检查）→ Dispatching（上传 / 批量重命名）
//! - `is_loading` 只在 Resolving / Dispatching 期间为 true
//! - 成功与错误横幅互斥，每次新操作开始时都会清空
//!
//! 所有方法都需要 `&mut self`，同一时间最多只有一个操作在进行。
//! 操作的 future 在完成前被丢弃时，状态会被置为 Failed 并清除 loading。

use crate::clients::{DocumentStore, FolderSearch, JobDirectory, NotificationSurface};
use crate::error::{AppError, AppResult};
use crate::models::{
    FileSet, JobToken, OperationOutcome, ResolvedJob, SpreadsheetFile, UploadCategory,
    UploadTarget, WorkflowPhase, WorkflowStatus,
};
use crate::services::{BatchRenamePipeline, JobResolver, UploadDispatcher, UploadGate};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// 操作被中断时的提示
pub const INTERRUPTED_MESSAGE: &str = "The operation was interrupted before it finished";

/// 没有选择文件时的提示
pub const NO_FILES_MESSAGE: &str = "No files selected";

/// 操作流程控制器
///
/// 持有界面状态（加载中 / 横幅 / 备注）并编排各项服务
pub struct WorkflowController {
    resolver: JobResolver,
    dispatcher: UploadDispatcher,
    pipeline: BatchRenamePipeline,
    notifier: Arc<dyn NotificationSurface>,
    status: Arc<watch::Sender<WorkflowStatus>>,
}

impl WorkflowController {
    pub fn new(
        search: Arc<dyn FolderSearch>,
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn NotificationSurface>,
    ) -> Self {
        let (status, _) = watch::channel(WorkflowStatus::default());
        Self {
            resolver: JobResolver::new(search),
            dispatcher: UploadDispatcher::new(store.clone()),
            pipeline: BatchRenamePipeline::new(store),
            notifier,
            status: Arc::new(status),
        }
    }

    /// 订阅界面状态变化
    pub fn subscribe(&self) -> watch::Receiver<WorkflowStatus> {
        self.status.subscribe()
    }

    /// 当前界面状态快照
    pub fn status(&self) -> WorkflowStatus {
        self.status.borrow().clone()
    }

    pub fn current_job(&self) -> Option<&ResolvedJob> {
        self.resolver.current()
    }

    /// 批量重命名的行缓冲区
    pub fn buffered_rows(&self) -> usize {
        self.pipeline.buffered_rows().len()
    }

    pub async fn load_directory(&mut self, directory: &dyn JobDirectory) -> AppResult<usize> {
        self.resolver.load_directory(directory).await
    }

    pub fn suggest(&self, input: &str, limit: usize) -> Vec<&str> {
        self.resolver.suggest(input, limit)
    }

    pub fn dismiss_success(&self) {
        self.status.send_modify(WorkflowStatus::dismiss_success);
    }

    pub fn dismiss_error(&self) {
        self.status.send_modify(WorkflowStatus::dismiss_error);
    }

    pub fn dismiss_remark(&self) {
        self.status.send_modify(WorkflowStatus::dismiss_remark);
    }

    // ========== 操作入口 ==========

    /// 选择项目
    pub async fn select_job(&mut self, token: &JobToken) -> AppResult<ResolvedJob> {
        let _guard = self.begin()?;

        let identifier = match token.identifier() {
            Ok(identifier) => identifier,
            Err(e) => return Err(self.fail(e)),
        };

        self.enter(WorkflowPhase::Resolving);
        let result = self
            .resolver
            .resolve_identifier(&identifier)
            .await
            .map(|job| job.clone());

        match result {
            Ok(job) => {
                self.succeed(OperationOutcome::new(format!("Job {} selected", job.name), None));
                Ok(job)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// 上传收到的文件到分类子文件夹
    pub async fn upload_received(
        &mut self,
        category: UploadCategory,
        files: FileSet,
    ) -> AppResult<OperationOutcome> {
        self.upload(UploadTarget::Subfolder(category), files).await
    }

    /// 签发文件
    pub async fn upload_issued(&mut self, files: FileSet) -> AppResult<OperationOutcome> {
        self.upload(UploadTarget::Issued, files).await
    }

    async fn upload(&mut self, target: UploadTarget, files: FileSet) -> AppResult<OperationOutcome> {
        let _guard = self.begin()?;

        let job = match self.checked_job() {
            Ok(job) => job,
            Err(e) => return Err(self.fail(e)),
        };
        if files.is_empty() {
            return Err(self.fail(AppError::Validation(NO_FILES_MESSAGE.to_string())));
        }

        self.enter(WorkflowPhase::Dispatching);
        let result = self.dispatcher.dispatch(&job, target, &files).await;
        self.finish(result)
    }

    /// 按表格批量重命名并上传清理后的文件
    pub async fn clean_from_spreadsheet(
        &mut self,
        spreadsheet: SpreadsheetFile,
    ) -> AppResult<OperationOutcome> {
        let _guard = self.begin()?;

        let job = match self.checked_job() {
            Ok(job) => job,
            Err(e) => return Err(self.fail(e)),
        };

        self.enter(WorkflowPhase::Dispatching);
        let result = self.pipeline.run(&job, &spreadsheet).await;
        self.finish(result)
    }

    /// 记录在进入控制器之前就已失败的操作（读取本地文件、解析分类等）
    ///
    /// 与其他操作一样先清空横幅，再进入 Failed 并通知错误
    pub fn reject(&mut self, err: AppError) -> AppError {
        match self.begin() {
            Ok(_guard) => self.fail(err),
            Err(busy) => busy,
        }
    }

    // ========== 状态流转 ==========

    /// 开始新操作：清空横幅和备注，进入 Validating
    fn begin(&self) -> AppResult<InFlight> {
        if self.status.borrow().phase.is_in_flight() {
            warn!("⚠️ 上一个操作尚未结束，拒绝新的操作");
            return Err(AppError::Busy);
        }

        self.status.send_modify(|s| {
            s.phase = WorkflowPhase::Validating;
            s.is_loading = false;
            s.success_message = None;
            s.error_message = None;
            s.remark = None;
        });

        Ok(InFlight {
            status: self.status.clone(),
            notifier: self.notifier.clone(),
        })
    }

    fn checked_job(&self) -> AppResult<ResolvedJob> {
        UploadGate::check(self.resolver.current()).cloned()
    }

    fn enter(&self, phase: WorkflowPhase) {
        debug!("状态: {}", phase);
        self.status.send_modify(|s| {
            s.phase = phase;
            s.is_loading = true;
        });
    }

    fn finish(&self, result: AppResult<OperationOutcome>) -> AppResult<OperationOutcome> {
        match result {
            Ok(outcome) => {
                self.succeed(outcome.clone());
                Ok(outcome)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn succeed(&self, outcome: OperationOutcome) {
        info!("✓ {}", outcome.message);
        self.status.send_modify(|s| {
            s.phase = WorkflowPhase::Succeeded;
            s.is_loading = false;
            s.error_message = None;
            s.success_message = Some(outcome.message.clone());
            s.remark = outcome.remark.clone();
        });

        self.notifier.show_success(&outcome.message);
        if let Some(remark) = &outcome.remark {
            self.notifier.show_remark(remark);
        }
    }

    /// 进入 Failed，返回原错误以便继续向上传递
    fn fail(&self, err: AppError) -> AppError {
        let message = err.user_message();
        if err.is_transport() {
            error!("❌ 操作失败: {}", err);
        } else {
            warn!("⚠️ {}", message);
        }

        self.status.send_modify(|s| {
            s.phase = WorkflowPhase::Failed;
            s.is_loading = false;
            s.success_message = None;
            s.error_message = Some(message.clone());
            s.remark = None;
        });

        self.notifier.show_error(&message);
        err
    }
}

/// 进行中的操作
///
/// 操作正常结束时状态已是 Succeeded / Failed；否则在 drop 时标记为中断
struct InFlight {
    status: Arc<watch::Sender<WorkflowStatus>>,
    notifier: Arc<dyn NotificationSurface>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let interrupted = self.status.send_if_modified(|s| {
            if !s.phase.is_in_flight() {
                return false;
            }
            warn!("⚠️ 操作在 {} 阶段被中断", s.phase);
            s.phase = WorkflowPhase::Failed;
            s.is_loading = false;
            s.success_message = None;
            s.error_message = Some(INTERRUPTED_MESSAGE.to_string());
            s.remark = None;
            true
        });

        if interrupted {
            self.notifier.show_error(INTERRUPTED_MESSAGE);
        }
    }
}

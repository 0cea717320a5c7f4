//! 任务清单执行器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责按清单依次执行文件操作。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建 HTTP 客户端和流程控制器，按需加载项目目录
//! 2. **加载清单**：读取 TOML 任务清单（`DispatchPlan`）
//! 3. **选择项目**：先解析清单中的项目，失败则不执行任何文件操作
//! 4. **顺序执行**：逐个执行文件操作，任一失败即停止（不重试）
//! 5. **全局统计**：汇总成功 / 失败 / 未执行数量

use crate::clients::{DocumentStore, DriveClient, FolderSearch, NotificationSurface, ProjectWorksClient};
use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::models::{
    load_dispatch_plan, DispatchPlan, FileSet, JobToken, OperationOutcome, PlannedOperation,
    SpreadsheetFile, UploadCategory,
};
use crate::services::LogNotifier;
use crate::utils::logging::{log_operation_start, log_plan_loaded, log_startup, print_final_stats};
use crate::workflow::WorkflowController;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// 执行统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    controller: WorkflowController,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let drive = Arc::new(DriveClient::new(&config).context("无法创建上传服务客户端")?);
        let notifier: Arc<dyn NotificationSurface> = Arc::new(LogNotifier::new());
        let mut controller = WorkflowController::new(drive.clone(), drive, notifier);

        if config.load_directory {
            load_directory(&config, &mut controller).await?;
        }

        Ok(Self { config, controller })
    }

    /// 使用自定义的协作方创建（测试或嵌入时使用）
    pub fn with_services(
        config: Config,
        search: Arc<dyn FolderSearch>,
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn NotificationSurface>,
    ) -> Self {
        Self {
            config,
            controller: WorkflowController::new(search, store, notifier),
        }
    }

    pub fn controller(&self) -> &WorkflowController {
        &self.controller
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<RunStats> {
        let plan_path = self.config.plan_file.clone();
        let plan = load_dispatch_plan(Path::new(&plan_path))
            .await
            .with_context(|| format!("无法加载任务清单: {}", plan_path))?;

        let stats = self.run_plan(&plan).await?;
        print_final_stats(stats.success, stats.failed, stats.total);
        Ok(stats)
    }

    /// 执行一份清单
    ///
    /// 项目无法解析时直接返回错误；文件操作失败只计入统计并停止后续操作
    pub async fn run_plan(&mut self, plan: &DispatchPlan) -> Result<RunStats> {
        log_plan_loaded(&plan.job, plan.operations.len());

        let token = JobToken {
            typed: plan.job.clone(),
            selection: plan.selection.clone(),
        };
        self.controller
            .select_job(&token)
            .await
            .with_context(|| format!("无法选择项目: {}", plan.job))?;

        let mut stats = RunStats {
            total: plan.operations.len(),
            ..Default::default()
        };

        for (idx, operation) in plan.operations.iter().enumerate() {
            log_operation_start(idx + 1, stats.total, &operation.describe());

            match self.execute(plan, operation).await {
                Ok(outcome) => {
                    info!("✓ 操作 {} 完成: {}", idx + 1, outcome.message);
                    stats.success += 1;
                }
                Err(e) => {
                    warn!("⚠️ 操作 {} 失败，停止执行后续操作: {}", idx + 1, e);
                    stats.failed += 1;
                    break;
                }
            }
        }

        Ok(stats)
    }

    /// 读取本地文件并交给流程控制器
    ///
    /// 读取或解析失败同样进入 Failed 并显示错误横幅
    async fn execute(
        &mut self,
        plan: &DispatchPlan,
        operation: &PlannedOperation,
    ) -> Result<OperationOutcome, AppError> {
        match operation {
            PlannedOperation::Upload { category, files } => {
                let prepared = match UploadCategory::from_label(category) {
                    Some(category) => read_files(plan, files).await.map(|files| (category, files)),
                    None => Err(AppError::Validation(format!(
                        "Unknown upload category: {}",
                        category
                    ))),
                };
                match prepared {
                    Ok((category, files)) => self.controller.upload_received(category, files).await,
                    Err(e) => Err(self.controller.reject(e)),
                }
            }
            PlannedOperation::Issue { files } => match read_files(plan, files).await {
                Ok(files) => self.controller.upload_issued(files).await,
                Err(e) => Err(self.controller.reject(e)),
            },
            PlannedOperation::Clean { spreadsheet } => {
                match SpreadsheetFile::read(&plan.resolve_path(spreadsheet)).await {
                    Ok(spreadsheet) => self.controller.clean_from_spreadsheet(spreadsheet).await,
                    Err(e) => Err(self.controller.reject(e)),
                }
            }
        }
    }
}

async fn read_files(plan: &DispatchPlan, files: &[std::path::PathBuf]) -> Result<FileSet, AppError> {
    let paths: Vec<_> = files.iter().map(|p| plan.resolve_path(p)).collect();
    FileSet::read_all(&paths).await
}

/// 加载项目目录；失败不影响后续操作
async fn load_directory(config: &Config, controller: &mut WorkflowController) -> Result<()> {
    if !config.has_directory_credentials() {
        return Err(AppError::from(ConfigError::Missing(
            "DIRECTORY_CONSUMER_KEY / DIRECTORY_CONSUMER_SECRET".to_string(),
        )))
        .context("启用了项目目录但缺少凭据");
    }

    info!("\n📁 正在加载项目目录...");
    let directory = ProjectWorksClient::new(config).context("无法创建项目目录客户端")?;
    match controller.load_directory(&directory).await {
        Ok(count) => info!("✓ 自动补全列表: {} 个项目", count),
        Err(e) => warn!("⚠️ 项目目录加载失败，继续运行: {}", e),
    }
    Ok(())
}

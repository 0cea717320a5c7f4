//! # Job Dispatch
//!
//! 将上传的文件归入项目（Job）文件夹，并按表格批量重命名
//!
//! ## 架构设计
//!
//! ### ① 外部协作方（Clients）
//! - `clients/` - 文件夹搜索、上传、项目目录、界面通知的接口与 HTTP 实现
//!
//! ### ② 业务能力层（Services）
//! - `JobResolver` - 输入 → 项目文件夹，持有当前项目
//! - `UploadGate` - 没有当前项目时禁止文件操作
//! - `UploadDispatcher` - 分类上传 / 签发
//! - `SpreadsheetReader` + `BatchRenamePipeline` - 表格 → 文件名 → 清理上传
//!
//! ### ③ 流程层（Workflow）
//! - `WorkflowController` - 单次操作的状态机，持有加载中 / 横幅 / 备注
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/plan_runner` - 按任务清单依次执行操作

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{FileSet, JobToken, ResolvedJob, UploadCategory, WorkflowStatus};
pub use orchestrator::{App, RunStats};
pub use workflow::WorkflowController;

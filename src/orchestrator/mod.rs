//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责读取任务清单并调度流程层，是整个系统的入口。
//!
//! ## 层次关系
//!
//! ```text
//! plan_runner (处理 DispatchPlan)
//!     ↓
//! workflow::WorkflowController (处理单个操作)
//!     ↓
//! services (能力层：resolve / gate / upload / rename)
//!     ↓
//! clients (外部协作方：文件夹搜索 / 上传 / 项目目录)
//! ```

pub mod plan_runner;

// 重新导出主要类型
pub use plan_runner::{App, RunStats};

use crate::models::Remark;
use std::fmt::{self, Display};

/// 单次操作所处的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPhase {
    #[default]
    Idle,
    Validating,
    Resolving,
    Dispatching,
    Succeeded,
    Failed,
}

impl WorkflowPhase {
    /// 是否有操作正在进行
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            WorkflowPhase::Validating | WorkflowPhase::Resolving | WorkflowPhase::Dispatching
        )
    }
}

impl Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowPhase::Idle => "idle",
            WorkflowPhase::Validating => "validating",
            WorkflowPhase::Resolving => "resolving",
            WorkflowPhase::Dispatching => "dispatching",
            WorkflowPhase::Succeeded => "succeeded",
            WorkflowPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// 界面状态：加载中 / 成功横幅 / 错误横幅 / 备注
///
/// 成功与错误横幅互斥
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowStatus {
    pub phase: WorkflowPhase,
    pub is_loading: bool,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    pub remark: Option<Remark>,
}

impl WorkflowStatus {
    /// 关闭成功横幅
    pub fn dismiss_success(&mut self) {
        self.success_message = None;
    }

    /// 关闭错误横幅
    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    /// 关闭备注
    pub fn dismiss_remark(&mut self) {
        self.remark = None;
    }
}

/// 一次成功操作的结果：成功提示 + 可选的备注
#[derive(Debug, Clone, PartialEq)]
pub struct OperationOutcome {
    pub message: String,
    pub remark: Option<Remark>,
}

impl OperationOutcome {
    /// 空备注不展示
    pub fn new(message: impl Into<String>, remark: Option<Remark>) -> Self {
        Self {
            message: message.into(),
            remark: remark.filter(|r| !r.is_empty()),
        }
    }
}

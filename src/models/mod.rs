pub mod category;
pub mod files;
pub mod job;
pub mod loaders;
pub mod plan;
pub mod remark;
pub mod spreadsheet;
pub mod status;

pub use category::{UploadCategory, UploadTarget};
pub use files::{FileHandle, FileSet, SpreadsheetFile};
pub use job::{directory_label, JobIdentifier, JobToken, OfficeCode, ResolvedJob};
pub use loaders::load_dispatch_plan;
pub use plan::{DispatchPlan, PlannedOperation};
pub use remark::Remark;
pub use spreadsheet::{CellValue, SpreadsheetRow};
pub use status::{OperationOutcome, WorkflowPhase, WorkflowStatus};

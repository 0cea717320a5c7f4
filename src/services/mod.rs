pub mod batch_rename;
pub mod job_resolver;
pub mod log_notifier;
pub mod spreadsheet_reader;
pub mod upload_dispatcher;
pub mod upload_gate;

pub use batch_rename::BatchRenamePipeline;
pub use job_resolver::JobResolver;
pub use log_notifier::LogNotifier;
pub use spreadsheet_reader::SpreadsheetReader;
pub use upload_dispatcher::UploadDispatcher;
pub use upload_gate::UploadGate;

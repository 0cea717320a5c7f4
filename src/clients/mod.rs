pub mod drive_client;
pub mod interfaces;
pub mod projectworks_client;

pub use drive_client::DriveClient;
pub use interfaces::{DocumentStore, FolderSearch, JobDirectory, NotificationSurface};
pub use projectworks_client::{ProjectRecord, ProjectWorksClient};

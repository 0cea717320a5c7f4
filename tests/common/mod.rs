//! 集成测试用的内存协作方
#![allow(dead_code)]

use async_trait::async_trait;
use job_dispatch::clients::{DocumentStore, FolderSearch, NotificationSurface};
use job_dispatch::models::{FileHandle, FileSet, Remark, ResolvedJob, WorkflowStatus};
use job_dispatch::AppError;
use job_dispatch::AppResult;
use serde_json::{json, Value};
use std::sync::Mutex;
use tokio::sync::watch;

/// 记录所有调用的上传服务
#[derive(Default)]
pub struct FakeBackend {
    pub folders: Mutex<Vec<ResolvedJob>>,
    pub queries: Mutex<Vec<String>>,
    pub calls: Mutex<Vec<String>>,
    pub cleaned_names: Mutex<Vec<Vec<String>>>,
    pub fail_on: Mutex<Option<&'static str>>,
    pub hang_on: Mutex<Option<&'static str>>,
    pub probe: Mutex<Option<watch::Receiver<WorkflowStatus>>>,
    pub loading_seen: Mutex<Vec<bool>>,
}

impl FakeBackend {
    pub fn with_folders(folders: Vec<ResolvedJob>) -> Self {
        let backend = Self::default();
        *backend.folders.lock().unwrap() = folders;
        backend
    }

    pub fn fail_on(&self, call: &'static str) {
        *self.fail_on.lock().unwrap() = Some(call);
    }

    pub fn hang_on(&self, call: &'static str) {
        *self.hang_on.lock().unwrap() = Some(call);
    }

    pub fn watch(&self, receiver: watch::Receiver<WorkflowStatus>) {
        *self.probe.lock().unwrap() = Some(receiver);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// 记录调用，并按设置模拟失败或挂起
    async fn enter(&self, name: &'static str, detail: String) -> AppResult<()> {
        self.calls.lock().unwrap().push(format!("{}:{}", name, detail));

        let loading = self
            .probe
            .lock()
            .unwrap()
            .as_ref()
            .map(|probe| probe.borrow().is_loading);
        if let Some(loading) = loading {
            self.loading_seen.lock().unwrap().push(loading);
        }

        let hang = *self.hang_on.lock().unwrap() == Some(name);
        if hang {
            std::future::pending::<()>().await;
        }
        let fail = *self.fail_on.lock().unwrap() == Some(name);
        if fail {
            return Err(AppError::bad_response(name, 502, Some("gateway".to_string())));
        }
        Ok(())
    }
}

#[async_trait]
impl FolderSearch for FakeBackend {
    async fn search_folders(&self, query: &str, fields: &str) -> AppResult<Vec<ResolvedJob>> {
        assert_eq!(fields, "files(name,id)");
        self.queries.lock().unwrap().push(query.to_string());
        self.enter("search", query.to_string()).await?;
        Ok(self.folders.lock().unwrap().clone())
    }
}

#[async_trait]
impl DocumentStore for FakeBackend {
    async fn upload_to_subfolder(
        &self,
        job: &ResolvedJob,
        subfolder: &str,
        files: &FileSet,
    ) -> AppResult<Remark> {
        self.enter("upload", format!("{}:{}:{}", job.name, subfolder, files.len()))
            .await?;
        Ok(Remark::text(format!("saved {} files to {}", files.len(), subfolder)))
    }

    async fn record_issued(&self, job: &ResolvedJob, files: &FileSet) -> AppResult<Remark> {
        self.enter("issued", format!("{}:{}", job.name, files.len())).await?;
        Ok(Remark(json!({ "issued": files.names() })))
    }

    async fn update_current(&self, job: &ResolvedJob, files: &FileSet) -> AppResult<Value> {
        self.enter("current", format!("{}:{}", job.name, files.len())).await?;
        Ok(json!({ "current": "something else entirely" }))
    }

    async fn clean_upload(&self, job: &ResolvedJob, file_names: &[String]) -> AppResult<Remark> {
        self.enter("clean", format!("{}:{}", job.name, file_names.len()))
            .await?;
        self.cleaned_names.lock().unwrap().push(file_names.to_vec());
        Ok(Remark::text(format!("cleaned {}", file_names.len())))
    }
}

/// 记录所有通知
#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl NotificationSurface for RecordingNotifier {
    fn show_success(&self, message: &str) {
        self.events.lock().unwrap().push(format!("success:{}", message));
    }

    fn show_error(&self, message: &str) {
        self.events.lock().unwrap().push(format!("error:{}", message));
    }

    fn show_remark(&self, remark: &Remark) {
        self.events.lock().unwrap().push(format!("remark:{}", remark));
    }
}

pub fn files(names: &[&str]) -> FileSet {
    FileSet::new(
        names
            .iter()
            .map(|n| FileHandle::new(*n, n.as_bytes().to_vec()))
            .collect(),
    )
}

/// 文件夹搜索 / 上传 API 客户端
///
/// 封装所有与上传服务相关的 HTTP 调用
use crate::clients::interfaces::{DocumentStore, FolderSearch};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{FileSet, Remark, ResolvedJob};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

const GET_FOLDER: &str = "getFolder";
const SAVE_RECEIVED: &str = "savedReceivedDoc";
const SAVE_ISSUED: &str = "savedIssuedDocIssued";
const SAVE_CURRENT: &str = "savedIssuedDocCurrent";
const CLEAN_XLSX: &str = "cleanXlsx";

/// 上传服务客户端
pub struct DriveClient {
    http: Client,
    base_url: String,
}

impl DriveClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// 以 multipart 表单上传文件
    ///
    /// # 参数
    /// - `endpoint`: 接口名
    /// - `job`: 项目文件夹
    /// - `subfolder`: 子文件夹（签发文件没有）
    /// - `files`: 文件集合
    async fn post_files(
        &self,
        endpoint: &str,
        job: &ResolvedJob,
        subfolder: Option<&str>,
        files: &FileSet,
    ) -> AppResult<Value> {
        let mut form = Form::new().text("job", serde_json::to_string(&[job])?);
        if let Some(subfolder) = subfolder {
            form = form.text("subFolder", subfolder.to_string());
        }
        for file in files.iter() {
            form = form.part(
                "files",
                Part::bytes(file.bytes.clone()).file_name(file.name.clone()),
            );
        }

        debug!("POST {} ({} 个文件)", endpoint, files.len());

        let response = self
            .http
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        read_json(endpoint, response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, endpoint: &str, body: &Value) -> AppResult<T> {
        debug!("POST {} Payload: {}", endpoint, body);

        let response = self
            .http
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        read_json(endpoint, response).await
    }
}

/// 检查状态码并解析响应体
async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.ok().filter(|t| !t.is_empty());
        return Err(AppError::bad_response(endpoint, status.as_u16(), message));
    }

    let text = response
        .text()
        .await
        .map_err(|e| AppError::api_request_failed(endpoint, e))?;
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    Ok(serde_json::from_str(text)?)
}

#[async_trait]
impl FolderSearch for DriveClient {
    async fn search_folders(&self, query: &str, fields: &str) -> AppResult<Vec<ResolvedJob>> {
        let body = json!({ "q": query, "fields": fields });
        let folders: Option<Vec<ResolvedJob>> = self.post_json(GET_FOLDER, &body).await?;
        Ok(folders.unwrap_or_default())
    }
}

#[async_trait]
impl DocumentStore for DriveClient {
    async fn upload_to_subfolder(
        &self,
        job: &ResolvedJob,
        subfolder: &str,
        files: &FileSet,
    ) -> AppResult<Remark> {
        let value = self
            .post_files(SAVE_RECEIVED, job, Some(subfolder), files)
            .await?;
        Ok(Remark(value))
    }

    async fn record_issued(&self, job: &ResolvedJob, files: &FileSet) -> AppResult<Remark> {
        let value = self.post_files(SAVE_ISSUED, job, None, files).await?;
        Ok(Remark(value))
    }

    async fn update_current(&self, job: &ResolvedJob, files: &FileSet) -> AppResult<Value> {
        self.post_files(SAVE_CURRENT, job, None, files).await
    }

    async fn clean_upload(&self, job: &ResolvedJob, file_names: &[String]) -> AppResult<Remark> {
        let body = json!({ "job": [job], "fileList": file_names });
        let value: Value = self.post_json(CLEAN_XLSX, &body).await?;
        Ok(Remark(value))
    }
}

/// 项目目录 API 客户端
///
/// 启动时拉取全部项目，生成自动补全列表
use crate::clients::interfaces::JobDirectory;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{directory_label, JobIdentifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

const PROJECTS_ENDPOINT: &str = "Projects?page=1&pageSize=20000&includeCustomFields=true";

/// 项目目录中的一条记录
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "ProjectNumber")]
    pub project_number: String,
    #[serde(rename = "ProjectName")]
    pub project_name: String,
    #[serde(rename = "CustomFields", default)]
    pub custom_fields: Vec<CustomField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomField {
    #[serde(rename = "Value", default)]
    pub value: Value,
}

impl ProjectRecord {
    /// 第一个自定义字段为办公室代码
    pub fn office(&self) -> Option<String> {
        match self.custom_fields.first().map(|f| &f.value) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    /// 自动补全条目
    pub fn label(&self) -> String {
        let office = self.office();
        let identifier = JobIdentifier::from_project(&self.project_number, office.as_deref());
        directory_label(&identifier, &self.project_name)
    }
}

/// 项目目录客户端
pub struct ProjectWorksClient {
    http: Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
}

impl ProjectWorksClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            base_url: config.directory_base_url.trim_end_matches('/').to_string(),
            consumer_key: config.directory_consumer_key.clone(),
            consumer_secret: config.directory_consumer_secret.clone(),
        })
    }

    /// 拉取全部项目记录
    pub async fn fetch_projects(&self) -> AppResult<Vec<ProjectRecord>> {
        let url = format!("{}/{}", self.base_url, PROJECTS_ENDPOINT);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .send()
            .await
            .map_err(|e| AppError::api_request_failed("Projects", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::bad_response("Projects", status.as_u16(), None));
        }

        let projects: Vec<ProjectRecord> = response
            .json()
            .await
            .map_err(|e| AppError::api_request_failed("Projects", e))?;
        Ok(projects)
    }
}

#[async_trait]
impl JobDirectory for ProjectWorksClient {
    async fn list_jobs(&self) -> AppResult<Vec<String>> {
        let projects = self.fetch_projects().await?;
        let labels: Vec<String> = projects.iter().map(ProjectRecord::label).collect();
        info!("✓ 项目目录加载完成，共 {} 个项目", labels.len());
        Ok(labels)
    }
}

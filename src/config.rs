use crate::error::{AppResult, FileError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 文件夹搜索 / 上传服务地址
    pub api_base_url: String,
    /// 项目目录服务地址（仅用于自动补全）
    pub directory_base_url: String,
    pub directory_consumer_key: String,
    pub directory_consumer_secret: String,
    /// 单次 HTTP 请求超时（秒）；默认不设超时，请求一直等到完成或失败
    pub request_timeout_secs: Option<u64>,
    /// 待执行的任务清单（TOML）
    pub plan_file: String,
    /// 启动时是否加载项目目录
    pub load_directory: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://sy-custom-api-web-app.ts.r.appspot.com".to_string(),
            directory_base_url: "https://api.projectworksapp.com/api/v1.0".to_string(),
            directory_consumer_key: String::new(),
            directory_consumer_secret: String::new(),
            request_timeout_secs: None,
            plan_file: "dispatch_plan.toml".to_string(),
            load_directory: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            directory_base_url: std::env::var("DIRECTORY_BASE_URL").unwrap_or(default.directory_base_url),
            directory_consumer_key: std::env::var("DIRECTORY_CONSUMER_KEY").unwrap_or(default.directory_consumer_key),
            directory_consumer_secret: std::env::var("DIRECTORY_CONSUMER_SECRET").unwrap_or(default.directory_consumer_secret),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).or(default.request_timeout_secs),
            plan_file: std::env::var("PLAN_FILE").unwrap_or(default.plan_file),
            load_directory: std::env::var("LOAD_DIRECTORY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.load_directory),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::AppError::file_read_failed(path.display().to_string(), e))?;
        let config = toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    /// HTTP 请求超时，未配置时为 None
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// 是否配置了项目目录的凭据
    pub fn has_directory_credentials(&self) -> bool {
        !self.directory_consumer_key.is_empty() && !self.directory_consumer_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_toml_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"http://localhost:8080\"").unwrap();
        writeln!(file, "verbose_logging = true").unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert!(config.verbose_logging);
        assert_eq!(config.request_timeout(), None);
        assert!(!config.has_directory_credentials());
    }

    #[test]
    fn test_request_timeout_is_opt_in() {
        assert_eq!(Config::default().request_timeout_secs, None);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_secs = 600").unwrap();
        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_from_toml_file_reports_path_on_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = ").unwrap();

        let err = Config::from_toml_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("TOML解析失败"));
    }
}

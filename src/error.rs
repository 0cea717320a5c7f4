use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 本地校验失败（不会发起任何网络请求）
    #[error("{0}")]
    Validation(String),
    /// 文件夹搜索没有匹配结果
    #[error("{0}")]
    NotFound(String),
    /// 未选择项目时尝试上传
    #[error("{0}")]
    Blocked(String),
    /// 已有操作正在进行
    #[error("另一个操作正在进行中")]
    Busy,
    /// 远程调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 表格解析错误
    #[error("表格错误: {0}")]
    Spreadsheet(#[from] SpreadsheetError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 远程调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务端返回错误状态
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 表格解析错误
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// 不支持的文件格式
    #[error("不支持的表格格式: {name}")]
    UnsupportedFormat { name: String },
    /// 工作簿中没有工作表
    #[error("工作簿中没有工作表: {name}")]
    NoSheets { name: String },
    /// 工作簿读取失败
    #[error("无法读取工作簿: {0}")]
    Workbook(#[from] calamine::Error),
    /// CSV 读取失败
    #[error("无法读取CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少必需配置项
    #[error("缺少配置项: {0}")]
    Missing(String),
}

// ========== 从常见错误类型转换 ==========

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_default();
        AppError::Api(ApiError::RequestFailed {
            endpoint,
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<calamine::Error> for AppError {
    fn from(err: calamine::Error) -> Self {
        AppError::Spreadsheet(SpreadsheetError::Workbook(err))
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Spreadsheet(SpreadsheetError::Csv(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: err,
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: err,
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建服务端错误响应
    pub fn bad_response(endpoint: impl Into<String>, status: u16, message: Option<String>) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
            message,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为传输层失败
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Api(_))
    }

    /// 显示在错误横幅上的文字
    ///
    /// 校验、未找到、未选择项目三类错误直接显示原文，其余统一显示为上传失败
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Blocked(msg) => {
                msg.clone()
            }
            AppError::Busy => "Another operation is still in progress".to_string(),
            other => format!("Upload failed: {}", other),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_passes_local_errors_through() {
        let err = AppError::Validation("Job field cannot be empty".to_string());
        assert_eq!(err.user_message(), "Job field cannot be empty");

        let err = AppError::NotFound("No job was found with that number".to_string());
        assert_eq!(err.user_message(), "No job was found with that number");
    }

    #[test]
    fn test_user_message_wraps_transport_errors() {
        let err = AppError::bad_response("/getFolder", 500, Some("boom".to_string()));
        assert!(err.is_transport());
        assert!(err.user_message().starts_with("Upload failed: "));
    }
}

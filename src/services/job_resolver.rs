//! 项目解析服务 - 业务能力层
//!
//! 把用户输入的项目编号解析为唯一的项目文件夹，并持有“当前项目”

use crate::clients::{FolderSearch, JobDirectory};
use crate::error::{AppError, AppResult};
use crate::models::{JobIdentifier, JobToken, ResolvedJob};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 文件夹搜索返回的字段
pub const FOLDER_FIELDS: &str = "files(name,id)";

const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// 构建按名称精确匹配文件夹的查询语句
pub fn folder_query(identifier: &JobIdentifier) -> String {
    let escaped = identifier.as_str().replace('\\', "\\\\").replace('\'', "\\'");
    format!("mimeType='{}' and name='{}'", FOLDER_MIME_TYPE, escaped)
}

/// 项目解析服务
///
/// 同一时间只有一个当前项目，新的解析结果整体替换旧的
pub struct JobResolver {
    search: Arc<dyn FolderSearch>,
    current: Option<ResolvedJob>,
    suggestions: Vec<String>,
}

impl JobResolver {
    pub fn new(search: Arc<dyn FolderSearch>) -> Self {
        Self {
            search,
            current: None,
            suggestions: Vec::new(),
        }
    }

    /// 当前项目
    pub fn current(&self) -> Option<&ResolvedJob> {
        self.current.as_ref()
    }

    /// 解析用户输入
    ///
    /// 输入为空时直接返回校验错误，不发起搜索
    pub async fn resolve(&mut self, token: &JobToken) -> AppResult<&ResolvedJob> {
        let identifier = token.identifier()?;
        self.resolve_identifier(&identifier).await
    }

    /// 按项目编号搜索文件夹
    ///
    /// 搜索开始前清除当前项目；没有结果时返回 NotFound，多个结果时取第一个
    pub async fn resolve_identifier(&mut self, identifier: &JobIdentifier) -> AppResult<&ResolvedJob> {
        self.current = None;

        info!("🔍 正在搜索项目文件夹: {}", identifier);
        let folders = self
            .search
            .search_folders(&folder_query(identifier), FOLDER_FIELDS)
            .await?;

        if folders.len() > 1 {
            debug!("项目 {} 匹配到 {} 个文件夹，使用第一个", identifier, folders.len());
        }

        match folders.into_iter().next() {
            Some(job) => {
                info!("✓ 已选择项目 {}", job);
                Ok(self.current.insert(job))
            }
            None => {
                warn!("⚠️ 未找到项目: {}", identifier);
                Err(AppError::NotFound(
                    "No job was found with that number".to_string(),
                ))
            }
        }
    }

    /// 加载自动补全列表（只在启动时调用，结果可能过期）
    pub async fn load_directory(&mut self, directory: &dyn JobDirectory) -> AppResult<usize> {
        self.suggestions = directory.list_jobs().await?;
        Ok(self.suggestions.len())
    }

    /// 自动补全候选项（忽略大小写的包含匹配）
    pub fn suggest(&self, input: &str, limit: usize) -> Vec<&str> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.suggestions
            .iter()
            .filter(|label| label.to_lowercase().contains(&needle))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubSearch {
        results: Vec<ResolvedJob>,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FolderSearch for StubSearch {
        async fn search_folders(&self, query: &str, _fields: &str) -> AppResult<Vec<ResolvedJob>> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self.results.clone())
        }
    }

    struct StubDirectory;

    #[async_trait]
    impl JobDirectory for StubDirectory {
        async fn list_jobs(&self) -> AppResult<Vec<String>> {
            Ok(vec![
                "1234M | North Tower".to_string(),
                "2200A | Depot".to_string(),
                "1299M | North Car Park".to_string(),
            ])
        }
    }

    fn resolver(results: Vec<ResolvedJob>) -> (JobResolver, Arc<StubSearch>) {
        let search = Arc::new(StubSearch {
            results,
            queries: Mutex::new(Vec::new()),
        });
        (JobResolver::new(search.clone()), search)
    }

    #[test]
    fn test_folder_query_escapes_quotes() {
        assert_eq!(
            folder_query(&JobIdentifier::new("1234M")),
            "mimeType='application/vnd.google-apps.folder' and name='1234M'"
        );
        assert!(folder_query(&JobIdentifier::new("O'Neil")).ends_with("name='O\\'Neil'"));
    }

    #[tokio::test]
    async fn test_resolve_first_match_wins() {
        let (mut resolver, search) = resolver(vec![
            ResolvedJob::new("x", "1234M"),
            ResolvedJob::new("y", "1234M"),
        ]);

        let job = resolver.resolve(&JobToken::typed("1234M | North Tower")).await.unwrap();
        assert_eq!(job, &ResolvedJob::new("x", "1234M"));
        assert!(search.queries.lock().unwrap()[0].contains("name='1234M'"));
    }

    #[tokio::test]
    async fn test_not_found_clears_previous_job() {
        let (mut resolver, _) = resolver(Vec::new());
        resolver.current = Some(ResolvedJob::new("old", "1111M"));

        let err = resolver.resolve(&JobToken::typed("9999M")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(resolver.current().is_none());
    }

    #[tokio::test]
    async fn test_empty_token_skips_search_and_keeps_job() {
        let (mut resolver, search) = resolver(vec![ResolvedJob::new("x", "1234M")]);
        resolver.current = Some(ResolvedJob::new("old", "1111M"));

        let err = resolver.resolve(&JobToken::typed("")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(search.queries.lock().unwrap().is_empty());
        assert_eq!(resolver.current().map(|j| j.id.as_str()), Some("old"));
    }

    #[tokio::test]
    async fn test_suggest_filters_directory() {
        let (mut resolver, _) = resolver(Vec::new());
        assert_eq!(resolver.load_directory(&StubDirectory).await.unwrap(), 3);

        assert_eq!(
            resolver.suggest("north", 10),
            vec!["1234M | North Tower", "1299M | North Car Park"]
        );
        assert_eq!(resolver.suggest("north", 1).len(), 1);
        assert!(resolver.suggest("  ", 10).is_empty());
    }
}

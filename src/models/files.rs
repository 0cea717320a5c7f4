//! 用户一次交互中提交的文件

use crate::error::{AppError, AppResult};
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

/// 单个文件（名称 + 内容）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// 从磁盘读取文件
    pub async fn read(path: &Path) -> AppResult<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// 一次操作的文件集合
///
/// 创建后不可修改，克隆只增加引用计数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet(Arc<[FileHandle]>);

impl FileSet {
    pub fn new(files: Vec<FileHandle>) -> Self {
        Self(files.into())
    }

    /// 按顺序从磁盘读取一组文件
    pub async fn read_all(paths: &[impl AsRef<Path>]) -> AppResult<Self> {
        let files =
            futures::future::try_join_all(paths.iter().map(|p| FileHandle::read(p.as_ref())))
                .await?;
        Ok(Self::new(files))
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|f| f.name.as_str()).collect()
    }
}

impl Deref for FileSet {
    type Target = [FileHandle];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<FileHandle>> for FileSet {
    fn from(files: Vec<FileHandle>) -> Self {
        Self::new(files)
    }
}

/// 待解析的表格文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SpreadsheetFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn read(path: &Path) -> AppResult<Self> {
        let FileHandle { name, bytes } = FileHandle::read(path).await?;
        Ok(Self { name, bytes })
    }

    /// 小写扩展名
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }
}

//! 项目（Job）相关的数据模型
//!
//! 用户输入 → `JobToken` → `JobIdentifier` → 文件夹搜索 → `ResolvedJob`

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// 自动补全条目中编号与名称之间的分隔符
pub const LABEL_SEPARATOR: &str = " | ";

/// 手动输入长度不超过该值时，以自动补全的选择为准
const SHORT_TYPED_LEN: usize = 5;

/// 用户提交的项目输入
///
/// `typed` 为输入框中的原始文字，`selection` 为自动补全列表中选中的条目
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobToken {
    pub typed: String,
    pub selection: Option<String>,
}

impl JobToken {
    /// 仅有手动输入
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            typed: text.into(),
            selection: None,
        }
    }

    /// 手动输入 + 自动补全选择
    pub fn with_selection(typed: impl Into<String>, selection: impl Into<String>) -> Self {
        Self {
            typed: typed.into(),
            selection: Some(selection.into()),
        }
    }

    /// 计算用于服务端搜索的项目编号
    ///
    /// 1. 输入较短（≤5 个字符）且存在选择时，取选择中 `" | "` 之前的部分
    /// 2. 输入本身包含 `" | "` 时，取其之前的部分
    /// 3. 否则原样使用输入
    ///
    /// 输入为空且没有选择时返回校验错误
    pub fn identifier(&self) -> AppResult<JobIdentifier> {
        let selection = self.selection.as_deref().filter(|s| !s.is_empty());

        if self.typed.is_empty() && selection.is_none() {
            return Err(AppError::Validation("Job field cannot be empty".to_string()));
        }

        if let Some(selected) = selection {
            if self.typed.chars().count() <= SHORT_TYPED_LEN {
                return Ok(JobIdentifier(label_prefix(selected).to_string()));
            }
        }

        Ok(JobIdentifier(label_prefix(&self.typed).to_string()))
    }
}

/// 取第一个 `" | "` 之前的部分；没有分隔符时返回原文
fn label_prefix(label: &str) -> &str {
    match label.find(LABEL_SEPARATOR) {
        Some(idx) => &label[..idx],
        None => label,
    }
}

/// 规范化后的项目编号
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobIdentifier(String);

impl JobIdentifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 由项目目录中的项目号和办公室字段生成编号
    ///
    /// 项目号中 `.` 之后的部分被截掉，再追加办公室代码
    pub fn from_project(project_number: &str, office: Option<&str>) -> Self {
        let base = match project_number.find('.') {
            Some(idx) => &project_number[..idx],
            None => project_number,
        };
        Self(format!("{}{}", base, OfficeCode::from_raw(office)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for JobIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 办公室代码
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficeCode {
    /// 空值或 "1"
    Main,
    /// "2"
    Alternate,
    /// 其他取值原样保留
    Other(String),
}

impl OfficeCode {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None | Some("1") => OfficeCode::Main,
            Some("2") => OfficeCode::Alternate,
            Some(other) => OfficeCode::Other(other.to_string()),
        }
    }

    pub fn suffix(&self) -> &str {
        match self {
            OfficeCode::Main => "M",
            OfficeCode::Alternate => "A",
            OfficeCode::Other(raw) => raw,
        }
    }
}

impl Display for OfficeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// 生成自动补全条目 `"<编号> | <名称>"`
pub fn directory_label(identifier: &JobIdentifier, name: &str) -> String {
    format!("{}{}{}", identifier, LABEL_SEPARATOR, name)
}

/// 文件夹搜索返回的项目文件夹
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedJob {
    pub id: String,
    pub name: String,
}

impl ResolvedJob {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Display for ResolvedJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[项目 {} #{}]", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_takes_prefix_before_separator() {
        let token = JobToken::typed("1234M | North Tower");
        assert_eq!(token.identifier().unwrap().as_str(), "1234M");

        let token = JobToken::typed("1234M | North Tower | Stage 2");
        assert_eq!(token.identifier().unwrap().as_str(), "1234M");
    }

    #[test]
    fn test_identifier_passes_plain_text_through() {
        let token = JobToken::typed("5678A");
        assert_eq!(token.identifier().unwrap().as_str(), "5678A");

        let token = JobToken::typed("  spaced ");
        assert_eq!(token.identifier().unwrap().as_str(), "  spaced ");
    }

    #[test]
    fn test_short_typed_text_uses_selection() {
        let token = JobToken::with_selection("123", "1234M | North Tower");
        assert_eq!(token.identifier().unwrap().as_str(), "1234M");

        let token = JobToken::with_selection("", "9000A | Depot");
        assert_eq!(token.identifier().unwrap().as_str(), "9000A");
    }

    #[test]
    fn test_long_typed_text_ignores_selection() {
        let token = JobToken::with_selection("777777", "1234M | North Tower");
        assert_eq!(token.identifier().unwrap().as_str(), "777777");
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let err = JobToken::typed("").identifier().unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Job field cannot be empty"));

        let err = JobToken::with_selection("", "").identifier().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_office_code_mapping() {
        assert_eq!(OfficeCode::from_raw(None).suffix(), "M");
        assert_eq!(OfficeCode::from_raw(Some("1")).suffix(), "M");
        assert_eq!(OfficeCode::from_raw(Some("2")).suffix(), "A");
        assert_eq!(OfficeCode::from_raw(Some("Q")).suffix(), "Q");
    }

    #[test]
    fn test_from_project_truncates_and_appends_office() {
        assert_eq!(JobIdentifier::from_project("1234.5", Some("1")).as_str(), "1234M");
        assert_eq!(JobIdentifier::from_project("1234.5.6", None).as_str(), "1234M");
        assert_eq!(JobIdentifier::from_project("88", Some("2")).as_str(), "88A");
    }

    #[test]
    fn test_directory_label() {
        let id = JobIdentifier::from_project("1234.5", Some("1"));
        assert_eq!(directory_label(&id, "North Tower"), "1234M | North Tower");
    }
}

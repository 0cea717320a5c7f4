use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display};

/// 上传接口返回的备注内容，原样展示给用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Remark(pub Value);

impl Remark {
    pub fn text(text: impl Into<String>) -> Self {
        Self(Value::String(text.into()))
    }

    /// 空字符串、null、空数组/对象视为没有备注
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            _ => false,
        }
    }
}

impl Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<Value> for Remark {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_is_verbatim() {
        assert_eq!(Remark::text("2 files saved").to_string(), "2 files saved");
        assert_eq!(
            Remark(json!({"saved": ["a.pdf"]})).to_string(),
            r#"{"saved":["a.pdf"]}"#
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(Remark(Value::Null).is_empty());
        assert!(Remark::text("").is_empty());
        assert!(!Remark(json!(0)).is_empty());
    }
}

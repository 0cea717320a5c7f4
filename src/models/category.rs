use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// 收到文件的分类（决定上传到哪个子文件夹）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UploadCategory {
    Cad,
    Photos,
    ShopDrawings,
    Geotechnical,
}

impl UploadCategory {
    /// 全部分类，按界面上的顺序
    pub const ALL: [UploadCategory; 4] = [
        UploadCategory::Cad,
        UploadCategory::Photos,
        UploadCategory::ShopDrawings,
        UploadCategory::Geotechnical,
    ];

    /// 子文件夹名称
    pub fn subfolder(self) -> &'static str {
        match self {
            UploadCategory::Cad => "CAD",
            UploadCategory::Photos => "Photos",
            UploadCategory::ShopDrawings => "Shop Drawings",
            UploadCategory::Geotechnical => "Geotechnical",
        }
    }

    /// 从子文件夹名称解析（忽略大小写）
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.subfolder().eq_ignore_ascii_case(label))
    }
}

impl Display for UploadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subfolder())
    }
}

/// 上传目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    /// 收到的文件，按分类放入子文件夹
    Subfolder(UploadCategory),
    /// 本公司签发的文件（无子文件夹参数）
    Issued,
}

impl Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadTarget::Subfolder(category) => write!(f, "{}", category),
            UploadTarget::Issued => f.write_str("Issued"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(UploadCategory::from_label("CAD"), Some(UploadCategory::Cad));
        assert_eq!(
            UploadCategory::from_label("shop drawings"),
            Some(UploadCategory::ShopDrawings)
        );
        assert_eq!(UploadCategory::from_label("Admin"), None);
    }

    #[test]
    fn test_labels_round_trip() {
        for category in UploadCategory::ALL {
            assert_eq!(UploadCategory::from_label(category.subfolder()), Some(category));
        }
    }
}

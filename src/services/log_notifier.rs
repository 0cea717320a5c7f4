//! 日志通知 - 把横幅和备注写入日志

use crate::clients::NotificationSurface;
use crate::models::Remark;
use crate::utils::logging::truncate_text;
use tracing::{error, info};

/// 备注在日志中的最大长度
const MAX_REMARK_LEN: usize = 2000;

/// 将通知输出到日志的 `NotificationSurface`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSurface for LogNotifier {
    fn show_success(&self, message: &str) {
        info!("✅ {}", message);
    }

    fn show_error(&self, message: &str) {
        error!("❌ {}", message);
    }

    fn show_remark(&self, remark: &Remark) {
        info!("📝 备注: {}", truncate_text(&remark.to_string(), MAX_REMARK_LEN));
    }
}

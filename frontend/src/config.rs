//! 应用配置
//!
//! 构建时可通过环境变量覆盖：
//! - `BHARATAGRI_API_BASE`: 后端地址，默认使用页面的 origin
//! - `BHARATAGRI_LOG_LEVEL`: 日志级别，默认 `info`

use std::time::Duration;

use log::LevelFilter;

use crate::web::dom;

/// 页面渲染后到初始化函数运行之间的延迟
pub const INIT_DELAY: Duration = Duration::from_millis(50);
/// 提示条显示时长
pub const TOAST_DURATION: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub log_level: LevelFilter,
    pub init_delay: Duration,
    pub toast_duration: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_base: api_base(option_env!("BHARATAGRI_API_BASE"), dom::origin),
            log_level: log_level(option_env!("BHARATAGRI_LOG_LEVEL")),
            init_delay: INIT_DELAY,
            toast_duration: TOAST_DURATION,
        }
    }
}

fn api_base(configured: Option<&str>, origin: impl FnOnce() -> Option<String>) -> String {
    configured
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .or_else(origin)
        .unwrap_or_default()
}

fn log_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

//! 时间工具模块
//!
//! 后端以 ISO 8601 字符串返回 `created_at`，可能带时区也可能不带
//! (`2024-03-01T10:15:30.123456`)。这里统一解析并格式化为界面显示用的文本。

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 显示日期的格式 (日/月/年)
const DATE_FORMAT: &str = "%d/%m/%Y";
/// 显示日期时间的格式
const DATETIME_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// 解析后的服务端时间
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServerTime(NaiveDateTime);

impl ServerTime {
    /// 从 ISO 8601 / RFC 3339 字符串解析
    ///
    /// 返回 None 如果解析失败
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.naive_utc()));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self(dt));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Self)
    }

    pub fn date_label(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }

    pub fn datetime_label(&self) -> String {
        self.0.format(DATETIME_FORMAT).to_string()
    }
}

/// 格式化为日期；缺失或无法解析时显示 `-`
pub fn date_label(raw: Option<&str>) -> String {
    raw.and_then(ServerTime::parse)
        .map(|t| t.date_label())
        .unwrap_or_else(|| "-".to_string())
}

/// 格式化为日期时间；缺失或无法解析时显示 `-`
pub fn datetime_label(raw: Option<&str>) -> String {
    raw.and_then(ServerTime::parse)
        .map(|t| t.datetime_label())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naive_iso_with_fraction() {
        let t = ServerTime::parse("2024-03-01T10:15:30.123456").unwrap();
        assert_eq!(t.date_label(), "01/03/2024");
        assert_eq!(t.datetime_label(), "01/03/2024, 10:15:30");
    }

    #[test]
    fn parses_rfc3339_as_utc() {
        let t = ServerTime::parse("2024-03-01T10:15:30+05:30").unwrap();
        assert_eq!(t.datetime_label(), "01/03/2024, 04:45:30");
    }

    #[test]
    fn missing_or_garbage_renders_dash() {
        assert_eq!(date_label(None), "-");
        assert_eq!(date_label(Some("yesterday")), "-");
        assert_eq!(datetime_label(Some("2024-03-01")), "01/03/2024, 00:00:00");
    }
}

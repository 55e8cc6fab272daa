use crate::content::frontmatter::parse_date;
use chrono::{DateTime, Utc};
use minijinja::Value;

/// 人类可读日期，如 `January 5, 2024`（UTC，英文月份，与系统 locale 无关）
///
/// 日期缺失时返回空字符串，不中断构建。
pub fn readable_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None => String::new(),
    }
}

/// 用于 `datetime="..."` 属性的日期，格式 `YYYY-MM-DD`（UTC）
pub fn html_date_string(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// 将模板值转换为 UTC 时间
///
/// 字符串按 front matter 的日期格式解析，整数视为 Unix 秒；其余一律视为无效。
pub fn coerce_date(value: &Value) -> Option<DateTime<Utc>> {
    if let Some(s) = value.as_str() {
        return parse_date(s).ok();
    }
    i64::try_from(value.clone())
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_in_utc() {
        let dt = Utc.with_ymd_and_hms(2023, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(readable_date(Some(&dt)), "March 9, 2023");
        assert_eq!(html_date_string(Some(&dt)), "2023-03-09");
    }

    #[test]
    fn offset_dates_are_normalized_to_utc() {
        let dt = coerce_date(&Value::from("2023-12-31T22:00:00-05:00"));
        assert_eq!(readable_date(dt.as_ref()), "January 1, 2024");
        assert_eq!(html_date_string(dt.as_ref()), "2024-01-01");
    }

    #[test]
    fn missing_or_invalid_dates_are_empty() {
        assert_eq!(readable_date(None), "");
        assert_eq!(html_date_string(None), "");
        assert!(coerce_date(&Value::from("not a date")).is_none());
        assert!(coerce_date(&Value::UNDEFINED).is_none());
    }

    #[test]
    fn integers_are_unix_seconds() {
        let dt = coerce_date(&Value::from(0));
        assert_eq!(html_date_string(dt.as_ref()), "1970-01-01");
    }

    #[test]
    fn repeated_calls_agree() {
        let dt = Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(readable_date(Some(&dt)), readable_date(Some(&dt)));
    }
}

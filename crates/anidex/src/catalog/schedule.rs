//! 放送日计算
//!
//! 目录 API 的放送表按日本标准时间（JST）划分星期

use chrono::{DateTime, Datelike, Utc, Weekday};
use chrono_tz::Asia::Tokyo;

/// 放送表接受的星期名称
pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// 给定 UTC 时间在 JST 下的星期名称（小写英文）
pub fn jst_day_for(now: DateTime<Utc>) -> &'static str {
    match now.with_timezone(&Tokyo).weekday() {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// 当前 JST 星期名称
pub fn current_jst_day() -> &'static str {
    jst_day_for(Utc::now())
}

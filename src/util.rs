use std::env;

use chrono::{DateTime, Local, TimeZone};

/// True when `name` is set to any non-empty value.
pub fn env_present(name: &str) -> bool {
    is_present(env::var(name).ok().as_deref())
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}

/// Local time as `YYYYMMDDhhmmss`, the timestamp format used in sort keys.
pub fn current_timestamp() -> String {
    format_timestamp(&Local::now())
}

pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%Y%m%d%H%M%S").to_string()
}

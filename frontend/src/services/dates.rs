use chrono::NaiveDate;
use js_sys::Date;

/// Current date in the browser's local timezone.
pub fn today() -> NaiveDate {
    let now = Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1, // JavaScript months are 0-indexed
        now.get_date(),
    )
    .unwrap_or_default()
}

/// Current date in YYYY-MM-DD format, the shape date inputs expect.
pub fn today_string() -> String {
    today().format("%Y-%m-%d").to_string()
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> f64 {
    Date::now()
}

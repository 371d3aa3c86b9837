use chrono::NaiveDate;
use js_sys::Date;

/// Today's local date from the browser clock
pub fn today() -> NaiveDate {
    let now = Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

/// Get current date in YYYY-MM-DD format, for `<input type="date">` defaults
pub fn get_current_date() -> String {
    today().format("%Y-%m-%d").to_string()
}

/// "2024-03-01" -> "March 1, 2024"; anything unparsable is returned as is
pub fn format_display_date(iso_date: &str) -> String {
    match NaiveDate::parse_from_str(iso_date.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => iso_date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2024-03-01"), "March 1, 2024");
        assert_eq!(format_display_date("soon"), "soon");
    }

    #[wasm_bindgen_test]
    fn test_current_date_shape() {
        let date = get_current_date();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
    }
}

//! Meeting dates
//!
//! Meetings are held on Wednesdays. Submissions for a week close before the
//! week starts, so the meeting open for submissions is never this week's.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// The Wednesday open for submissions on `today`
///
/// From Sunday to Wednesday this is the Wednesday of the following week,
/// from Thursday to Saturday the coming Wednesday.
pub fn next_wednesday(today: NaiveDate) -> NaiveDate {
    let day = today.weekday().num_days_from_sunday();
    let until_wednesday = (3 + 7 - day) % 7;
    let diff = if day <= 3 {
        until_wednesday + 7
    } else {
        until_wednesday
    };
    today + Days::new(u64::from(diff))
}

/// First Wednesday of March still ahead of `today`
///
/// On that Wednesday itself the following year's date is returned.
pub fn first_wednesday_of_march(today: NaiveDate) -> Option<NaiveDate> {
    let this_year = NaiveDate::from_weekday_of_month_opt(today.year(), 3, Weekday::Wed, 1)?;
    if this_year > today {
        return Some(this_year);
    }
    NaiveDate::from_weekday_of_month_opt(today.year() + 1, 3, Weekday::Wed, 1)
}

/// The meeting new submissions go to
///
/// During the seasonal break meetings resume on the first Wednesday of
/// March, otherwise they follow [`next_wednesday`].
pub fn next_meeting_date(today: NaiveDate, seasonal_break: bool) -> NaiveDate {
    if seasonal_break {
        if let Some(date) = first_wednesday_of_march(today) {
            return date;
        }
    }
    next_wednesday(today)
}

/// Meeting key for a date, `YYYY-MM-DD`
pub fn meeting_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_next_wednesday_skips_current_week() {
        // Sunday through Saturday of one week all submit to the same meeting
        for today in ["2026-10-18", "2026-10-19", "2026-10-21", "2026-10-22", "2026-10-24"] {
            assert_eq!(next_wednesday(date(today)), date("2026-10-28"), "from {today}");
        }
        assert_eq!(next_wednesday(date("2026-12-31")), date("2027-01-06"));
    }

    #[test]
    fn test_first_wednesday_of_march() {
        assert_eq!(first_wednesday_of_march(date("2026-02-10")), Some(date("2026-03-04")));
        assert_eq!(first_wednesday_of_march(date("2026-03-04")), Some(date("2027-03-03")));
        assert_eq!(first_wednesday_of_march(date("2026-10-18")), Some(date("2027-03-03")));
    }

    #[test]
    fn test_next_meeting_date() {
        assert_eq!(next_meeting_date(date("2026-02-10"), true), date("2026-03-04"));
        assert_eq!(next_meeting_date(date("2026-02-10"), false), date("2026-02-18"));
        assert_eq!(meeting_key(date("2026-03-04")), "2026-03-04");
    }
}

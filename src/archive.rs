//! Archive view: submissions grouped per meeting
//!
//! The archive lists every past meeting newest first, each with a one-line
//! summary of how its submissions were handled.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::column::Column;
use crate::row::Row;

/// Group key used for rows without a meeting
pub const NO_MEETING: &str = "--";

/// Counts shown next to each meeting in the archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupSummary {
    pub submissions: usize,
    pub approved: usize,
    pub long: usize,
    pub vetoed: usize,
    /// Rows whose slides column holds a link
    pub slides: usize,
}

impl GroupSummary {
    /// Count the statuses and slide links of a set of rows
    pub fn of(rows: &[Row]) -> Self {
        rows.iter().fold(
            GroupSummary {
                submissions: rows.len(),
                ..Default::default()
            },
            |mut summary, row| {
                if row.status_is("approved") {
                    summary.approved += 1;
                } else if row.status_is("long") {
                    summary.long += 1;
                } else if row.status_is("vetoed") {
                    summary.vetoed += 1;
                }
                if row.has_slides() {
                    summary.slides += 1;
                }
                summary
            },
        )
    }
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} submissions | {} approved | {} long | {} vetoed | {} slides",
            self.submissions, self.approved, self.long, self.vetoed, self.slides
        )
    }
}

/// All rows of one meeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingGroup {
    meeting: String,
    rows: Vec<Row>,
    summary: GroupSummary,
}

impl MeetingGroup {
    fn new(meeting: String, rows: Vec<Row>) -> Self {
        let summary = GroupSummary::of(&rows);
        Self {
            meeting,
            rows,
            summary,
        }
    }

    /// The meeting key, [`NO_MEETING`] for rows without one
    pub fn meeting(&self) -> &str {
        &self.meeting
    }

    /// Rows of this meeting, in their original order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Status and slides counts over the group's rows
    pub fn summary(&self) -> GroupSummary {
        self.summary
    }

    /// The meeting date, if the key is a `YYYY-MM-DD` date
    pub fn date(&self) -> Option<NaiveDate> {
        parse_meeting_date(&self.meeting)
    }

    /// Heading shown for this group, e.g. `Mar 4, 2026`
    pub fn label(&self) -> String {
        format_readable_date(&self.meeting)
    }
}

/// Parse a meeting key of the exact form `YYYY-MM-DD`
pub fn parse_meeting_date(key: &str) -> Option<NaiveDate> {
    let bytes = key.as_bytes();
    let shaped = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Render a meeting key for display
///
/// Dates become `Mar 4, 2026`, an empty key becomes `--` and anything else
/// is returned unchanged.
pub fn format_readable_date(value: &str) -> String {
    if value.is_empty() {
        return NO_MEETING.to_string();
    }
    match parse_meeting_date(value) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// Newest first: by date when both keys are dates, by reversed key text otherwise
fn newest_first(a: &str, b: &str) -> Ordering {
    match (parse_meeting_date(a), parse_meeting_date(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        _ => b.cmp(a),
    }
}

/// Group rows by their meeting column
///
/// Groups are formed in first-seen order and then sorted newest meeting
/// first. The input rows are left untouched.
pub fn group_by_meeting(rows: &[Row]) -> Vec<MeetingGroup> {
    let mut grouped: IndexMap<&str, Vec<Row>> = IndexMap::new();
    for row in rows {
        let meeting = match row.value(Column::Meeting) {
            "" => NO_MEETING,
            meeting => meeting,
        };
        grouped.entry(meeting).or_default().push(row.clone());
    }

    let mut groups: Vec<MeetingGroup> = grouped
        .into_iter()
        .map(|(meeting, rows)| MeetingGroup::new(meeting.to_string(), rows))
        .collect();
    groups.sort_by(|a, b| newest_first(&a.meeting, &b.meeting));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(meeting: &str, status: &str, slides: &str) -> Row {
        Row::new()
            .with(Column::Meeting, meeting)
            .with(Column::Status, status)
            .with(Column::Slides, slides)
    }

    fn keys(groups: &[MeetingGroup]) -> Vec<&str> {
        groups.iter().map(MeetingGroup::meeting).collect()
    }

    #[test]
    fn test_newest_meeting_first() {
        let rows = [
            row("2026-02-04", "approved", ""),
            row("2026-03-04", "pending", ""),
            row("2026-02-04", "long", ""),
        ];

        let groups = group_by_meeting(&rows);

        assert_eq!(keys(&groups), vec!["2026-03-04", "2026-02-04"]);
        assert_eq!(groups[1].rows().len(), 2);
        assert_eq!(groups[1].rows()[0].value(Column::Status), "approved");
    }

    #[test]
    fn test_non_date_keys_sort_reverse_lexicographic() {
        let rows = [
            row("alpha", "", ""),
            row("", "", ""),
            row("2025-12-03", "", ""),
            row("beta", "", ""),
        ];

        let groups = group_by_meeting(&rows);

        assert_eq!(keys(&groups), vec!["beta", "alpha", "2025-12-03", "--"]);
        assert_eq!(groups[3].label(), "--");
    }

    #[test]
    fn test_summary_counts() {
        let rows = [
            row("2026-03-04", "Approved", "https://slides/1"),
            row("2026-03-04", "LONG", "http://slides/2"),
            row("2026-03-04", "vetoed", "soon"),
            row("2026-03-04", "pending", ""),
            row("2026-03-04", "approved", ""),
        ];

        let groups = group_by_meeting(&rows);
        let summary = groups[0].summary();

        assert_eq!(
            summary,
            GroupSummary {
                submissions: 5,
                approved: 2,
                long: 1,
                vetoed: 1,
                slides: 2,
            }
        );
        assert_eq!(
            summary.to_string(),
            "5 submissions | 2 approved | 1 long | 1 vetoed | 2 slides"
        );
    }

    #[test]
    fn test_grouping_does_not_touch_input() {
        let rows = vec![row("2026-02-04", "", ""), row("2026-03-04", "", "")];
        let before = rows.clone();
        let _ = group_by_meeting(&rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_meeting_dates() {
        assert_eq!(
            parse_meeting_date("2026-03-04"),
            NaiveDate::from_ymd_opt(2026, 3, 4)
        );
        assert_eq!(parse_meeting_date("2026-3-4"), None);
        assert_eq!(parse_meeting_date("2026-02-30"), None);
        assert_eq!(parse_meeting_date("--"), None);
    }

    #[test]
    fn test_readable_date() {
        assert_eq!(format_readable_date("2026-03-04"), "Mar 4, 2026");
        assert_eq!(format_readable_date("2025-12-17"), "Dec 17, 2025");
        assert_eq!(format_readable_date(""), "--");
        assert_eq!(format_readable_date("spring session"), "spring session");
    }
}

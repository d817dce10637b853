//! Client-side sibling checks for one day's entries.
//!
//! Two mutually exclusive modes: forms that key entries by wall-clock
//! range use the overlap detector, forms that key them by project use the
//! duplicate-project detector. Both are advisory; the server stays
//! authoritative.

use crate::domain::DailyLogEntry;
use crate::hours::clock_to_minutes;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Checks a candidate entry's time range against all other entries of the
/// same day. Returns a message naming both ranges on the first overlap
/// found, `None` otherwise.
///
/// Ranges ending at or before their start cross midnight. Comparisons are
/// inclusive on both ends: back-to-back ranges sharing an endpoint count
/// as overlapping.
pub fn check_time_conflict(
    entries: &[DailyLogEntry],
    candidate: &DailyLogEntry,
    candidate_idx: usize,
) -> Option<String> {
    let (start_str, end_str) = (candidate.start_time.as_deref()?, candidate.end_time.as_deref()?);
    let (candidate_start, candidate_end) = normalize_range(start_str, end_str)?;

    for (idx, other) in entries.iter().enumerate() {
        if idx == candidate_idx {
            continue;
        }
        let (Some(other_start_str), Some(other_end_str)) =
            (other.start_time.as_deref(), other.end_time.as_deref())
        else {
            continue;
        };
        let Some((other_start, other_end)) = normalize_range(other_start_str, other_end_str)
        else {
            continue;
        };

        if ranges_overlap(candidate_start, candidate_end, other_start, other_end) {
            return Some(format!(
                "Time period {}–{} overlaps with entry {}–{}.",
                start_str, end_str, other_start_str, other_end_str
            ));
        }
    }
    None
}

/// Minutes since midnight for both endpoints; `None` when either time is
/// invalid, which skips the check entirely.
fn normalize_range(start: &str, end: &str) -> Option<(u32, u32)> {
    let start_mins = clock_to_minutes(start)?;
    let mut end_mins = clock_to_minutes(end)?;
    if end_mins <= start_mins {
        end_mins += MINUTES_PER_DAY;
    }
    Some((start_mins, end_mins))
}

fn ranges_overlap(cs: u32, ce: u32, os: u32, oe: u32) -> bool {
    // A wrapped range occupies the next-day band after normalization, so
    // compare the candidate at both day offsets as well.
    overlaps(cs, ce, os, oe)
        || overlaps(cs + MINUTES_PER_DAY, ce + MINUTES_PER_DAY, os, oe)
        || overlaps(cs, ce, os + MINUTES_PER_DAY, oe + MINUTES_PER_DAY)
}

fn overlaps(cs: u32, ce: u32, os: u32, oe: u32) -> bool {
    (cs >= os && cs <= oe) || (ce >= os && ce <= oe) || (cs <= os && ce >= oe)
}

/// Checks a candidate's project against all other entries of the same day
/// (hours-keyed forms). Entries without a project never conflict.
pub fn check_duplicate_project(
    entries: &[DailyLogEntry],
    project_id: Option<i64>,
    candidate_idx: usize,
) -> Option<String> {
    let project_id = project_id?;
    for (idx, other) in entries.iter().enumerate() {
        if idx == candidate_idx {
            continue;
        }
        if other.project_id == Some(project_id) {
            return Some("This project is already selected for this day.".to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()
    }

    fn timed(start: &str, end: &str) -> DailyLogEntry {
        let mut entry = DailyLogEntry::blank(day());
        entry.start_time = Some(start.to_string());
        entry.end_time = Some(end.to_string());
        entry
    }

    fn with_project(project_id: i64) -> DailyLogEntry {
        let mut entry = DailyLogEntry::blank(day());
        entry.project_id = Some(project_id);
        entry
    }

    #[test]
    fn test_non_overlapping_ranges_are_clean() {
        let entries = vec![
            timed("09:00", "10:00"),
            timed("10:30", "12:00"),
            timed("13:00", "17:00"),
        ];
        for (idx, entry) in entries.iter().enumerate() {
            assert_eq!(check_time_conflict(&entries, entry, idx), None);
        }
    }

    #[test]
    fn test_containment_flags_both_directions() {
        let entries = vec![timed("09:00", "17:00"), timed("10:00", "11:00")];
        assert!(check_time_conflict(&entries, &entries[0], 0).is_some());
        assert!(check_time_conflict(&entries, &entries[1], 1).is_some());
    }

    #[test]
    fn test_overnight_range_conflicts_across_midnight() {
        let entries = vec![timed("22:00", "02:00"), timed("01:00", "03:00")];
        assert!(check_time_conflict(&entries, &entries[0], 0).is_some());
        assert!(check_time_conflict(&entries, &entries[1], 1).is_some());
    }

    #[test]
    fn test_back_to_back_ranges_conflict_on_shared_endpoint() {
        let entries = vec![timed("22:00", "23:00"), timed("23:00", "23:30")];
        assert!(check_time_conflict(&entries, &entries[0], 0).is_some());
        assert!(check_time_conflict(&entries, &entries[1], 1).is_some());
    }

    #[test]
    fn test_overnight_does_not_flag_clear_morning() {
        let entries = vec![timed("22:00", "02:00"), timed("08:00", "12:00")];
        assert_eq!(check_time_conflict(&entries, &entries[1], 1), None);
    }

    #[test]
    fn test_invalid_candidate_skips_check() {
        let entries = vec![timed("9:00", "10:00"), timed("09:30", "11:00")];
        assert_eq!(check_time_conflict(&entries, &entries[0], 0), None);
    }

    #[test]
    fn test_invalid_sibling_is_skipped() {
        let entries = vec![timed("09:00", "10:00"), timed("junk", "10:00")];
        assert_eq!(check_time_conflict(&entries, &entries[0], 0), None);
    }

    #[test]
    fn test_conflict_message_names_both_ranges() {
        let entries = vec![timed("09:00", "11:00"), timed("10:00", "12:00")];
        assert_eq!(
            check_time_conflict(&entries, &entries[0], 0).as_deref(),
            Some("Time period 09:00–11:00 overlaps with entry 10:00–12:00.")
        );
    }

    #[test]
    fn test_first_conflict_wins() {
        let entries = vec![
            timed("09:00", "12:00"),
            timed("09:30", "10:00"),
            timed("11:00", "11:30"),
        ];
        let message = check_time_conflict(&entries, &entries[0], 0).unwrap();
        assert!(message.contains("09:30–10:00"));
    }

    #[test]
    fn test_duplicate_project_detected() {
        let entries = vec![with_project(1), with_project(2)];
        assert_eq!(
            check_duplicate_project(&entries, Some(1), 1).as_deref(),
            Some("This project is already selected for this day.")
        );
        assert_eq!(check_duplicate_project(&entries, Some(3), 1), None);
    }

    #[test]
    fn test_duplicate_project_ignores_own_index() {
        let entries = vec![with_project(1), with_project(2)];
        assert_eq!(check_duplicate_project(&entries, Some(1), 0), None);
    }

    #[test]
    fn test_missing_project_never_conflicts() {
        let entries = vec![DailyLogEntry::blank(day()), DailyLogEntry::blank(day())];
        assert_eq!(check_duplicate_project(&entries, None, 0), None);
    }
}

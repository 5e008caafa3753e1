//! Slot rule engine: enumerate bookable time windows for a meeting type.
//!
//! Pure and deterministic -- given the same `(meeting type, date, now)`
//! the output is reproducible bit for bit. Unknown meeting types and
//! non-business days yield an empty list rather than an error; the date
//! picker is responsible for rejecting fully past dates, the engine only
//! filters same-day slots that have already started.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use frontdesk_types::appointment::TimeSlot;

/// Static scheduling rule for one meeting type.
#[derive(Debug, Clone, Copy)]
pub struct MeetingRule {
    /// Length of one slot, in minutes.
    pub duration_minutes: u32,
    /// Earliest hour a slot may start, [0, 24).
    pub window_start_hour: u32,
    /// Hour by which a slot must have ended, [0, 24).
    pub window_end_hour: u32,
    /// Whether the lunch interval removes candidate slots.
    pub lunch_blocked: bool,
    /// Mandatory idle time after each slot before the next may start.
    pub gap_after_minutes: u32,
}

/// Lunch interval bounds, wall-clock hours.
pub const LUNCH_START_HOUR: u32 = 13;
pub const LUNCH_END_HOUR: u32 = 15;

const ZOOM: MeetingRule = MeetingRule {
    duration_minutes: 60,
    window_start_hour: 10,
    window_end_hour: 17,
    lunch_blocked: true,
    gap_after_minutes: 0,
};

const INPERSON: MeetingRule = MeetingRule {
    duration_minutes: 120,
    window_start_hour: 10,
    window_end_hour: 17,
    lunch_blocked: true,
    gap_after_minutes: 60,
};

const TELECALL: MeetingRule = MeetingRule {
    duration_minutes: 60,
    window_start_hour: 10,
    window_end_hour: 21,
    lunch_blocked: false,
    gap_after_minutes: 0,
};

/// Look up the scheduling rule for a meeting type key.
pub fn rule_for(meeting_type: &str) -> Option<&'static MeetingRule> {
    match meeting_type {
        "zoom" => Some(&ZOOM),
        "inperson" => Some(&INPERSON),
        "telecall" => Some(&TELECALL),
        _ => None,
    }
}

/// Saturday and Sunday are never bookable; no holiday calendar.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Enumerate the bookable slots for `meeting_type` on `date`, in
/// chronological order.
///
/// `now` is the wall-clock evaluation time: on the current day, slots
/// whose start is already in the past are skipped. Future days carry no
/// such filter. When the rule blocks lunch, any candidate overlapping
/// the 13:00-15:00 interval moves the cursor straight to 15:00 -- the
/// whole lunch window is excised as one gap, never slot by slot.
pub fn available_slots(
    meeting_type: &str,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<TimeSlot> {
    let Some(rule) = rule_for(meeting_type) else {
        return Vec::new();
    };
    if !is_business_day(date) {
        return Vec::new();
    }

    let window_end = rule.window_end_hour * 60;
    let is_today = date == now.date();
    let now_minutes = now.hour() * 60 + now.minute();

    let mut slots = Vec::new();
    let mut cursor = rule.window_start_hour * 60;

    while cursor + rule.duration_minutes <= window_end {
        if is_today && cursor < now_minutes {
            cursor += rule.duration_minutes + rule.gap_after_minutes;
            continue;
        }

        let end = cursor + rule.duration_minutes;
        if rule.lunch_blocked && cursor < LUNCH_END_HOUR * 60 && end > LUNCH_START_HOUR * 60 {
            cursor = LUNCH_END_HOUR * 60;
            continue;
        }

        slots.push(TimeSlot {
            start: format_clock(cursor),
            end: format_clock(end),
        });
        cursor += rule.duration_minutes + rule.gap_after_minutes;
    }

    slots
}

/// Render minutes-since-midnight as 12-hour wall-clock text, e.g.
/// `630` -> `"10:30 AM"`, `0` -> `"12:00 AM"`.
pub fn format_clock(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let meridiem = if hours >= 12 { "PM" } else { "AM" };
    let hour12 = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{minutes:02} {meridiem}")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Monday.
    fn weekday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 7).unwrap()
    }

    /// A `now` on a different (earlier) day, so no same-day filtering.
    fn day_before_morning() -> NaiveDateTime {
        weekday()
            .pred_opt()
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn starts(slots: &[TimeSlot]) -> Vec<&str> {
        slots.iter().map(|s| s.start.as_str()).collect()
    }

    #[test]
    fn weekend_is_never_bookable() {
        let saturday = NaiveDate::from_ymd_opt(2026, 9, 5).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2026, 9, 6).unwrap();
        for meeting_type in ["zoom", "inperson", "telecall"] {
            assert!(available_slots(meeting_type, saturday, day_before_morning()).is_empty());
            assert!(available_slots(meeting_type, sunday, day_before_morning()).is_empty());
        }
    }

    #[test]
    fn unknown_meeting_type_is_empty_not_an_error() {
        assert!(available_slots("carrier-pigeon", weekday(), day_before_morning()).is_empty());
    }

    #[test]
    fn zoom_weekday_excises_lunch_as_one_gap() {
        let slots = available_slots("zoom", weekday(), day_before_morning());
        assert_eq!(
            starts(&slots),
            vec!["10:00 AM", "11:00 AM", "12:00 PM", "3:00 PM", "4:00 PM"]
        );
        assert_eq!(slots[2].end, "1:00 PM");
        assert_eq!(slots[3].end, "4:00 PM");
        assert_eq!(slots.last().unwrap().end, "5:00 PM");
    }

    #[test]
    fn inperson_spacing_and_lunch() {
        let slots = available_slots("inperson", weekday(), day_before_morning());
        assert_eq!(starts(&slots), vec!["10:00 AM", "3:00 PM"]);
        // 10:00 -> 15:00 is 300 minutes, at least duration + gap (180).
        assert_eq!(slots[0].end, "12:00 PM");
        assert_eq!(slots[1].end, "5:00 PM");
    }

    #[test]
    fn telecall_may_start_inside_lunch() {
        let slots = available_slots("telecall", weekday(), day_before_morning());
        let starts = starts(&slots);
        assert!(starts.contains(&"1:00 PM"));
        assert!(starts.contains(&"2:00 PM"));
        assert_eq!(starts.first(), Some(&"10:00 AM"));
        assert_eq!(slots.last().unwrap().end, "9:00 PM");
        assert_eq!(slots.len(), 11);
    }

    #[test]
    fn same_day_past_slots_are_skipped() {
        let now = weekday().and_hms_opt(12, 30, 0).unwrap();
        let slots = available_slots("zoom", weekday(), now);
        // 10:00, 11:00, 12:00 already started; 13:00/14:00 fall to lunch.
        assert_eq!(starts(&slots), vec!["3:00 PM", "4:00 PM"]);
    }

    #[test]
    fn future_day_has_no_past_filter() {
        let now = weekday().and_hms_opt(23, 59, 0).unwrap();
        let next_monday = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let slots = available_slots("zoom", next_monday, now);
        assert_eq!(slots.len(), 5);
    }

    #[test]
    fn generation_is_deterministic() {
        let now = weekday().and_hms_opt(11, 17, 0).unwrap();
        let a = available_slots("inperson", weekday(), now);
        let b = available_slots("inperson", weekday(), now);
        assert_eq!(a, b);
    }

    #[test]
    fn format_clock_edges() {
        assert_eq!(format_clock(0), "12:00 AM");
        assert_eq!(format_clock(630), "10:30 AM");
        assert_eq!(format_clock(720), "12:00 PM");
        assert_eq!(format_clock(1020), "5:00 PM");
    }
}

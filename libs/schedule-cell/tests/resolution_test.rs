use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use schedule_cell::models::{DateLabel, DaySchedule, TimeSlot, WorkingHours};
use schedule_cell::services::resolution::ScheduleResolver;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S").expect("test time")
}

fn working_hours(starts: &str, ends: &str) -> WorkingHours {
    WorkingHours {
        id: Uuid::new_v4(),
        starts_at: time(starts),
        ends_at: time(ends),
    }
}

fn day(on: &str, hours: Vec<WorkingHours>) -> DaySchedule {
    DaySchedule {
        date: date(on),
        clinic_id: Uuid::new_v4(),
        clinic_title: "Central Clinic".to_string(),
        clinic_address: "12 Main St".to_string(),
        working_hours: hours,
    }
}

#[test]
fn test_available_dates_ascending_and_deduplicated() {
    let resolver = ScheduleResolver::new();
    let days = vec![
        day("2025-03-12", vec![working_hours("09:00:00", "09:15:00")]),
        day("2025-03-10", vec![working_hours("10:00:00", "10:15:00")]),
        day("2025-03-12", vec![working_hours("14:00:00", "14:15:00")]),
        day("2025-03-11", vec![]),
    ];

    let dates = resolver.available_dates(&days);

    assert_eq!(
        dates,
        vec![date("2025-03-10"), date("2025-03-11"), date("2025-03-12")]
    );
    // Strictly ascending implies duplicate-free
    assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_available_dates_empty_schedule() {
    let resolver = ScheduleResolver::new();
    assert!(resolver.available_dates(&[]).is_empty());
}

#[test]
fn test_day_for_date_exact_match_only() {
    let resolver = ScheduleResolver::new();
    let days = vec![day("2025-03-10", vec![working_hours("09:00:00", "09:15:00")])];

    assert!(resolver.day_for_date(&days, date("2025-03-10")).is_some());
    assert!(resolver.day_for_date(&days, date("2025-03-11")).is_none());
}

#[test]
fn test_time_slots_preserve_order_and_ids() {
    let resolver = ScheduleResolver::new();
    let hours = vec![
        working_hours("09:00:00", "09:15:00"),
        working_hours("09:15:00", "09:30:00"),
        working_hours("11:00:00", "11:15:00"),
    ];

    let slots = resolver.time_slots(&hours);

    assert_eq!(slots.len(), 3);
    for (record, slot) in hours.iter().zip(slots.iter()) {
        assert_eq!(slot.working_hours_id, record.id);
        assert_eq!(slot.starts_at, record.starts_at);
        assert_eq!(slot.ends_at, Some(record.ends_at));
    }
}

#[test]
fn test_bookable_dates_skip_closed_days() {
    let resolver = ScheduleResolver::new();
    let days = vec![
        day("2025-03-10", vec![]),
        day("2025-03-11", vec![working_hours("09:00:00", "09:15:00")]),
    ];

    assert_eq!(resolver.bookable_dates(&days), vec![date("2025-03-11")]);
    assert_eq!(resolver.first_bookable_date(&days), Some(date("2025-03-11")));
}

#[test]
fn test_default_date_prefers_today() {
    let resolver = ScheduleResolver::new();
    let today = date("2025-03-10");
    let days = vec![
        day("2025-03-10", vec![working_hours("09:00:00", "09:15:00")]),
        day("2025-03-11", vec![working_hours("09:00:00", "09:15:00")]),
    ];

    assert_eq!(resolver.default_date(&days, today), Some(today));
}

#[test]
fn test_default_date_falls_back_to_day_after_tomorrow() {
    let resolver = ScheduleResolver::new();
    let today = date("2025-03-10");
    // No entry for today or tomorrow, open slots the day after
    let days = vec![day("2025-03-12", vec![working_hours("09:00:00", "09:15:00")])];

    assert_eq!(resolver.default_date(&days, today), Some(date("2025-03-12")));
}

#[test]
fn test_default_date_skips_empty_today_entry() {
    let resolver = ScheduleResolver::new();
    let today = date("2025-03-10");
    // Present-but-empty entry for today must not win over a later open day
    let days = vec![
        day("2025-03-10", vec![]),
        day("2025-03-14", vec![working_hours("09:00:00", "09:15:00")]),
    ];

    assert_eq!(resolver.default_date(&days, today), Some(date("2025-03-14")));
}

#[test]
fn test_default_date_none_when_nothing_bookable() {
    let resolver = ScheduleResolver::new();
    let days = vec![day("2025-03-10", vec![])];

    assert_eq!(resolver.default_date(&days, date("2025-03-10")), None);
    assert_eq!(resolver.default_date(&[], date("2025-03-10")), None);
}

#[test]
fn test_label_for_near_dates() {
    let resolver = ScheduleResolver::new();
    let today = date("2025-03-10");

    assert_eq!(resolver.label_for(today, today), DateLabel::Today);
    assert_eq!(resolver.label_for(date("2025-03-11"), today), DateLabel::Tomorrow);
    assert_eq!(resolver.label_for(date("2025-03-12"), today), DateLabel::DayAfterTomorrow);
    assert_eq!(resolver.label_for(date("2025-03-20"), today), DateLabel::Other);
    assert_eq!(resolver.label_for(date("2025-03-09"), today), DateLabel::Other);
}

#[test]
fn test_contains_slot_matches_by_working_hours_id() {
    let hours = working_hours("09:00:00", "09:15:00");
    let entry = day("2025-03-10", vec![hours.clone()]);
    let slot = TimeSlot::from(&hours);

    assert!(entry.contains_slot(&slot));

    let foreign = TimeSlot {
        working_hours_id: Uuid::new_v4(),
        starts_at: time("09:00:00"),
        ends_at: None,
    };
    assert!(!entry.contains_slot(&foreign));
}

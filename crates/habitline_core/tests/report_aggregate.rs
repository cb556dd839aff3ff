use chrono::{Local, TimeZone};
use habitline_core::{
    build_window, bucket_all, bucket_habit, current_streak, habit_heatmap, intensity, overview,
    week_chart, weekday_histogram, Habit, ReportError, MONTH_WINDOW_DAYS, WEEK_WINDOW_DAYS,
};

// Reference "now": Tuesday 2026-01-20, mid-day local time.
const NOW: (i32, u32, u32) = (2026, 1, 20);

#[test]
fn bucket_habit_is_idempotent() {
    let completions = vec![instant(2026, 1, 20), instant(2026, 1, 18)];
    let window = build_window(now_ms(), MONTH_WINDOW_DAYS).unwrap();

    let first = bucket_habit(&completions, &window).unwrap();
    let second = bucket_habit(&completions, &window).unwrap();
    assert_eq!(first, second);
}

#[test]
fn three_recent_completions_yield_three_days_and_ten_percent() {
    let completions = vec![
        instant(2026, 1, 20),
        instant(2026, 1, 19),
        instant(2026, 1, 18),
    ];

    let heatmap = habit_heatmap(&completions, now_ms()).unwrap();
    assert_eq!(heatmap.days.len(), MONTH_WINDOW_DAYS);
    assert_eq!(heatmap.completed_days, 3);
    assert_eq!(heatmap.completion_rate_percent, 10);

    let completed: Vec<bool> = heatmap.days.iter().map(|day| day.completed()).collect();
    assert!(completed[MONTH_WINDOW_DAYS - 3..].iter().all(|&done| done));
    assert!(!completed[..MONTH_WINDOW_DAYS - 3].iter().any(|&done| done));
}

#[test]
fn completion_rate_rounds_to_nearest_percent() {
    // 11 of 30 days is 36.66%, which reads as 37%.
    let completions: Vec<i64> = (10..=20).map(|day| instant(2026, 1, day)).collect();

    let heatmap = habit_heatmap(&completions, now_ms()).unwrap();
    assert_eq!(heatmap.completed_days, 11);
    assert_eq!(heatmap.completion_rate_percent, 37);
}

#[test]
fn aggregate_counts_titles_and_streak_across_two_habits() {
    let habit_a = habit("Read", vec![instant(2026, 1, 20), instant(2026, 1, 19)]);
    let habit_b = habit("Stretch", vec![instant(2026, 1, 20)]);

    let report = overview(&[habit_a, habit_b], now_ms()).unwrap();
    assert_eq!(report.days.len(), MONTH_WINDOW_DAYS);

    let today = report.days.last().unwrap();
    assert_eq!(today.completion_count, 2);
    assert_eq!(today.completed_titles, vec!["Read", "Stretch"]);

    let yesterday = &report.days[MONTH_WINDOW_DAYS - 2];
    assert_eq!(yesterday.completion_count, 1);
    assert_eq!(yesterday.completed_titles, vec!["Read"]);

    assert_eq!(report.total_completions, 3);
    assert_eq!(report.active_days, 2);
    assert_eq!(report.current_streak, 2);
}

#[test]
fn no_habits_yield_all_zero_aggregates() {
    let report = overview(&[], now_ms()).unwrap();

    assert_eq!(report.days.len(), MONTH_WINDOW_DAYS);
    assert!(report.days.iter().all(|day| day.completion_count == 0));
    assert!(report.days.iter().all(|day| day.completed_titles.is_empty()));
    assert_eq!(report.total_completions, 0);
    assert_eq!(report.active_days, 0);
    assert_eq!(report.current_streak, 0);
}

#[test]
fn streak_is_zero_when_today_has_no_activity() {
    let habit_a = habit("Read", vec![instant(2026, 1, 19), instant(2026, 1, 18)]);

    let report = overview(&[habit_a], now_ms()).unwrap();
    assert_eq!(report.active_days, 2);
    assert_eq!(report.current_streak, 0);
}

#[test]
fn streak_counts_exactly_the_trailing_active_days() {
    // Four active days ending today, a gap, then more activity further back.
    let completions = vec![
        instant(2026, 1, 20),
        instant(2026, 1, 19),
        instant(2026, 1, 18),
        instant(2026, 1, 17),
        instant(2026, 1, 15),
    ];
    let habit_a = habit("Read", completions);

    let report = overview(&[habit_a], now_ms()).unwrap();
    assert_eq!(report.current_streak, 4);
}

#[test]
fn current_streak_scans_from_the_most_recent_day() {
    assert_eq!(current_streak([false, true, true]), 2);
    assert_eq!(current_streak([true, false]), 0);
    assert_eq!(current_streak(std::iter::empty()), 0);
    assert_eq!(current_streak([true; 30]), 30);
}

#[test]
fn intensity_is_monotonic_and_saturates_at_four() {
    assert_eq!(intensity(0), 0);
    assert_eq!(intensity(1), 1);
    assert_eq!(intensity(3), 3);
    assert_eq!(intensity(4), 4);
    assert_eq!(intensity(250), 4);

    let levels: Vec<u8> = (0..10).map(intensity).collect();
    assert!(levels.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn duplicate_same_day_instants_are_counted_defensively() {
    // The store prevents this, but legacy data may not honor it.
    let completions = vec![
        instant_at(2026, 1, 20, 8),
        instant_at(2026, 1, 20, 21),
    ];

    let chart = week_chart(&completions, now_ms()).unwrap();
    assert_eq!(chart.days.last().unwrap().count, 2);
    assert_eq!(chart.week_total, 2);

    let heatmap = habit_heatmap(&completions, now_ms()).unwrap();
    assert_eq!(heatmap.completed_days, 1);

    let aggregate = overview(&[habit("Read", completions)], now_ms()).unwrap();
    assert_eq!(aggregate.days.last().unwrap().completion_count, 1);
}

#[test]
fn week_chart_labels_follow_the_calendar() {
    let chart = week_chart(&[], now_ms()).unwrap();

    let labels: Vec<&str> = chart.days.iter().map(|day| day.weekday).collect();
    // Jan 14 2026 is a Wednesday; the window ends on Tuesday the 20th.
    assert_eq!(labels, vec!["Wed", "Thu", "Fri", "Sat", "Sun", "Mon", "Tue"]);
    assert_eq!(chart.days.len(), WEEK_WINDOW_DAYS);
    assert_eq!(chart.week_total, 0);
}

#[test]
fn unmappable_instants_fail_fast_instead_of_reading_as_gaps() {
    let completions = vec![instant(2026, 1, 20), i64::MAX];

    let err = habit_heatmap(&completions, now_ms()).unwrap_err();
    assert_eq!(
        err,
        ReportError::InvalidInstant {
            instant_ms: i64::MAX
        }
    );
    assert!(week_chart(&completions, now_ms()).is_err());
    assert!(weekday_histogram(&completions).is_err());

    let window = build_window(now_ms(), MONTH_WINDOW_DAYS).unwrap();
    assert!(bucket_all(&[habit("Read", completions)], &window).is_err());
}

#[test]
fn weekday_histogram_groups_whole_history_sunday_first() {
    let completions = vec![
        instant(2026, 1, 13), // Tuesday
        instant(2026, 1, 20), // Tuesday
        instant(2026, 1, 14), // Wednesday
    ];

    let counts = weekday_histogram(&completions).unwrap();
    assert_eq!(counts[2], 2);
    assert_eq!(counts[3], 1);
    assert_eq!(counts.iter().sum::<u32>(), 3);
}

fn now_ms() -> i64 {
    instant_at(NOW.0, NOW.1, NOW.2, 12)
}

fn instant(year: i32, month: u32, day: u32) -> i64 {
    instant_at(year, month, day, 12)
}

fn instant_at(year: i32, month: u32, day: u32, hour: u32) -> i64 {
    Local
        .with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("test instants avoid DST transitions")
        .timestamp_millis()
}

fn habit(title: &str, completions: Vec<i64>) -> Habit {
    let mut habit = Habit::new(title, "", 0).unwrap();
    habit.completions = completions;
    habit
}

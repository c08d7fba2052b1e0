//! Recurring event resolution
//!
//! Resolves the event catalog into the cash impact of a single projection
//! month. Month `i` is the calendar month `now + i`; an event's start index is
//! the month offset of its date (negative for events that started in the
//! past). Nothing is pre-expanded: the projection asks for one month at a
//! time and the horizon is bounded.

use jiff::civil::Date;

use crate::date_math::{
    add_days, add_months, fast_days_between, month_end, month_start, months_between,
};
use crate::model::lenient::finite_or_zero;
use crate::model::{CashEvent, Recurrence};

/// Month offset of the event's first occurrence, `None` without a date.
pub fn start_month_index(event: &CashEvent, now: Date) -> Option<i32> {
    event.date.map(|date| months_between(now, date))
}

/// How many times `event` fires during projection month `month`.
pub fn occurrences_in_month(event: &CashEvent, month: usize, now: Date) -> u32 {
    let Some(date) = event.date else {
        return 0;
    };
    let Some(start) = start_month_index(event, now) else {
        return 0;
    };
    let month = month as i32;
    if month < start {
        return 0;
    }
    let elapsed = month - start;

    let periodic = |every: u32| {
        let every = every.max(1) as i32;
        if elapsed % every != 0 {
            return 0;
        }
        let occurrence = add_months(date, elapsed);
        match event.end_date {
            Some(end) if occurrence > end => 0,
            _ => 1,
        }
    };

    match event.recurrence {
        Recurrence::None => u32::from(elapsed == 0),
        Recurrence::Monthly => periodic(1),
        Recurrence::Yearly => periodic(12),
        Recurrence::Custom => periodic(event.interval_months()),
        Recurrence::Weekly => weekly_occurrences(date, event.end_date, add_months(now, month)),
    }
}

/// Count dates `first + 7n` that land in the calendar month of `in_month`.
fn weekly_occurrences(first: Date, end_date: Option<Date>, in_month: Date) -> u32 {
    let window_start = month_start(in_month);
    let window_end = match end_date {
        Some(end) => end.min(month_end(in_month)),
        None => month_end(in_month),
    };

    let first_in_window = if first >= window_start {
        first
    } else {
        let gap = fast_days_between(first, window_start);
        add_days(first, (gap + 6) / 7 * 7)
    };

    if first_in_window > window_end {
        0
    } else {
        (fast_days_between(first_in_window, window_end) / 7 + 1) as u32
    }
}

/// Signed cash impact of all events for projection month `month`.
pub fn monthly_impact(events: &[CashEvent], month: usize, now: Date) -> f64 {
    events
        .iter()
        .map(|event| {
            let count = occurrences_in_month(event, month, now);
            if count == 0 {
                0.0
            } else {
                finite_or_zero(event.amount) * count as f64
            }
        })
        .sum()
}

/// Impact for months `0..=horizon`, for charting the event calendar.
pub fn impact_series(events: &[CashEvent], horizon: usize, now: Date) -> Vec<f64> {
    (0..=horizon)
        .map(|month| monthly_impact(events, month, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventId;
    use jiff::civil::date;

    const NOW: Date = date(2026, 10, 19);

    fn event(amount: f64, on: Date, recurrence: Recurrence) -> CashEvent {
        CashEvent {
            id: EventId::new("e"),
            name: "event".into(),
            amount,
            date: Some(on),
            recurrence,
            interval: None,
            end_date: None,
        }
    }

    #[test]
    fn test_one_off_fires_once() {
        let e = event(1_000.0, date(2027, 1, 10), Recurrence::None);
        let series = impact_series(&[e], 6, NOW);
        assert_eq!(series, vec![0.0, 0.0, 0.0, 1_000.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_past_one_off_never_fires() {
        let e = event(1_000.0, date(2026, 5, 1), Recurrence::None);
        assert!(impact_series(&[e], 12, NOW).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_monthly_from_this_month() {
        let e = event(-500.0, date(2026, 10, 1), Recurrence::Monthly);
        let total: f64 = (1..=3).map(|m| monthly_impact(&[e.clone()], m, NOW)).sum();
        assert_eq!(total, -1_500.0);
        assert_eq!(monthly_impact(&[e], 0, NOW), -500.0);
    }

    #[test]
    fn test_monthly_started_in_past_runs_every_month() {
        let e = event(100.0, date(2025, 3, 15), Recurrence::Monthly);
        assert!(impact_series(&[e], 5, NOW).iter().all(|&v| v == 100.0));
    }

    #[test]
    fn test_monthly_end_date_compares_real_dates() {
        // Occurrences fall on the 20th; the end date is the 10th of Jan
        let mut e = event(50.0, date(2026, 10, 20), Recurrence::Monthly);
        e.end_date = Some(date(2027, 1, 10));
        assert_eq!(
            impact_series(&[e.clone()], 4, NOW),
            vec![50.0, 50.0, 50.0, 0.0, 0.0]
        );
        e.end_date = Some(date(2027, 1, 20));
        assert_eq!(
            impact_series(&[e], 4, NOW),
            vec![50.0, 50.0, 50.0, 50.0, 0.0]
        );
    }

    #[test]
    fn test_yearly() {
        let e = event(-1_200.0, date(2026, 12, 1), Recurrence::Yearly);
        let series = impact_series(&[e], 26, NOW);
        let hits: Vec<usize> = (0..series.len()).filter(|&i| series[i] != 0.0).collect();
        assert_eq!(hits, vec![2, 14, 26]);
    }

    #[test]
    fn test_custom_interval() {
        let mut e = event(300.0, date(2026, 10, 1), Recurrence::Custom);
        e.interval = Some(3);
        let series = impact_series(&[e.clone()], 9, NOW);
        let hits: Vec<usize> = (0..series.len()).filter(|&i| series[i] != 0.0).collect();
        assert_eq!(hits, vec![0, 3, 6, 9]);

        // Interval below 1 behaves as monthly
        e.interval = Some(0);
        assert!(impact_series(&[e], 3, NOW).iter().all(|&v| v == 300.0));
    }

    #[test]
    fn test_weekly_counts_dates_in_month() {
        // Thursdays from 2026-10-01: Oct has 5 (1, 8, 15, 22, 29), Nov has 4
        let e = event(10.0, date(2026, 10, 1), Recurrence::Weekly);
        assert_eq!(occurrences_in_month(&e, 0, NOW), 5);
        assert_eq!(occurrences_in_month(&e, 1, NOW), 4);
    }

    #[test]
    fn test_weekly_respects_start_and_end() {
        let mut e = event(10.0, date(2026, 10, 20), Recurrence::Weekly);
        e.end_date = Some(date(2026, 11, 10));
        // Oct 20, 27
        assert_eq!(occurrences_in_month(&e, 0, NOW), 2);
        // Nov 3, 10
        assert_eq!(occurrences_in_month(&e, 1, NOW), 2);
        assert_eq!(occurrences_in_month(&e, 2, NOW), 0);
    }

    #[test]
    fn test_missing_date_never_fires() {
        let mut e = event(10.0, date(2026, 10, 1), Recurrence::Monthly);
        e.date = None;
        assert_eq!(start_month_index(&e, NOW), None);
        assert_eq!(monthly_impact(&[e], 0, NOW), 0.0);
    }

    #[test]
    fn test_signed_sum_across_events() {
        let events = vec![
            event(2_000.0, date(2026, 11, 1), Recurrence::None),
            event(-150.0, date(2026, 1, 1), Recurrence::Monthly),
        ];
        assert_eq!(monthly_impact(&events, 1, NOW), 1_850.0);
        assert_eq!(monthly_impact(&events, 2, NOW), -150.0);
    }
}

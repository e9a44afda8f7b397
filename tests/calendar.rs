#![forbid(unsafe_code)]
use chrono::{Datelike, NaiveDate, Weekday};
use dutyplan::{calendar, month_days, DayKind, PlanError};
use std::collections::BTreeSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn february_is_leap_year_aware() {
    let none = BTreeSet::new();
    assert_eq!(month_days(2024, 2, &none).unwrap().len(), 29);
    assert_eq!(month_days(2026, 2, &none).unwrap().len(), 28);
    assert_eq!(month_days(2000, 2, &none).unwrap().len(), 29);
    assert_eq!(month_days(1900, 2, &none).unwrap().len(), 28);
    assert_eq!(month_days(2026, 12, &none).unwrap().len(), 31);
}

#[test]
fn days_are_ordered_and_classified() {
    let days = month_days(2026, 2, &BTreeSet::new()).unwrap();
    assert_eq!(days[0].date, date(2026, 2, 1));
    assert!(days.windows(2).all(|w| w[0].date < w[1].date));

    for day in &days {
        let weekend = matches!(day.date.weekday(), Weekday::Sat | Weekday::Sun);
        assert_eq!(day.is_weekend_class(), weekend, "{}", day.date);
    }
    // 2026-02-01 est un dimanche
    assert_eq!(days[0].kind, DayKind::Weekend);
    assert_eq!(days[1].kind, DayKind::Weekday);
    assert_eq!(days.iter().filter(|d| d.is_weekend_class()).count(), 8);
}

#[test]
fn holidays_behave_like_weekends() {
    let holidays = BTreeSet::from([date(2026, 5, 1), date(2026, 5, 25)]);
    let days = month_days(2026, 5, &holidays).unwrap();
    let labour_day = days.iter().find(|d| d.date == date(2026, 5, 1)).unwrap();
    assert_eq!(labour_day.kind, DayKind::Holiday);
    assert!(labour_day.is_weekend_class());
    assert_eq!(labour_day.load_weight(), 2);

    assert_eq!(calendar::classify(date(2026, 5, 4), &holidays), DayKind::Weekday);
    assert_eq!(calendar::classify(date(2026, 5, 2), &holidays), DayKind::Weekend);
}

#[test]
fn invalid_month_is_rejected() {
    let none = BTreeSet::new();
    assert!(matches!(
        month_days(2026, 13, &none),
        Err(PlanError::InvalidMonth { year: 2026, month: 13 })
    ));
    assert!(matches!(month_days(2026, 0, &none), Err(PlanError::InvalidMonth { .. })));
}

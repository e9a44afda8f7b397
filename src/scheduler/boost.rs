use crate::calendar::Day;
use crate::model::Constraint;
use chrono::Weekday;
use std::collections::BTreeSet;

/// Bonus de priorité du jour pour un jeu de contraintes.
pub fn boost_for(constraints: &BTreeSet<Constraint>, day: &Day) -> i32 {
    let has = |c: Constraint| constraints.contains(&c);
    let mut boost = 0;

    if day.is_weekend_class() {
        for tag in [
            Constraint::HalfDayExempt,
            Constraint::PreferWeekend,
            Constraint::PreferFullWeekend,
        ] {
            if has(tag) {
                boost += 1;
            }
        }
        match day.weekday() {
            Weekday::Sat if has(Constraint::PreferSaturday) => boost += 1,
            Weekday::Sun if has(Constraint::PreferSunday) => boost += 1,
            _ => {}
        }
    } else if has(Constraint::PreferWeekday) {
        boost += 1;
    } else if let Some(tag) = weekday_preference(day.weekday()) {
        if has(tag) {
            boost += 1;
        }
    }

    boost
}

fn weekday_preference(weekday: Weekday) -> Option<Constraint> {
    match weekday {
        Weekday::Mon => Some(Constraint::PreferMonday),
        Weekday::Tue => Some(Constraint::PreferTuesday),
        Weekday::Wed => Some(Constraint::PreferWednesday),
        Weekday::Thu => Some(Constraint::PreferThursday),
        Weekday::Fri => Some(Constraint::PreferFriday),
        // samedi et dimanche sont toujours de classe week-end
        Weekday::Sat | Weekday::Sun => None,
    }
}

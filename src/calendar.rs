use crate::scheduler::PlanError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Classe d'un jour du calendrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    Weekday,
    Weekend,
    Holiday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    pub kind: DayKind,
}

impl Day {
    pub fn new(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> Self {
        Self {
            date,
            kind: classify(date, holidays),
        }
    }

    /// Les fériés se planifient comme un week-end.
    pub fn is_weekend_class(&self) -> bool {
        matches!(self.kind, DayKind::Weekend | DayKind::Holiday)
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Poids dans la charge mensuelle : un jour de week-end vaut deux jours de semaine.
    pub fn load_weight(&self) -> i64 {
        if self.is_weekend_class() {
            2
        } else {
            1
        }
    }
}

pub fn classify(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> DayKind {
    if holidays.contains(&date) {
        DayKind::Holiday
    } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        DayKind::Weekend
    } else {
        DayKind::Weekday
    }
}

/// Tous les jours du mois, dans l'ordre.
pub fn month_days(
    year: i32,
    month: u32,
    holidays: &BTreeSet<NaiveDate>,
) -> Result<Vec<Day>, PlanError> {
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(PlanError::InvalidMonth { year, month })?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|d| Day::new(d, holidays))
        .collect())
}

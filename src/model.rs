use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Priorité de départ d'une nouvelle personne (et base neutre de la réserve).
pub const DEFAULT_PRIORITY: i32 = 10;

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

/// Contraintes et préférences attachées à une personne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Dispensé de journée complète : seulement la demi-journée du matin le week-end.
    HalfDayExempt,
    PreferWeekend,
    PreferWeekday,
    /// Volontaire pour les journées complètes de week-end.
    PreferFullWeekend,
    PreferMonday,
    PreferTuesday,
    PreferWednesday,
    PreferThursday,
    PreferFriday,
    PreferSaturday,
    PreferSunday,
}

impl Constraint {
    pub const ALL: [Constraint; 11] = [
        Constraint::HalfDayExempt,
        Constraint::PreferWeekend,
        Constraint::PreferWeekday,
        Constraint::PreferFullWeekend,
        Constraint::PreferMonday,
        Constraint::PreferTuesday,
        Constraint::PreferWednesday,
        Constraint::PreferThursday,
        Constraint::PreferFriday,
        Constraint::PreferSaturday,
        Constraint::PreferSunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Constraint::HalfDayExempt => "half_day_exempt",
            Constraint::PreferWeekend => "prefer_weekend",
            Constraint::PreferWeekday => "prefer_weekday",
            Constraint::PreferFullWeekend => "prefer_full_weekend",
            Constraint::PreferMonday => "prefer_monday",
            Constraint::PreferTuesday => "prefer_tuesday",
            Constraint::PreferWednesday => "prefer_wednesday",
            Constraint::PreferThursday => "prefer_thursday",
            Constraint::PreferFriday => "prefer_friday",
            Constraint::PreferSaturday => "prefer_saturday",
            Constraint::PreferSunday => "prefer_sunday",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown constraint: {0}")]
pub struct ParseConstraintError(pub String);

impl FromStr for Constraint {
    type Err = ParseConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Constraint::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| ParseConstraintError(s.trim().to_string()))
    }
}

/// Personne de la liste de permanence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub constraints: BTreeSet<Constraint>,
    #[serde(default)]
    pub unavailable_dates: BTreeSet<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_dates: Vec<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_reserve: Vec<NaiveDate>,
    #[serde(default = "default_priority")]
    pub persistent_priority: i32,
}

impl Person {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            constraints: BTreeSet::new(),
            unavailable_dates: BTreeSet::new(),
            assigned_dates: Vec::new(),
            assigned_reserve: Vec::new(),
            persistent_priority: DEFAULT_PRIORITY,
        }
    }

    pub fn with_constraints<I: IntoIterator<Item = Constraint>>(mut self, constraints: I) -> Self {
        self.constraints.extend(constraints);
        self
    }

    pub fn with_unavailable<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.unavailable_dates.extend(dates);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.persistent_priority = priority;
        self
    }

    pub fn is_exempt(&self) -> bool {
        self.constraints.contains(&Constraint::HalfDayExempt)
    }

    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.unavailable_dates.contains(&date)
    }

    /// Passage au mois suivant : seules les priorités persistantes survivent.
    pub fn change_month(&mut self) {
        self.unavailable_dates.clear();
        self.assigned_dates.clear();
        self.assigned_reserve.clear();
    }
}

/// Demi-journée ou journée entière.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Single,
    Am,
    Pm,
}

/// Une permanence attribuée (ou une réserve, selon la liste qui la porte).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub person: String,
    pub date: NaiveDate,
    pub slot: Slot,
}

impl Assignment {
    pub fn new<N: Into<String>>(person: N, date: NaiveDate, slot: Slot) -> Self {
        Self {
            person: person.into(),
            date,
            slot,
        }
    }

    /// Nom affiché, suffixé de ` (AM)` pour la demi-journée du matin.
    pub fn display_name(&self) -> String {
        match self.slot {
            Slot::Am => format!("{} (AM)", self.person),
            Slot::Single | Slot::Pm => self.person.clone(),
        }
    }
}

/// Liste des personnes, triée par nom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Roster {
    pub people: Vec<Person>,
}

impl Roster {
    pub fn new(mut people: Vec<Person>) -> Self {
        people.sort_by(|a, b| a.name.cmp(&b.name));
        Self { people }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn find_person<'a>(&'a self, name: &str) -> Option<&'a Person> {
        self.people.iter().find(|p| p.name == name)
    }

    pub fn find_person_mut(&mut self, name: &str) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| p.name == name)
    }

    /// Premier nom en double, s'il y en a un.
    pub fn duplicate_name(&self) -> Option<&str> {
        let mut seen = BTreeSet::new();
        self.people
            .iter()
            .map(|p| p.name.as_str())
            .find(|name| !seen.insert(*name))
    }
}

/// État complet persisté entre deux invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerState {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub roster: Roster,
    #[serde(default)]
    pub holidays: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub primary: Vec<Assignment>,
    #[serde(default)]
    pub reserve: Vec<Assignment>,
}

impl Default for PlannerState {
    fn default() -> Self {
        let today = Utc::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
            roster: Roster::default(),
            holidays: BTreeSet::new(),
            primary: Vec::new(),
            reserve: Vec::new(),
        }
    }
}

impl PlannerState {
    /// Écarte les jours fériés qui n'appartiennent pas à l'année sélectionnée.
    pub fn retain_current_holidays(&mut self) {
        let year = self.year;
        self.holidays.retain(|d| d.year() == year);
    }
}

mod boost;
mod conflicts;
mod eligibility;
mod engine;
mod ledger;
mod mutate;
mod ties;
mod types;

pub use boost::boost_for;
pub use conflicts::detect_violations;
pub use ledger::rebalance_amount;
pub use types::{
    PlanError, PlanMode, PlanOptions, PlanOutcome, Violation, ViolationKind, ASSIGN_COST,
};

use crate::calendar::{self, Day};
use crate::model::{Assignment, Constraint, Person, PlannerState, Roster};
use chrono::NaiveDate;
use tracing::info;

/// Passe de planification pure : `(roster, jours, mode, options) -> (roster, affectations)`.
///
/// Le roster d'entrée n'est pas modifié. Une violation d'invariant dans ce que
/// la passe a produit est une erreur fatale, jamais un simple créneau vide ;
/// en mode réserve, les dates principales reçues ne sont pas revérifiées.
pub fn plan(
    roster: &Roster,
    days: &[Day],
    mode: PlanMode,
    opts: PlanOptions,
) -> Result<PlanOutcome, PlanError> {
    let outcome = engine::run(roster, days, mode, opts);

    let violations = match mode {
        PlanMode::Primary => {
            conflicts::primary_violations(&outcome.roster, days, &outcome.assignments)
        }
        PlanMode::Reserve => conflicts::reserve_violations(&outcome.roster, &outcome.assignments),
    };
    if let Some(first) = violations.first() {
        return Err(PlanError::InvariantViolation(format!(
            "{} violation(s), first: {:?} for {} on {}",
            violations.len(),
            first.kind,
            first.person,
            first.date
        )));
    }
    Ok(outcome)
}

/// Scheduler : encapsule l'état de planification du mois sélectionné
#[derive(Debug, Default)]
pub struct Scheduler {
    state: PlannerState,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            state: PlannerState::default(),
        }
    }

    pub fn from_state(mut state: PlannerState) -> Self {
        state.retain_current_holidays();
        state.roster.people.sort_by(|a, b| a.name.cmp(&b.name));
        Self { state }
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }
    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.state.roster
    }

    pub fn add_person(&mut self, person: Person) -> Result<(), PlanError> {
        mutate::add_person(self, person)
    }

    pub fn remove_person(&mut self, name: &str) -> Result<Person, PlanError> {
        mutate::remove_person(self, name)
    }

    pub fn set_constraints(
        &mut self,
        name: &str,
        constraints: &[Constraint],
    ) -> Result<(), PlanError> {
        mutate::set_constraints(self, name, constraints)
    }

    pub fn mark_unavailable(&mut self, name: &str, dates: &[NaiveDate]) -> Result<(), PlanError> {
        mutate::mark_unavailable(self, name, dates)
    }

    /// Remplace la liste complète (import de configuration).
    pub fn replace_roster(&mut self, roster: Roster) -> Result<(), PlanError> {
        mutate::replace_roster(self, roster)
    }

    pub fn set_holidays<I: IntoIterator<Item = NaiveDate>>(&mut self, holidays: I) {
        self.state.holidays = holidays.into_iter().collect();
        self.state.retain_current_holidays();
    }

    /// Jours du mois sélectionné.
    pub fn days(&self) -> Result<Vec<Day>, PlanError> {
        calendar::month_days(self.state.year, self.state.month, &self.state.holidays)
    }

    /// Planifie les permanences principales ; la réserve précédente est obsolète.
    pub fn plan_month(&mut self, opts: PlanOptions) -> Result<&[Assignment], PlanError> {
        let days = self.days()?;
        let outcome = plan(&self.state.roster, &days, PlanMode::Primary, opts)?;
        self.state.roster = outcome.roster;
        self.state.primary = outcome.assignments;
        self.state.reserve.clear();
        Ok(&self.state.primary)
    }

    /// Planifie la réserve à partir des permanences principales en place.
    pub fn plan_reserve(&mut self, opts: PlanOptions) -> Result<&[Assignment], PlanError> {
        let days = self.days()?;
        let outcome = plan(&self.state.roster, &days, PlanMode::Reserve, opts)?;
        // les priorités de travail de la réserve sont jetées ; seules les dates restent
        for (person, planned) in self
            .state
            .roster
            .people
            .iter_mut()
            .zip(outcome.roster.people)
        {
            person.assigned_reserve = planned.assigned_reserve;
        }
        self.state.reserve = outcome.assignments;
        Ok(&self.state.reserve)
    }

    pub fn change_month(&mut self, year: i32, month: u32) -> Result<(), PlanError> {
        calendar::month_days(year, month, &self.state.holidays)?;
        self.state.year = year;
        self.state.month = month;
        for person in self.state.roster.people.iter_mut() {
            person.change_month();
        }
        self.state.primary.clear();
        self.state.reserve.clear();
        self.state.retain_current_holidays();
        info!(year, month, people = self.state.roster.len(), "month changed");
        Ok(())
    }

    pub fn detect_violations(&self) -> Result<Vec<Violation>, PlanError> {
        let days = self.days()?;
        Ok(detect_violations(
            &self.state.roster,
            &days,
            &self.state.primary,
            &self.state.reserve,
        ))
    }
}

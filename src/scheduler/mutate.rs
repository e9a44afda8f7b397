use super::{PlanError, Scheduler};
use crate::model::{Constraint, Person, Roster};
use chrono::NaiveDate;

pub(super) fn add_person(scheduler: &mut Scheduler, mut person: Person) -> Result<(), PlanError> {
    person.name = person.name.trim().to_string();
    if person.name.is_empty() {
        return Err(PlanError::EmptyName);
    }
    let roster = &mut scheduler.state.roster;
    if roster.find_person(&person.name).is_some() {
        return Err(PlanError::DuplicatePerson(person.name));
    }
    let pos = roster
        .people
        .partition_point(|p| p.name.as_str() < person.name.as_str());
    roster.people.insert(pos, person);
    Ok(())
}

pub(super) fn remove_person(scheduler: &mut Scheduler, name: &str) -> Result<Person, PlanError> {
    let roster = &mut scheduler.state.roster;
    let Some(pos) = roster.people.iter().position(|p| p.name == name) else {
        return Err(PlanError::UnknownPerson(name.to_string()));
    };
    Ok(roster.people.remove(pos))
}

pub(super) fn set_constraints(
    scheduler: &mut Scheduler,
    name: &str,
    constraints: &[Constraint],
) -> Result<(), PlanError> {
    let person = find_mut(scheduler, name)?;
    person.constraints = constraints.iter().copied().collect();
    Ok(())
}

pub(super) fn mark_unavailable(
    scheduler: &mut Scheduler,
    name: &str,
    dates: &[NaiveDate],
) -> Result<(), PlanError> {
    let person = find_mut(scheduler, name)?;
    person.unavailable_dates.extend(dates.iter().copied());
    Ok(())
}

pub(super) fn replace_roster(scheduler: &mut Scheduler, roster: Roster) -> Result<(), PlanError> {
    if let Some(name) = roster.duplicate_name() {
        return Err(PlanError::DuplicatePerson(name.to_string()));
    }
    if roster.people.iter().any(|p| p.name.trim().is_empty()) {
        return Err(PlanError::EmptyName);
    }
    scheduler.state.roster = Roster::new(roster.people);
    Ok(())
}

fn find_mut<'a>(scheduler: &'a mut Scheduler, name: &str) -> Result<&'a mut Person, PlanError> {
    scheduler
        .state
        .roster
        .find_person_mut(name)
        .ok_or_else(|| PlanError::UnknownPerson(name.to_string()))
}

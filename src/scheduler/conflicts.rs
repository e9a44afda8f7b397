use super::{Violation, ViolationKind};
use crate::calendar::Day;
use crate::model::{Assignment, Person, Roster, Slot};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Vérifie les invariants de planification sur un état donné.
pub fn detect_violations(
    roster: &Roster,
    days: &[Day],
    primary: &[Assignment],
    reserve: &[Assignment],
) -> Vec<Violation> {
    let mut out = primary_violations(roster, days, primary);
    out.extend(reserve_violations(roster, reserve));
    out
}

/// Permanences principales seules : écart, disponibilité, exemption, créneaux.
pub(super) fn primary_violations(
    roster: &Roster,
    days: &[Day],
    primary: &[Assignment],
) -> Vec<Violation> {
    let mut out = Vec::new();
    for person in roster.people.iter() {
        sequence_violations(person, &person.assigned_dates, &mut out);
    }

    let kinds: BTreeMap<NaiveDate, bool> =
        days.iter().map(|d| (d.date, d.is_weekend_class())).collect();
    let no_holidays = BTreeSet::new();
    let weekend_class = |date: NaiveDate| {
        kinds.get(&date).copied().unwrap_or_else(|| {
            Day::new(date, &no_holidays).is_weekend_class()
        })
    };

    for (date, group) in group_by_date(primary) {
        let weekend = weekend_class(date);
        for a in &group {
            if is_exempt(roster, &a.person) && a.slot != Slot::Am {
                out.push(violation(&a.person, date, ViolationKind::ExemptionBreached));
            }
        }

        let count = |slot: Slot| group.iter().filter(|a| a.slot == slot).count();
        let (single, am, pm) = (count(Slot::Single), count(Slot::Am), count(Slot::Pm));
        let overflow = if weekend {
            single > 1 || am > 1 || pm > 1 || (single == 1 && am + pm > 0) || (pm == 1 && am == 0)
        } else {
            group.len() > 1 || am + pm > 0
        };
        if overflow {
            for a in &group {
                out.push(violation(&a.person, date, ViolationKind::SlotOverflow));
            }
        }
    }
    out
}

/// Réserve seule : les dates principales ne servent qu'à détecter les collisions.
pub(super) fn reserve_violations(roster: &Roster, reserve: &[Assignment]) -> Vec<Violation> {
    let mut out = Vec::new();
    for person in roster.people.iter() {
        sequence_violations(person, &person.assigned_reserve, &mut out);
        for date in person
            .assigned_reserve
            .iter()
            .filter(|d| person.assigned_dates.contains(*d))
        {
            out.push(violation(&person.name, *date, ViolationKind::ReserveCollision));
        }
    }

    for (date, group) in group_by_date(reserve) {
        for a in group.iter().filter(|a| is_exempt(roster, &a.person)) {
            out.push(violation(&a.person, date, ViolationKind::ExemptionBreached));
        }
        if group.len() > 1 {
            for a in &group {
                out.push(violation(&a.person, date, ViolationKind::SlotOverflow));
            }
        }
    }
    out
}

fn sequence_violations(person: &Person, list: &[NaiveDate], out: &mut Vec<Violation>) {
    let mut dates = list.to_vec();
    dates.sort();
    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() < 2 {
            out.push(violation(&person.name, pair[1], ViolationKind::GapRule));
        }
    }
    for date in list.iter().filter(|d| !person.is_available(**d)) {
        out.push(violation(&person.name, *date, ViolationKind::Unavailable));
    }
}

fn is_exempt(roster: &Roster, name: &str) -> bool {
    roster.find_person(name).is_some_and(|p| p.is_exempt())
}

fn group_by_date(list: &[Assignment]) -> BTreeMap<NaiveDate, Vec<&Assignment>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&Assignment>> = BTreeMap::new();
    for a in list {
        groups.entry(a.date).or_default().push(a);
    }
    groups
}

fn violation(person: &str, date: NaiveDate, kind: ViolationKind) -> Violation {
    Violation {
        person: person.to_string(),
        date,
        kind,
    }
}

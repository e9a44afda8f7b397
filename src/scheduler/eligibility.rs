use crate::model::Person;
use chrono::NaiveDate;

/// Règle d'écart : aucune date de la liste à un jour ou moins de `date`.
pub(super) fn clear_of(dates: &[NaiveDate], date: NaiveDate) -> bool {
    dates
        .iter()
        .all(|d| (date - *d).num_days().abs() > 1)
}

pub(super) fn primary_ok(person: &Person, date: NaiveDate, allow_exempt: bool) -> bool {
    (allow_exempt || !person.is_exempt())
        && person.is_available(date)
        && clear_of(&person.assigned_dates, date)
}

pub(super) fn reserve_ok(person: &Person, date: NaiveDate) -> bool {
    !person.is_exempt()
        && person.is_available(date)
        && !person.assigned_dates.contains(&date)
        && clear_of(&person.assigned_reserve, date)
}

/// Premier candidat du classement qui satisfait `ok`.
pub(super) fn first_eligible<F>(order: &[usize], people: &[Person], ok: F) -> Option<usize>
where
    F: Fn(&Person) -> bool,
{
    order.iter().copied().find(|&idx| ok(&people[idx]))
}

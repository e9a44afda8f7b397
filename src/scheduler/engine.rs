use super::eligibility::{first_eligible, primary_ok, reserve_ok};
use super::ledger::{rebalance_amount, Ledger};
use super::ties::TieBreaker;
use super::{PlanMode, PlanOptions, PlanOutcome};
use crate::calendar::Day;
use crate::model::{Assignment, Person, Roster, Slot};
use tracing::{debug, info};

pub(super) fn run(roster: &Roster, days: &[Day], mode: PlanMode, opts: PlanOptions) -> PlanOutcome {
    let mut people = roster.people.clone();
    for person in people.iter_mut() {
        match mode {
            // la réserve dépend du planning principal : elle est refaite après lui
            PlanMode::Primary => {
                person.assigned_dates.clear();
                person.assigned_reserve.clear();
            }
            PlanMode::Reserve => person.assigned_reserve.clear(),
        }
    }

    let mut ledger = Ledger::open(&people, mode, opts);
    let mut ties = TieBreaker::new(opts.seed);
    let mut out = Vec::new();

    for day in days {
        ledger.apply_boosts(&people, day);
        let order = ledger.ranking(&mut ties);

        match mode {
            PlanMode::Reserve => plan_reserve_day(&mut people, &mut ledger, &order, day, opts, &mut out),
            PlanMode::Primary if day.is_weekend_class() => {
                plan_weekend_day(&mut people, &mut ledger, &order, day, opts, &mut out)
            }
            PlanMode::Primary => plan_weekday(&mut people, &mut ledger, &order, day, opts, &mut out),
        }

        ledger.end_of_day();
    }

    if mode == PlanMode::Primary && !people.is_empty() {
        let absorbing = people.iter().filter(|p| !p.is_exempt()).count();
        let amount = rebalance_amount(days, absorbing, opts.assign_cost);
        ledger.rebalance(&people, amount);
        if opts.persist {
            for (person, priority) in people.iter_mut().zip(ledger.priorities()) {
                person.persistent_priority = priority;
            }
        }
    }

    out.sort_by_key(|a| (a.date, a.slot));
    info!(
        mode = ?mode,
        days = days.len(),
        assignments = out.len(),
        "planning run finished"
    );

    PlanOutcome {
        roster: Roster { people },
        assignments: out,
    }
}

fn plan_weekday(
    people: &mut [Person],
    ledger: &mut Ledger,
    order: &[usize],
    day: &Day,
    opts: PlanOptions,
    out: &mut Vec<Assignment>,
) {
    match first_eligible(order, people, |p| primary_ok(p, day.date, false)) {
        Some(idx) => {
            assign(people, ledger, idx, day, Slot::Single, opts.assign_cost, out);
        }
        None => debug!(date = %day.date, "no eligible candidate"),
    }
}

fn plan_weekend_day(
    people: &mut [Person],
    ledger: &mut Ledger,
    order: &[usize],
    day: &Day,
    opts: PlanOptions,
    out: &mut Vec<Assignment>,
) {
    let Some(idx) = first_eligible(order, people, |p| primary_ok(p, day.date, true)) else {
        debug!(date = %day.date, "no eligible candidate");
        return;
    };

    if !people[idx].is_exempt() {
        // une journée complète de week-end vaut deux permanences de semaine
        assign(people, ledger, idx, day, Slot::Single, opts.assign_cost * 2, out);
        return;
    }

    assign(people, ledger, idx, day, Slot::Am, 0, out);
    match first_eligible(order, people, |p| primary_ok(p, day.date, false)) {
        Some(pm) => assign(people, ledger, pm, day, Slot::Pm, opts.assign_cost, out),
        None => debug!(date = %day.date, "afternoon slot left unfilled"),
    }
}

fn plan_reserve_day(
    people: &mut [Person],
    ledger: &mut Ledger,
    order: &[usize],
    day: &Day,
    opts: PlanOptions,
    out: &mut Vec<Assignment>,
) {
    match first_eligible(order, people, |p| reserve_ok(p, day.date)) {
        Some(idx) => {
            people[idx].assigned_reserve.push(day.date);
            ledger.charge(idx, opts.assign_cost);
            debug!(date = %day.date, person = %people[idx].name, "reserve assigned");
            out.push(Assignment::new(people[idx].name.clone(), day.date, Slot::Single));
        }
        None => debug!(date = %day.date, "no eligible reserve candidate"),
    }
}

fn assign(
    people: &mut [Person],
    ledger: &mut Ledger,
    idx: usize,
    day: &Day,
    slot: Slot,
    cost: i32,
    out: &mut Vec<Assignment>,
) {
    let person = &mut people[idx];
    person.assigned_dates.push(day.date);
    ledger.charge(idx, cost);
    debug!(date = %day.date, person = %person.name, slot = ?slot, cost, "duty assigned");
    out.push(Assignment::new(person.name.clone(), day.date, slot));
}

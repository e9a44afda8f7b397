use super::{boost, ties::TieBreaker, PlanMode, PlanOptions};
use crate::calendar::Day;
use crate::model::Person;

/// État de travail d'une personne pendant une passe, jamais persisté tel quel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct WorkingRecord {
    priority: i32,
    touched: bool,
}

/// Priorités de travail, alignées sur l'ordre du roster.
#[derive(Debug, Clone)]
pub(super) struct Ledger {
    records: Vec<WorkingRecord>,
}

impl Ledger {
    pub(super) fn open(people: &[Person], mode: PlanMode, opts: PlanOptions) -> Self {
        let records = people
            .iter()
            .map(|p| WorkingRecord {
                priority: match mode {
                    PlanMode::Primary => p.persistent_priority,
                    PlanMode::Reserve => opts.neutral_priority,
                },
                touched: false,
            })
            .collect();
        Self { records }
    }

    pub(super) fn apply_boosts(&mut self, people: &[Person], day: &Day) {
        for (record, person) in self.records.iter_mut().zip(people) {
            let boost = boost::boost_for(&person.constraints, day);
            if boost > 0 {
                record.priority += boost;
                record.touched = true;
            }
        }
    }

    /// Indices du roster, du plus prioritaire au moins prioritaire.
    pub(super) fn ranking(&self, ties: &mut TieBreaker) -> Vec<usize> {
        let mut keyed: Vec<(usize, i32, u64)> = self
            .records
            .iter()
            .enumerate()
            .map(|(idx, r)| (idx, r.priority, ties.next_key()))
            .collect();
        keyed.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        keyed.into_iter().map(|(idx, _, _)| idx).collect()
    }

    pub(super) fn charge(&mut self, idx: usize, cost: i32) {
        self.records[idx].priority -= cost;
    }

    /// Fin de journée : les bonus non consommés s'effacent d'un point.
    pub(super) fn end_of_day(&mut self) {
        for record in self.records.iter_mut().filter(|r| r.touched) {
            record.priority -= 1;
            record.touched = false;
        }
    }

    /// Les personnes exemptées ne prennent jamais de journée pleine : la charge
    /// du mois est répartie sur les autres.
    pub(super) fn rebalance(&mut self, people: &[Person], amount: i32) {
        for (record, _) in self
            .records
            .iter_mut()
            .zip(people)
            .filter(|(_, person)| !person.is_exempt())
        {
            record.priority += amount;
        }
    }

    pub(super) fn priorities(&self) -> impl Iterator<Item = i32> + '_ {
        self.records.iter().map(|r| r.priority)
    }
}

/// Charge moyenne du mois (week-end = 2, semaine = 1) multipliée par le coût,
/// arrondie à l'entier le plus proche.
pub fn rebalance_amount(days: &[Day], roster_size: usize, cost: i32) -> i32 {
    if roster_size == 0 {
        return 0;
    }
    let load: i64 = days.iter().map(Day::load_weight).sum();
    let n = roster_size as i64;
    let total = load * i64::from(cost);
    ((2 * total + n).div_euclid(2 * n)) as i32
}

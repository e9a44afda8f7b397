use crate::model::{Assignment, Roster, DEFAULT_PRIORITY};
use chrono::NaiveDate;
use thiserror::Error;

/// Coût standard d'une permanence en semaine.
pub const ASSIGN_COST: i32 = 10;

/// Options de planification
#[derive(Debug, Clone, Copy)]
pub struct PlanOptions {
    /// Graine du départage des ex æquo ; `None` tire une graine aléatoire.
    pub seed: Option<u64>,
    /// `false` pour une simulation qui n'écrit pas les priorités persistantes.
    pub persist: bool,
    pub assign_cost: i32,
    /// Priorité de départ de chacun en mode réserve.
    pub neutral_priority: i32,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            seed: None,
            persist: true,
            assign_cost: ASSIGN_COST,
            neutral_priority: DEFAULT_PRIORITY,
        }
    }
}

impl PlanOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    Primary,
    Reserve,
}

/// Résultat d'une passe : nouveau roster + liste à plat triée par date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOutcome {
    pub roster: Roster,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// deux dates à moins de deux jours d'écart dans la même liste
    GapRule,
    Unavailable,
    /// dispensé placé en journée complète, l'après-midi ou en semaine
    ExemptionBreached,
    /// trop de personnes sur un même jour
    SlotOverflow,
    /// réserve le jour même d'une permanence principale
    ReserveCollision,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub person: String,
    pub date: NaiveDate,
    pub kind: ViolationKind,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("person already in roster: {0}")]
    DuplicatePerson(String),
    #[error("unknown person: {0}")]
    UnknownPerson(String),
    #[error("person name cannot be empty")]
    EmptyName,
    #[error("planner invariant violated: {0}")]
    InvariantViolation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

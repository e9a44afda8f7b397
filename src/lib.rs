#![forbid(unsafe_code)]
//! Dutyplan — planification mensuelle de permanences, équitable d'un mois sur l'autre.
//!
//! - Affectation gloutonne jour par jour, classée par priorité.
//! - Priorités persistantes reportées de mois en mois (équité).
//! - Préférences de jours, dispense de journée complète, indisponibilités.
//! - Réserve planifiée dans une seconde passe, sans collision.
//! - Stockage fichiers (JSON/CSV/ICS) en dehors du cœur pur.

pub mod calendar;
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use calendar::{month_days, Day, DayKind};
pub use model::{Assignment, Constraint, Person, PlannerState, Roster, Slot, DEFAULT_PRIORITY};
pub use report::{duty_rows, DutyRow, RowRenderer, TextRow};
pub use scheduler::{
    plan, PlanError, PlanMode, PlanOptions, PlanOutcome, Scheduler, Violation, ViolationKind,
};
pub use storage::{JsonStorage, Storage};

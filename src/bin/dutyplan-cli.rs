#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::NaiveDate;
use dutyplan::{
    io,
    model::{Constraint, Person},
    report::{duty_rows, RowRenderer, TextRow},
    scheduler::{PlanOptions, Scheduler, ViolationKind},
    storage::{JsonStorage, Storage},
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification de permanences (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON d'état (roster, fériés, planning)
    #[arg(long, global = true, default_value = "dutyplan.json")]
    state: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter une personne
    AddPerson {
        #[arg(long)]
        name: String,
        /// liste "prefer_weekend,half_day_exempt,..."
        #[arg(long, value_delimiter = ',')]
        constraints: Vec<Constraint>,
    },

    /// Retirer une personne
    RemovePerson {
        #[arg(long)]
        name: String,
    },

    /// Remplacer les contraintes d'une personne
    SetConstraints {
        #[arg(long)]
        name: String,
        #[arg(long, value_delimiter = ',')]
        constraints: Vec<Constraint>,
    },

    /// Déclarer des indisponibilités (YYYY-MM-DD)
    Unavailable {
        #[arg(long)]
        name: String,
        #[arg(long, value_delimiter = ',', required = true)]
        dates: Vec<NaiveDate>,
    },

    /// Importer des personnes depuis un CSV
    ImportPeople {
        #[arg(long)]
        csv: String,
    },

    /// Changer de mois (efface indisponibilités et planning)
    Month {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: u32,
    },

    /// Définir les jours fériés (fichier ICS ou liste)
    Holidays {
        #[arg(long, conflicts_with = "dates")]
        ics: Option<String>,
        #[arg(long, value_delimiter = ',')]
        dates: Vec<NaiveDate>,
    },

    /// Planifier le mois sélectionné
    Plan {
        #[arg(long)]
        seed: Option<u64>,
        /// Enchaîner avec la réserve
        #[arg(long)]
        reserve: bool,
        /// Ne pas enregistrer les nouvelles priorités
        #[arg(long)]
        dry_run: bool,
    },

    /// Planifier uniquement la réserve
    PlanReserve {
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Afficher le planning
    List,

    /// Exporter le planning en CSV
    Export {
        #[arg(long)]
        csv: String,
        /// Ajouter la colonne Reserve
        #[arg(long)]
        reserve: bool,
    },

    /// Sauvegarder la liste des personnes (JSON)
    ExportConfig {
        #[arg(long)]
        out: String,
    },

    /// Restaurer la liste des personnes (JSON)
    ImportConfig {
        #[arg(long)]
        json: String,
    },

    /// Vérifier les invariants du planning courant
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.state)?;
    let mut scheduler = Scheduler::from_state(storage.load_or_default());

    let code = match cli.cmd {
        Commands::AddPerson { name, constraints } => {
            scheduler.add_person(Person::new(name).with_constraints(constraints))?;
            storage.save(scheduler.state())?;
            0
        }
        Commands::RemovePerson { name } => {
            scheduler.remove_person(&name)?;
            storage.save(scheduler.state())?;
            0
        }
        Commands::SetConstraints { name, constraints } => {
            scheduler.set_constraints(&name, &constraints)?;
            storage.save(scheduler.state())?;
            0
        }
        Commands::Unavailable { name, dates } => {
            scheduler.mark_unavailable(&name, &dates)?;
            storage.save(scheduler.state())?;
            0
        }
        Commands::ImportPeople { csv } => {
            let people = io::import_people_csv(csv)?;
            for person in people {
                scheduler.add_person(person)?;
            }
            storage.save(scheduler.state())?;
            0
        }
        Commands::Month { year, month } => {
            let year = year.unwrap_or(scheduler.state().year);
            scheduler.change_month(year, month)?;
            storage.save(scheduler.state())?;
            0
        }
        Commands::Holidays { ics, dates } => {
            let holidays = match ics {
                Some(path) => io::import_holidays_ics(path)?,
                None => dates.into_iter().collect(),
            };
            scheduler.set_holidays(holidays);
            storage.save(scheduler.state())?;
            println!("{} holiday(s) kept", scheduler.state().holidays.len());
            0
        }
        Commands::Plan {
            seed,
            reserve,
            dry_run,
        } => {
            if scheduler.roster().is_empty() {
                bail!("aucune personne dans la liste");
            }
            let opts = PlanOptions {
                seed,
                persist: !dry_run,
                ..PlanOptions::default()
            };
            let planned = scheduler.plan_month(opts)?.len();
            let reserved = if reserve {
                scheduler.plan_reserve(opts)?.len()
            } else {
                0
            };
            storage.save(scheduler.state())?;
            println!("{planned} duty assignment(s), {reserved} reserve(s)");
            0
        }
        Commands::PlanReserve { seed } => {
            if scheduler.state().primary.is_empty() {
                bail!("planifier les permanences principales d'abord");
            }
            let opts = PlanOptions {
                seed,
                ..PlanOptions::default()
            };
            let reserved = scheduler.plan_reserve(opts)?.len();
            storage.save(scheduler.state())?;
            println!("{reserved} reserve(s)");
            0
        }
        Commands::List => {
            let state = scheduler.state();
            let renderer = TextRow;
            for row in duty_rows(&state.primary, &state.reserve) {
                println!("{}", renderer.render(&row));
            }
            for p in &state.roster.people {
                println!(
                    "# {} | priority {} | {} duty(ies) | {} reserve(s)",
                    p.name,
                    p.persistent_priority,
                    p.assigned_dates.len(),
                    p.assigned_reserve.len()
                );
            }
            0
        }
        Commands::Export { csv, reserve } => {
            let state = scheduler.state();
            let rows = duty_rows(&state.primary, &state.reserve);
            io::export_duties_csv(csv, &rows, reserve)?;
            0
        }
        Commands::ExportConfig { out } => {
            io::export_roster_json(out, scheduler.roster())?;
            0
        }
        Commands::ImportConfig { json } => {
            let roster = io::import_roster_json(json)?;
            scheduler.replace_roster(roster)?;
            storage.save(scheduler.state())?;
            0
        }
        Commands::Check => {
            let violations = scheduler.detect_violations()?;
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                for v in &violations {
                    eprintln!(
                        "{} | {} | {}",
                        v.date,
                        v.person,
                        match v.kind {
                            ViolationKind::GapRule => "gap",
                            ViolationKind::Unavailable => "unavailable",
                            ViolationKind::ExemptionBreached => "exemption",
                            ViolationKind::SlotOverflow => "overflow",
                            ViolationKind::ReserveCollision => "reserve",
                        }
                    );
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}

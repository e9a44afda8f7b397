use crate::model::{Assignment, Slot};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Une ligne du planning : un jour planifié.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyRow {
    pub date: NaiveDate,
    /// Journée complète, ou demi-journée du matin.
    pub main: Option<String>,
    /// Relève de l'après-midi quand la journée est partagée.
    pub cover: Option<String>,
    pub reserve: Option<String>,
}

impl DutyRow {
    /// Cellule « Main » : `Alice` ou `Alice (AM) / Bob`.
    pub fn main_cell(&self) -> String {
        match (&self.main, &self.cover) {
            (Some(main), Some(cover)) => format!("{main} / {cover}"),
            (Some(main), None) => main.clone(),
            (None, Some(cover)) => cover.clone(),
            (None, None) => String::new(),
        }
    }

    pub fn weekday_name(&self) -> String {
        self.date.format("%a").to_string()
    }
}

/// Regroupe les listes principale et de réserve par date.
pub fn duty_rows(primary: &[Assignment], reserve: &[Assignment]) -> Vec<DutyRow> {
    let mut rows: BTreeMap<NaiveDate, DutyRow> = BTreeMap::new();
    for a in primary {
        let row = rows.entry(a.date).or_insert_with(|| empty_row(a.date));
        match a.slot {
            Slot::Single | Slot::Am => row.main = Some(a.display_name()),
            Slot::Pm => row.cover = Some(a.display_name()),
        }
    }
    for a in reserve {
        let row = rows.entry(a.date).or_insert_with(|| empty_row(a.date));
        row.reserve = Some(a.display_name());
    }
    rows.into_values().collect()
}

fn empty_row(date: NaiveDate) -> DutyRow {
    DutyRow {
        date,
        main: None,
        cover: None,
        reserve: None,
    }
}

/// Rendu d'une ligne pour l'affichage (terminal, message, etc.).
pub trait RowRenderer {
    fn render(&self, row: &DutyRow) -> String;
}

/// Rendu texte compact : `2026-02-02 Mon | Alice | reserve: Bob`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRow;

impl RowRenderer for TextRow {
    fn render(&self, row: &DutyRow) -> String {
        let main = row.main_cell();
        let main = if main.is_empty() { "-".to_string() } else { main };
        match &row.reserve {
            Some(reserve) => format!(
                "{} {} | {} | reserve: {}",
                row.date,
                row.weekday_name(),
                main,
                reserve
            ),
            None => format!("{} {} | {}", row.date, row.weekday_name(), main),
        }
    }
}

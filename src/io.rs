use crate::model::{Constraint, Person, Roster};
use crate::report::DutyRow;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Import de personnes depuis CSV: header `name,constraints[,unavailable_dates][,persistent_priority]`
///
/// Les cellules multi-valeurs sont séparées par `;`.
pub fn import_people_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Person>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid people row (empty name)");
        }
        let mut person = Person::new(name);
        if let Some(raw) = rec.get(1) {
            person.constraints = parse_constraints(raw)
                .with_context(|| format!("invalid constraints for {name}"))?;
        }
        if let Some(raw) = rec.get(2) {
            person.unavailable_dates = parse_dates(raw)
                .with_context(|| format!("invalid unavailable_dates for {name}"))?;
        }
        if let Some(raw) = rec.get(3) {
            let raw = raw.trim();
            if !raw.is_empty() {
                person.persistent_priority = raw
                    .parse()
                    .with_context(|| format!("invalid persistent_priority for {name}"))?;
            }
        }
        out.push(person);
    }
    Ok(out)
}

fn parse_constraints(raw: &str) -> anyhow::Result<BTreeSet<Constraint>> {
    raw.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| chunk.parse::<Constraint>().map_err(anyhow::Error::from))
        .collect()
}

fn parse_dates(raw: &str) -> anyhow::Result<BTreeSet<NaiveDate>> {
    raw.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            NaiveDate::parse_from_str(chunk.trim(), "%Y-%m-%d")
                .with_context(|| format!("invalid date: {}", chunk.trim()))
        })
        .collect()
}

/// Export CSV du planning: header `Date,Day,Main[,Reserve]`, une ligne par jour planifié.
pub fn write_duties_csv<W: Write>(
    writer: W,
    rows: &[DutyRow],
    with_reserve: bool,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    if with_reserve {
        w.write_record(["Date", "Day", "Main", "Reserve"])?;
    } else {
        w.write_record(["Date", "Day", "Main"])?;
    }
    for row in rows {
        let date = row.date.format("%d-%B").to_string();
        let day = row.weekday_name();
        let main = row.main_cell();
        if with_reserve {
            let reserve = row.reserve.as_deref().unwrap_or("");
            w.write_record([date.as_str(), day.as_str(), main.as_str(), reserve])?;
        } else {
            w.write_record([date.as_str(), day.as_str(), main.as_str()])?;
        }
    }
    w.flush()?;
    Ok(())
}

pub fn export_duties_csv<P: AsRef<Path>>(
    path: P,
    rows: &[DutyRow],
    with_reserve: bool,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_duties_csv(file, rows, with_reserve)
}

/// Sauvegarde de la liste complète (sauvegarde/restauration).
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let path = path.as_ref();
    let s = serde_json::to_string_pretty(roster).context("serializing roster")?;
    fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn import_roster_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Roster> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let roster: Roster = serde_json::from_slice(&data)
        .with_context(|| format!("parsing roster {}", path.display()))?;
    if let Some(name) = roster.duplicate_name() {
        bail!("duplicate person in roster: {name}");
    }
    Ok(Roster::new(roster.people))
}

/// Jours fériés depuis un fichier iCalendar : date de début de chaque événement.
pub fn import_holidays_ics<P: AsRef<Path>>(path: P) -> anyhow::Result<BTreeSet<NaiveDate>> {
    let path = path.as_ref();
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_ics_holidays(&raw)
}

/// Accepte `DTSTART;VALUE=DATE:20260101` comme `DTSTART:20260101T000000Z`.
pub fn parse_ics_holidays(raw: &str) -> anyhow::Result<BTreeSet<NaiveDate>> {
    let mut out = BTreeSet::new();
    for line in raw.lines().map(str::trim) {
        if !(line.starts_with("DTSTART;") || line.starts_with("DTSTART:")) {
            continue;
        }
        let value = line
            .rsplit_once(':')
            .map(|(_, v)| v.trim())
            .context("DTSTART without value")?;
        let stamp = value
            .get(..8)
            .with_context(|| format!("DTSTART value too short: {value}"))?;
        let date = NaiveDate::parse_from_str(stamp, "%Y%m%d")
            .with_context(|| format!("invalid DTSTART date: {value}"))?;
        out.insert(date);
    }
    Ok(out)
}

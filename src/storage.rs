use crate::model::PlannerState;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

pub trait Storage {
    /// Charge l'état de planification depuis un support.
    fn load(&self) -> anyhow::Result<PlannerState>;
    /// Sauvegarde de manière atomique.
    fn save(&self, state: &PlannerState) -> anyhow::Result<()>;

    /// Un état absent ou illisible est remplacé par un état vide.
    fn load_or_default(&self) -> PlannerState {
        match self.load() {
            Ok(state) => state,
            Err(err) => {
                let reason = format!("{err:#}");
                warn!(error = %reason, "starting from an empty planner state");
                PlannerState::default()
            }
        }
    }
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<PlannerState> {
        let data = fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let state: PlannerState = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(state)
    }

    fn save(&self, state: &PlannerState) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(state)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

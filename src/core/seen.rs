use crate::utils::error::Result;
use chrono::{Datelike, Utc};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const IDS_FILE: &str = "posted_ids.txt";
const MARKER_PREFIX: &str = "epoch_";

/// Human-readable weekly epoch label, e.g. "2026-W32".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochKey(String);

impl EpochKey {
    pub fn current() -> Self {
        let week = Utc::now().iso_week();
        Self::from_parts(week.year(), week.week())
    }

    pub fn from_parts(year: i32, week: u32) -> Self {
        Self(format!("{}-W{:02}", year, week))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiers already published in the current epoch, backed by a flat
/// newline-delimited file. The marker file records which epoch the id
/// file belongs to; a new epoch truncates the set so deals recirculate
/// weekly instead of the file growing forever.
pub struct SeenStore {
    ids_path: PathBuf,
    seen: HashSet<String>,
}

impl SeenStore {
    pub fn open(state_dir: &Path, epoch: &EpochKey) -> Result<Self> {
        fs::create_dir_all(state_dir)?;

        let marker = state_dir.join(format!("{}{}", MARKER_PREFIX, epoch.as_str()));
        let ids_path = state_dir.join(IDS_FILE);

        if !marker.exists() {
            // The only mutation path into a fresh epoch: clear the set,
            // drop stale markers, write the new one.
            for entry in fs::read_dir(state_dir)? {
                let entry = entry?;
                if entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(MARKER_PREFIX)
                {
                    fs::remove_file(entry.path())?;
                }
            }
            fs::write(&ids_path, "")?;
            fs::write(&marker, "")?;
            tracing::info!("New weekly epoch {}, seen set cleared", epoch.as_str());
        }

        let seen = match fs::read_to_string(&ids_path) {
            Ok(text) => text
                .lines()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { ids_path, seen })
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.seen.contains(identifier)
    }

    /// Appends one line; the file is never rewritten inside an epoch.
    pub fn record(&mut self, identifier: &str) -> Result<()> {
        if !self.seen.insert(identifier.to_string()) {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.ids_path)?;
        writeln!(file, "{}", identifier)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

//! Persistence of the last committed selection
//!
//! A single record, overwritten per successful capture, read back to offer a
//! "repeat last area" hint when the overlay next appears. Storage failures are
//! logged and treated as "no record"; they never fail a session.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::domain::{Rect, Screen};

/// The last committed selection and the screen it was taken from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LastSelection {
    pub rect: Rect,
    pub screen: Screen,
}

/// Simple synchronous key-value store for the last selection.
///
/// Last-write-wins; no other concurrency guarantees are required of
/// implementations.
pub trait SelectionMemory: Send + Sync {
    fn load(&self) -> Option<LastSelection>;
    fn save(&self, selection: LastSelection);
}

/// In-memory store for tests and hosts with their own persistence
#[derive(Default)]
pub struct InMemorySelectionMemory {
    slot: Mutex<Option<LastSelection>>,
}

impl SelectionMemory for InMemorySelectionMemory {
    fn load(&self) -> Option<LastSelection> {
        self.slot.lock().unwrap().clone()
    }

    fn save(&self, selection: LastSelection) {
        *self.slot.lock().unwrap() = Some(selection);
    }
}

/// File-backed store keeping one JSON record in the platform config directory
pub struct FileSelectionMemory {
    path: PathBuf,
}

impl FileSelectionMemory {
    const FILE_NAME: &'static str = "last-selection.json";

    /// Store under the platform config dir, e.g. `~/.config/snipcore/`
    pub fn new() -> Option<Self> {
        let dir = dirs::config_dir()?.join("snipcore");
        Some(Self::at(dir.join(Self::FILE_NAME)))
    }

    /// Store at an explicit path
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SelectionMemory for FileSelectionMemory {
    fn load(&self) -> Option<LastSelection> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) => {
                log::debug!("no last selection at {:?}: {}", self.path, err);
                return None;
            }
        };
        match serde_json::from_slice(&data) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("could not parse last selection record: {}", err);
                None
            }
        }
    }

    fn save(&self, selection: LastSelection) {
        if let Some(parent) = self.path.parent()
            && let Err(err) = fs::create_dir_all(parent)
        {
            log::warn!("could not create {:?}: {}", parent, err);
            return;
        }
        match serde_json::to_vec_pretty(&selection) {
            Ok(data) => {
                if let Err(err) = fs::write(&self.path, data) {
                    log::warn!("could not save last selection: {}", err);
                }
            }
            Err(err) => log::warn!("could not serialize last selection: {}", err),
        }
    }
}

use super::data::Record;
use super::durable::{DurableStore, PersistenceError};

/// A single-cell edit, addressed by row position.
///
/// Only the price column is editable today; the enum keeps the commit
/// path open for further editable columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellEdit {
    Price(f64),
}

/// The SnapshotStore owns the dataset for one session.
///
/// It tracks three copies:
/// - `current`: the live dataset the table renders from;
/// - `previous`: a copy captured exactly once, right after the first
///   load completes and before any edit — the reset target;
/// - the durable save file, written on save and deleted on reset.
///
/// `current` is never mutated in place: every update swaps in a whole
/// new Vec, so row positions stay valid between render and commit.
#[derive(Debug)]
pub struct SnapshotStore {
    current: Vec<Record>,
    previous: Option<Vec<Record>>,
    hydrated: bool,
    durable: DurableStore,
}

impl SnapshotStore {
    pub fn new(durable: DurableStore) -> Self {
        Self {
            current: Vec::new(),
            previous: None,
            hydrated: false,
            durable,
        }
    }

    pub fn rows(&self) -> &[Record] {
        &self.current
    }

    /// Whether the initial load has completed (even with an empty result)
    pub fn is_loaded(&self) -> bool {
        self.previous.is_some()
    }

    /// Install the freshly loaded dataset.
    ///
    /// The first completion also captures `previous`; later calls only
    /// replace `current`, the reset target never moves within a session.
    pub fn complete_load(&mut self, rows: Vec<Record>) {
        self.current = rows;
        if self.previous.is_none() {
            self.previous = Some(self.current.clone());
        }
    }

    /// Overwrite `current` with the saved copy from a previous session,
    /// if there is one.
    ///
    /// Runs at most once per session and only after a load completed.
    /// An empty or unreadable save never clobbers the loaded data; those
    /// cases are logged and ignored.
    pub fn hydrate_from_durable(&mut self) {
        if self.hydrated || !self.is_loaded() {
            return;
        }
        self.hydrated = true;

        match self.durable.read() {
            Ok(saved) if !saved.is_empty() => {
                log::info!("restored {} rows from local save", saved.len());
                self.current = saved;
            }
            Ok(_) => {}
            Err(e) => log::error!("ignoring local save: {e}"),
        }
    }

    /// Apply a single-cell edit at `row_index`, replacing the dataset
    /// with a new one that differs only in that cell.
    ///
    /// An out-of-range index is a stale edit from the rendering layer;
    /// it is logged and dropped rather than treated as fatal.
    pub fn set_cell(&mut self, row_index: usize, edit: CellEdit) {
        if row_index >= self.current.len() {
            log::warn!(
                "dropping edit for row {row_index}, dataset has {} rows",
                self.current.len()
            );
            return;
        }

        let mut rows = self.current.clone();
        match edit {
            CellEdit::Price(value) => rows[row_index].price = value,
        }
        self.current = rows;
    }

    /// Persist `current` to the durable store.
    ///
    /// On failure the in-memory dataset is untouched; the caller decides
    /// how to surface the error (it is never fatal).
    pub fn save(&self) -> Result<(), PersistenceError> {
        self.durable.write(&self.current)
    }

    /// Restore the dataset captured at load time and drop the save file.
    ///
    /// `current` becomes a fresh copy, so later edits cannot reach into
    /// `previous`. The in-memory reset happens even when deleting the
    /// save file fails; that failure is returned for the caller to log.
    pub fn reset(&mut self) -> Result<(), PersistenceError> {
        let Some(previous) = &self.previous else {
            return Ok(());
        };
        self.current = previous.clone();

        self.durable.clear()
    }
}

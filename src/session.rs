//! Recording session controller.
//!
//! Owns the take tree for one recording session, feeds it from the recorder
//! lifecycle (take started / take stopped), and keeps the project's take list
//! file in sync with it.

use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::record::{validate_name, TakeRecord};
use crate::store::{load_into, save_tree, LoadReport, TakeListStore};
use crate::timecode::Timecode;
use crate::tree::{AddTakeOutcome, ListenerId, TakeTree, TreeEvent, TreeListener};
use crate::types::{NodeId, Status};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Text some recorders send when the operator left the description field alone.
const DESCRIPTION_PLACEHOLDER: &str = "description";

/// Take announced by `record_start`, waiting for `record_stop`.
#[derive(Debug, Clone)]
struct PendingTake {
    slate: String,
    take: u32,
    description: String,
    start: Timecode,
}

/// Marks the session dirty whenever the tree commits a change.
struct PersistenceTrigger {
    dirty: Arc<AtomicBool>,
}

impl TreeListener for PersistenceTrigger {
    fn on_event(&mut self, _tree: &TakeTree, _event: &TreeEvent) {
        self.dirty.store(true, Ordering::SeqCst);
    }
}

/// One recording session: the take tree plus the store it is saved to.
pub struct TakeSession {
    tree: TakeTree,
    store: Box<dyn TakeListStore + Send>,
    settings: SessionConfig,
    pending: Option<PendingTake>,
    dirty: Arc<AtomicBool>,
}

impl TakeSession {
    /// Open a session, loading any takes already saved in `store`.
    ///
    /// A malformed take list aborts the open so the file is never overwritten.
    pub fn open(
        settings: SessionConfig,
        store: Box<dyn TakeListStore + Send>,
    ) -> Result<Self, ApiError> {
        validate_name("Sequence", &settings.sequence)?;

        let mut tree = TakeTree::new();
        let report = load_into(&mut tree, store.as_ref())?;
        if report.duplicates > 0 {
            warn!(
                "Ignored {} duplicate takes in {}",
                report.duplicates,
                store.path().display()
            );
        }

        let dirty = Arc::new(AtomicBool::new(false));
        tree.subscribe(Box::new(PersistenceTrigger {
            dirty: dirty.clone(),
        }));

        Ok(Self {
            tree,
            store,
            settings,
            pending: None,
            dirty,
        })
    }

    pub fn tree(&self) -> &TakeTree {
        &self.tree
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    pub fn settings(&self) -> &SessionConfig {
        &self.settings
    }

    pub fn current_sequence(&self) -> &str {
        &self.settings.sequence
    }

    pub fn set_sequence(&mut self, name: &str) -> Result<(), ApiError> {
        validate_name("Sequence", name)?;
        info!("Current sequence is now {}", name);
        self.settings.sequence = name.to_string();
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Register an additional observer on the session's tree.
    pub fn subscribe(&mut self, listener: Box<dyn TreeListener + Send>) -> ListenerId {
        self.tree.subscribe(listener)
    }

    /// Recorder callback: a take has started rolling.
    pub fn record_start(
        &mut self,
        slate: &str,
        take: u32,
        description: &str,
        start: Timecode,
    ) -> Result<(), ApiError> {
        validate_name("Slate", slate)?;
        self.check_frame_rate(&start)?;
        if let Some(previous) = &self.pending {
            warn!(
                "Record started for {} take {} while {} take {} was still rolling; dropping the earlier take",
                slate, take, previous.slate, previous.take
            );
        }

        let description = if description == DESCRIPTION_PLACEHOLDER {
            String::new()
        } else {
            description.to_string()
        };
        debug!("Recording {} take {} from {}", slate, take, start);
        self.pending = Some(PendingTake {
            slate: slate.to_string(),
            take,
            description,
            start,
        });
        Ok(())
    }

    /// Recorder callback: the rolling take stopped at `stop`.
    ///
    /// Logs the take under the current sequence with the start timecode and
    /// the elapsed duration. Returns None when no take was rolling.
    pub fn record_stop(&mut self, stop: Timecode) -> Result<Option<AddTakeOutcome>, ApiError> {
        if self.pending.is_none() {
            warn!("Record stopped at {} with no take rolling", stop);
            return Ok(None);
        }
        self.check_frame_rate(&stop)?;
        let pending = match self.pending.take() {
            Some(p) => p,
            None => return Ok(None),
        };

        let record = TakeRecord {
            sequence: self.settings.sequence.clone(),
            slate: pending.slate,
            take: pending.take,
            timecode: pending.start,
            duration: pending.start.seconds_until(&stop, self.settings.frame_rate),
            status: self.settings.default_status,
            notes: pending.description,
        };
        self.insert_record(&record).map(Some)
    }

    /// Log a take directly. Names are validated before the tree is touched.
    pub fn add_take(
        &mut self,
        sequence: &str,
        slate: &str,
        take: u32,
        description: &str,
        quality: Status,
        timecode: Timecode,
    ) -> Result<AddTakeOutcome, ApiError> {
        validate_name("Sequence", sequence)?;
        validate_name("Slate", slate)?;
        let outcome = self
            .tree
            .add_take(sequence, slate, take, description, quality, timecode);
        self.flush()?;
        Ok(outcome)
    }

    pub fn insert_record(&mut self, record: &TakeRecord) -> Result<AddTakeOutcome, ApiError> {
        record.validate()?;
        let outcome = self.tree.insert_record(record);
        self.flush()?;
        Ok(outcome)
    }

    /// Edit notes or status of a take. Ok(false) means the edit was rejected.
    pub fn set_take_field(
        &mut self,
        node: NodeId,
        field: &str,
        value: &str,
    ) -> Result<bool, ApiError> {
        let changed = self.tree.set_take_field(node, field, value);
        self.flush()?;
        Ok(changed)
    }

    /// Edit a take addressed by its (sequence, slate, take) key.
    pub fn set_take_field_by_key(
        &mut self,
        sequence: &str,
        slate: &str,
        take: u32,
        field: &str,
        value: &str,
    ) -> Result<bool, ApiError> {
        let node = self
            .tree
            .find_take_by_key(sequence, slate, take)
            .ok_or_else(|| {
                ApiError::NotFound(format!("{} / {} take {}", sequence, slate, take))
            })?;
        self.set_take_field(node, field, value)
    }

    /// Merge takes from another take list into this session.
    pub fn import_from(&mut self, source: &dyn TakeListStore) -> Result<LoadReport, ApiError> {
        let report = load_into(&mut self.tree, source)?;
        self.flush()?;
        Ok(report)
    }

    /// Write the current take list to another destination.
    pub fn export_to(&self, target: &dyn TakeListStore) -> Result<usize, ApiError> {
        save_tree(&self.tree, target)
    }

    /// Write the take list to the session's store, overwriting it.
    pub fn save(&mut self) -> Result<usize, ApiError> {
        self.dirty.store(false, Ordering::SeqCst);
        match save_tree(&self.tree, self.store.as_ref()) {
            Ok(count) => {
                info!("Saved {} takes to {}", count, self.store.path().display());
                Ok(count)
            }
            Err(e) => {
                self.dirty.store(true, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    /// Recorder timecodes must address a frame that exists at the session rate.
    fn check_frame_rate(&self, timecode: &Timecode) -> Result<(), ApiError> {
        if timecode.fits_frame_rate(self.settings.frame_rate) {
            Ok(())
        } else {
            Err(ApiError::InvalidInput(format!(
                "Timecode {} has more frames than {} fps allows",
                timecode, self.settings.frame_rate
            )))
        }
    }

    fn flush(&mut self) -> Result<(), ApiError> {
        if self.settings.autosave && self.is_dirty() {
            self.save()?;
        }
        Ok(())
    }
}

/// Session shared between threads.
///
/// Every call holds the lock for its whole duration, so flattening and
/// writing the file happen inside one critical section.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<TakeSession>>,
}

impl SharedSession {
    pub fn new(session: TakeSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut TakeSession) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn add_take(
        &self,
        sequence: &str,
        slate: &str,
        take: u32,
        description: &str,
        quality: Status,
        timecode: Timecode,
    ) -> Result<AddTakeOutcome, ApiError> {
        self.with(|s| s.add_take(sequence, slate, take, description, quality, timecode))
    }

    pub fn save(&self) -> Result<usize, ApiError> {
        self.with(|s| s.save())
    }
}

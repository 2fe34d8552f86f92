//! Line-diff oracle: classifies every current document line against a
//! reference document.
//!
//! The [`LineDiff`] trait is the seam the diff applier consults.
//! [`DocumentLineDiffer`] is the concrete oracle: it recomputes
//! classifications on a background worker so the edit path never pays for a
//! full diff, and exposes a synchronized flag that callers wait on (with a
//! bounded timeout) before trusting its output. Snapshots submitted while a
//! computation is in flight coalesce; only the newest one matters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use revline_buffer::TextBuffer;
use similar::{capture_diff_slices, Algorithm, DiffOp};

/// Classification of one current document line relative to the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// The line matches reference line `original`.
    Unchanged { original: usize },
    /// The line has no reference counterpart (pure insertion).
    Added,
    /// The line replaced one or more reference lines.
    Changed,
}

/// Per-line classification of the current document.
///
/// Implementations guarantee that `original` values reported across
/// ascending `line` arguments are strictly increasing; a violation is a bug
/// in the oracle, not a case consumers handle.
pub trait LineDiff {
    /// Returns the classification of current line `line`.
    ///
    /// `line` must be within the document the oracle is synchronized with;
    /// anything else is a contract violation and may panic.
    fn line_class(&self, line: usize) -> LineClass;
}

/// Supplies the reference document content the current document is diffed
/// against. The content itself (VCS lookup, snapshot, etc.) is external.
pub trait ReferenceProvider: Send + 'static {
    fn reference(&self) -> String;
}

/// A fixed reference document.
impl ReferenceProvider for String {
    fn reference(&self) -> String {
        self.clone()
    }
}

/// A snapshot of document content queued for classification.
struct Job {
    seq: u64,
    content: String,
}

struct DifferShared {
    state: Mutex<DifferState>,
    synchronized: Condvar,
}

#[derive(Default)]
struct DifferState {
    classes: Vec<LineClass>,
    synchronized: bool,
}

/// Asynchronous line differ bound to one reference provider.
///
/// Not synchronized until [`DocumentLineDiffer::connect`] has submitted the
/// first snapshot and the worker has classified it.
pub struct DocumentLineDiffer {
    shared: Arc<DifferShared>,
    /// Sequence number of the most recently submitted snapshot; the worker
    /// only publishes results whose sequence still matches.
    latest: Arc<AtomicU64>,
    jobs: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl DocumentLineDiffer {
    /// Creates a differ and spawns its worker thread.
    pub fn new(provider: impl ReferenceProvider) -> Self {
        let shared = Arc::new(DifferShared {
            state: Mutex::new(DifferState::default()),
            synchronized: Condvar::new(),
        });
        let latest = Arc::new(AtomicU64::new(0));
        let (jobs, queue) = mpsc::channel();

        let worker = {
            let shared = Arc::clone(&shared);
            let latest = Arc::clone(&latest);
            thread::Builder::new()
                .name("revline-differ".into())
                .spawn(move || worker_loop(queue, provider, shared, latest))
                .expect("failed to spawn differ worker")
        };

        Self {
            shared,
            latest,
            jobs: Some(jobs),
            worker: Some(worker),
        }
    }

    /// Submits the document's initial content for classification.
    pub fn connect(&self, document: &TextBuffer) {
        self.document_changed(document);
    }

    /// Notifies the differ that the document was edited. Clears the
    /// synchronized flag and queues the new content; the worker picks up
    /// the newest queued snapshot.
    pub fn document_changed(&self, document: &TextBuffer) {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.lock_state();
            state.synchronized = false;
        }
        if let Some(jobs) = &self.jobs {
            // The worker outlives every submission; a send failure would
            // mean it panicked, which the join on drop surfaces.
            let _ = jobs.send(Job {
                seq,
                content: document.content(),
            });
        }
    }

    /// Returns true if the classification reflects the newest submitted
    /// snapshot.
    pub fn is_synchronized(&self) -> bool {
        self.lock_state().synchronized
    }

    /// Blocks until the differ is synchronized or `timeout` elapses,
    /// returning the final synchronized state. Spurious wakeups re-test the
    /// flag; a `false` return means "not yet synchronized" and the caller
    /// decides whether to retry, skip the refresh, or render stale ranges.
    pub fn wait_for_synchronization(&self, timeout: Duration) -> bool {
        let state = self.lock_state();
        let (state, _timed_out) = self
            .shared
            .synchronized
            .wait_timeout_while(state, timeout, |s| !s.synchronized)
            .expect("differ state lock poisoned");
        state.synchronized
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, DifferState> {
        self.shared.state.lock().expect("differ state lock poisoned")
    }
}

impl LineDiff for DocumentLineDiffer {
    fn line_class(&self, line: usize) -> LineClass {
        self.lock_state().classes[line]
    }
}

impl Drop for DocumentLineDiffer {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn worker_loop(
    queue: Receiver<Job>,
    provider: impl ReferenceProvider,
    shared: Arc<DifferShared>,
    latest: Arc<AtomicU64>,
) {
    while let Ok(mut job) = queue.recv() {
        // Coalesce: only the newest snapshot matters.
        while let Ok(newer) = queue.try_recv() {
            job = newer;
        }

        let reference = provider.reference();
        let classes = classify_lines(&reference, &job.content);

        let mut state = shared.state.lock().expect("differ state lock poisoned");
        if job.seq == latest.load(Ordering::SeqCst) {
            state.classes = classes;
            state.synchronized = true;
            shared.synchronized.notify_all();
        }
        // Otherwise a newer snapshot is already queued; stay unsynchronized.
    }
}

/// Classifies every line of `current` against `reference`.
///
/// Both documents are split on `'\n'`, which includes the empty line after a
/// trailing delimiter — matching `TextBuffer::line_count`. A deletion run
/// immediately followed by an insertion run classifies the inserted lines as
/// `Changed` (replacement), matching quick-diff semantics regardless of how
/// the diff algorithm groups the two runs.
pub(crate) fn classify_lines(reference: &str, current: &str) -> Vec<LineClass> {
    let old_lines: Vec<&str> = reference.split('\n').collect();
    let new_lines: Vec<&str> = current.split('\n').collect();
    let ops = capture_diff_slices(Algorithm::Myers, &old_lines, &new_lines);

    let mut classes = Vec::with_capacity(new_lines.len());
    let mut pending_delete = false;
    for op in &ops {
        match *op {
            DiffOp::Equal { old_index, len, .. } => {
                pending_delete = false;
                for k in 0..len {
                    classes.push(LineClass::Unchanged {
                        original: old_index + k,
                    });
                }
            }
            DiffOp::Delete { .. } => {
                pending_delete = true;
            }
            DiffOp::Insert { new_len, .. } => {
                let class = if pending_delete {
                    LineClass::Changed
                } else {
                    LineClass::Added
                };
                pending_delete = false;
                classes.extend(std::iter::repeat(class).take(new_len));
            }
            DiffOp::Replace { new_len, .. } => {
                pending_delete = false;
                classes.extend(std::iter::repeat(LineClass::Changed).take(new_len));
            }
        }
    }

    debug_assert_eq!(classes.len(), new_lines.len());
    classes
}

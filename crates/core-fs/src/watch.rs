//! Directory watching with a bounded, drop-oldest output channel.
//!
//! ```text
//! notify watcher ──(unbounded)──▶ forwarding thread ──(bounded)──▶ consumer
//! ```
//!
//! The forwarding thread never blocks on a slow consumer: when the output
//! channel is full it discards the oldest queued path and counts the drop.
//! `close` stops the notify watcher, signals the forwarder, and joins it.
//! The forwarder owns the only output sender, so the consumer observes the
//! channel disconnecting exactly once. Bursts are coalesced on the consumer
//! side by `Debouncer`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError, select};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, trace, warn};

use crate::{FsError, Result};

pub struct DirWatcher {
    root: PathBuf,
    watcher: Option<RecommendedWatcher>,
    stop: Option<Sender<()>>,
    forwarder: Option<JoinHandle<()>>,
    events: Receiver<PathBuf>,
    dropped: Arc<AtomicU64>,
}

/// Queue `path`, evicting the oldest entry while the channel is full.
/// Returns false once the channel is disconnected.
pub(crate) fn forward_drop_oldest(
    tx: &Sender<PathBuf>,
    evict: &Receiver<PathBuf>,
    path: PathBuf,
    dropped: &AtomicU64,
) -> bool {
    let mut item = path;
    loop {
        match tx.try_send(item) {
            Ok(()) => return true,
            Err(TrySendError::Full(back)) => {
                if evict.try_recv().is_ok() {
                    dropped.fetch_add(1, Ordering::Relaxed);
                }
                item = back;
            }
            Err(TrySendError::Disconnected(_)) => return false,
        }
    }
}

impl DirWatcher {
    /// Watch `root` recursively; at most `capacity` paths are buffered.
    pub fn spawn(root: &Path, capacity: usize) -> Result<Self> {
        let watch_err = |source| FsError::Watch {
            path: root.to_path_buf(),
            source,
        };
        let (raw_tx, raw_rx) = crossbeam_channel::unbounded::<notify::Result<notify::Event>>();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = raw_tx.send(res);
        })
        .map_err(watch_err)?;
        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(watch_err)?;

        let (tx, events) = crossbeam_channel::bounded::<PathBuf>(capacity.max(1));
        let evict = events.clone();
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
        let dropped = Arc::new(AtomicU64::new(0));
        let dropped_fw = Arc::clone(&dropped);

        let forwarder = thread::Builder::new()
            .name("ferrite-watch".to_string())
            .spawn(move || {
                loop {
                    select! {
                        recv(raw_rx) -> msg => match msg {
                            Ok(Ok(event)) => {
                                for path in event.paths {
                                    trace!(target: "fs.watch", path = %path.display(), "fs_event");
                                    if !forward_drop_oldest(&tx, &evict, path, &dropped_fw) {
                                        return;
                                    }
                                }
                            }
                            Ok(Err(err)) => warn!(target: "fs.watch", error = %err, "watch_error"),
                            Err(_) => break,
                        },
                        recv(stop_rx) -> _ => break,
                    }
                }
                debug!(target: "fs.watch", "forwarder_exit");
            })
            .map_err(|e| watch_err(notify::Error::io(e)))?;

        debug!(target: "fs.watch", root = %root.display(), capacity, "watch_start");
        Ok(Self {
            root: root.to_path_buf(),
            watcher: Some(watcher),
            stop: Some(stop_tx),
            forwarder: Some(forwarder),
            events,
            dropped,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Changed paths. Disconnects after `close`.
    pub fn events(&self) -> &Receiver<PathBuf> {
        &self.events
    }

    /// Paths discarded because the consumer fell behind.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn is_closed(&self) -> bool {
        self.forwarder.is_none()
    }

    /// Stop watching and join the forwarder. Safe to call repeatedly.
    pub fn close(&mut self) {
        self.watcher.take();
        self.stop.take();
        if let Some(handle) = self.forwarder.take() {
            if handle.join().is_err() {
                warn!(target: "fs.watch", "forwarder_panicked");
            }
            debug!(target: "fs.watch", root = %self.root.display(), dropped = self.dropped(), "watch_closed");
        }
    }
}

impl Drop for DirWatcher {
    fn drop(&mut self) {
        self.close();
    }
}

/// Trailing-edge debounce: paths noted within `window` of each other are
/// released together once `window` passes without a new one.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Vec<PathBuf>,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Vec::new(),
            deadline: None,
        }
    }

    /// Record a change at `now`, pushing the deadline out.
    pub fn note(&mut self, path: PathBuf, now: Instant) {
        if !self.pending.contains(&path) {
            self.pending.push(path);
        }
        self.deadline = Some(now + self.window);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_idle(&self) -> bool {
        self.deadline.is_none()
    }

    /// The coalesced batch if the deadline has passed.
    pub fn take_ready(&mut self, now: Instant) -> Option<Vec<PathBuf>> {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                Some(std::mem::take(&mut self.pending))
            }
            _ => None,
        }
    }
}

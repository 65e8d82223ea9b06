//! Open-buffer collection with stable ids and user-visible ordering.

use std::path::{Path, PathBuf};

use core_text::{Buffer, BufferId};
use tracing::debug;

/// Buffers in open order plus the active one. Ids are never reused.
#[derive(Debug, Default)]
pub struct BufferManager {
    buffers: Vec<Buffer>,
    active: Option<BufferId>,
    next_id: u64,
}

impl BufferManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, mut buffer: Buffer) -> BufferId {
        self.next_id += 1;
        let id = BufferId(self.next_id);
        buffer.set_id(id);
        self.buffers.push(buffer);
        self.active = Some(id);
        id
    }

    /// Add an empty untitled buffer and make it active.
    pub fn new_buffer(&mut self) -> BufferId {
        let id = self.register(Buffer::new());
        debug!(target: "state", %id, "new_buffer");
        id
    }

    /// Open `content` as the buffer for `path`. A path that is already open
    /// activates the existing buffer and `content` is ignored.
    pub fn open_buffer(&mut self, path: PathBuf, content: &str, tab_width: usize) -> BufferId {
        if let Some(id) = self.find_by_path(&path) {
            self.active = Some(id);
            debug!(target: "state", %id, path = %path.display(), "open_buffer_reactivated");
            return id;
        }
        let mut buffer = Buffer::from_content(content, Some(path.clone()));
        buffer.set_tab_width(tab_width);
        let id = self.register(buffer);
        debug!(target: "state", %id, path = %path.display(), "open_buffer");
        id
    }

    /// Register an already-configured buffer (e.g. loaded with a detected
    /// line ending) unless its path is already open.
    pub fn insert(&mut self, buffer: Buffer) -> BufferId {
        if let Some(id) = buffer.path().and_then(|p| self.find_by_path(p)) {
            self.active = Some(id);
            return id;
        }
        self.register(buffer)
    }

    /// Open a read-only placeholder for a binary file.
    pub fn open_binary_buffer(&mut self, path: PathBuf) -> BufferId {
        if let Some(id) = self.find_by_path(&path) {
            self.active = Some(id);
            return id;
        }
        let id = self.register(Buffer::binary(path));
        debug!(target: "state", %id, "open_binary_buffer");
        id
    }

    pub fn active_id(&self) -> Option<BufferId> {
        self.active
    }

    fn index_of(&self, id: BufferId) -> Option<usize> {
        self.buffers.iter().position(|b| b.id() == Some(id))
    }

    pub fn get(&self, id: BufferId) -> Option<&Buffer> {
        self.index_of(id).map(|i| &self.buffers[i])
    }

    pub fn get_mut(&mut self, id: BufferId) -> Option<&mut Buffer> {
        let i = self.index_of(id)?;
        Some(&mut self.buffers[i])
    }

    pub fn active(&self) -> Option<&Buffer> {
        self.get(self.active?)
    }

    pub fn active_mut(&mut self) -> Option<&mut Buffer> {
        let id = self.active?;
        self.get_mut(id)
    }

    /// Activate `id` if it is open.
    pub fn activate(&mut self, id: BufferId) -> bool {
        if self.index_of(id).is_some() {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Remove a buffer. Closing the active one activates the first remaining
    /// buffer. Returns false for unknown ids.
    pub fn close(&mut self, id: BufferId) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        self.buffers.remove(i);
        if self.active == Some(id) {
            self.active = self.buffers.first().and_then(Buffer::id);
        }
        debug!(target: "state", %id, remaining = self.buffers.len(), "close_buffer");
        true
    }

    fn active_index(&self) -> Option<usize> {
        self.index_of(self.active?)
    }

    /// Cycle forward through open buffers.
    pub fn next(&mut self) -> Option<BufferId> {
        let i = self.active_index()?;
        let n = (i + 1) % self.buffers.len();
        self.active = self.buffers[n].id();
        self.active
    }

    /// Cycle backward through open buffers.
    pub fn previous(&mut self) -> Option<BufferId> {
        let i = self.active_index()?;
        let n = (i + self.buffers.len() - 1) % self.buffers.len();
        self.active = self.buffers[n].id();
        self.active
    }

    /// Swap the active buffer with its left neighbour in the ordering.
    pub fn move_left(&mut self) {
        if let Some(i) = self.active_index()
            && i > 0
        {
            self.buffers.swap(i, i - 1);
        }
    }

    /// Swap the active buffer with its right neighbour in the ordering.
    pub fn move_right(&mut self) {
        if let Some(i) = self.active_index()
            && i + 1 < self.buffers.len()
        {
            self.buffers.swap(i, i + 1);
        }
    }

    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn find_by_path(&self, path: &Path) -> Option<BufferId> {
        self.buffers
            .iter()
            .find(|b| b.path() == Some(path))
            .and_then(Buffer::id)
    }
}

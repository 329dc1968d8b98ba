//! Bounded snapshot history with undo/redo.
//!
//! The history is a list of full [`MeshSnapshot`]s and a pointer to the one
//! that matches the live mesh. Committing while the pointer is not at the tail
//! discards the redo branch first. When the list grows past its capacity the
//! oldest snapshot is dropped and the pointer shifts down with it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::MAX_HISTORY;
use crate::mesh::{MeshBuffer, MeshSnapshot};

/// Position of the pointer within the history, for UI enablement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryState {
    pub len: usize,
    pub pointer: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Undo/redo stack of full mesh snapshots.
#[derive(Debug)]
pub struct HistoryManager {
    snapshots: Vec<MeshSnapshot>,
    /// Index of the snapshot matching the live mesh
    pointer: usize,
    capacity: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl HistoryManager {
    /// Create an empty history holding at most `capacity` snapshots (min 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: Vec::new(),
            pointer: 0,
            capacity,
        }
    }

    /// Seed the history with the mesh's initial state.
    ///
    /// Any existing history is discarded.
    pub fn capture_initial(&mut self, mesh: &MeshBuffer) {
        self.snapshots.clear();
        self.snapshots.push(mesh.snapshot());
        self.pointer = 0;
        debug!("History: captured initial snapshot");
    }

    /// Record the mesh's current state as the newest snapshot.
    pub fn commit(&mut self, mesh: &MeshBuffer) {
        if self.snapshots.is_empty() {
            self.capture_initial(mesh);
            return;
        }

        let tail = self.snapshots.len() - 1;
        if self.pointer < tail {
            debug!("History: discarding {} redo snapshots", tail - self.pointer);
            self.snapshots.truncate(self.pointer + 1);
        }

        self.snapshots.push(mesh.snapshot());
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
        }
        self.pointer = self.snapshots.len() - 1;

        debug!(
            "History: committed snapshot {} of {}",
            self.pointer + 1,
            self.snapshots.len()
        );
    }

    /// Step back one snapshot and restore the mesh from it.
    ///
    /// Returns false (and leaves the mesh alone) when already at the oldest
    /// snapshot.
    pub fn undo(&mut self, mesh: &mut MeshBuffer) -> bool {
        if !self.can_undo() {
            debug!("Undo: no earlier snapshot");
            return false;
        }

        self.pointer -= 1;
        mesh.restore(&self.snapshots[self.pointer]);
        debug!("Undo: restored snapshot {}", self.pointer);
        true
    }

    /// Step forward one snapshot and restore the mesh from it.
    ///
    /// Returns false (and leaves the mesh alone) when already at the newest
    /// snapshot.
    pub fn redo(&mut self, mesh: &mut MeshBuffer) -> bool {
        if !self.can_redo() {
            debug!("Redo: no later snapshot");
            return false;
        }

        self.pointer += 1;
        mesh.restore(&self.snapshots[self.pointer]);
        debug!("Redo: restored snapshot {}", self.pointer);
        true
    }

    /// Restore the mesh to the snapshot under the pointer without moving it.
    ///
    /// Used to throw away uncommitted edits. Returns false if the history is
    /// empty.
    pub fn revert(&self, mesh: &mut MeshBuffer) -> bool {
        match self.current() {
            Some(snapshot) => {
                mesh.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.pointer < self.snapshots.len() - 1
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the snapshot matching the live mesh.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            len: self.len(),
            pointer: self.pointer,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Snapshot under the pointer.
    pub fn current(&self) -> Option<&MeshSnapshot> {
        self.snapshots.get(self.pointer)
    }

    /// Snapshot at `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&MeshSnapshot> {
        self.snapshots.get(index)
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.pointer = 0;
    }
}

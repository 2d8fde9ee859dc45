//! Snapshot-based undo/redo history.
//!
//! The archive treats the scene as opaque: a snapshot is the serialized
//! scene string, and equality of strings is equality of states. `save`
//! after every committed mutation; duplicate saves are dropped so
//! no-op interactions never pollute the history.

use crate::scene::Scene;
use thiserror::Error;

/// A serialized scene state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Linear undo/redo stacks around the current state.
///
/// Invariant: `current` mirrors the scene as of the last `save`, `undo`,
/// or `redo`; any new `save` after an undo clears the redo stack.
#[derive(Debug, Default)]
pub struct Archive {
    current: Option<Snapshot>,
    undo_states: Vec<Snapshot>,
    redo_states: Vec<Snapshot>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the scene's state. A no-op when the state is unchanged
    /// since the last save.
    pub fn save(&mut self, scene: &Scene) -> Result<(), ArchiveError> {
        let snapshot = Snapshot(scene.to_snapshot()?);
        if self.current.as_ref() == Some(&snapshot) {
            return Ok(());
        }
        if let Some(previous) = self.current.replace(snapshot) {
            self.undo_states.push(previous);
            self.redo_states.clear();
        }
        Ok(())
    }

    /// Step back one state, restoring it into `scene`.
    pub fn undo(&mut self, scene: &mut Scene) -> Result<(), ArchiveError> {
        let target = self.undo_states.pop().ok_or(ArchiveError::NothingToUndo)?;
        if let Some(current) = self.current.take() {
            self.redo_states.push(current);
        }
        self.load(scene, target)
    }

    /// Step forward one state, restoring it into `scene`.
    pub fn redo(&mut self, scene: &mut Scene) -> Result<(), ArchiveError> {
        let target = self.redo_states.pop().ok_or(ArchiveError::NothingToRedo)?;
        if let Some(current) = self.current.take() {
            self.undo_states.push(current);
        }
        self.load(scene, target)
    }

    /// Replace the live scene with `snapshot`. Selection is live UI
    /// state, never part of history, so it is cleared on every load.
    fn load(&mut self, scene: &mut Scene, snapshot: Snapshot) -> Result<(), ArchiveError> {
        scene.load_snapshot(snapshot.as_str())?;
        scene.deselect_all();
        self.current = Some(snapshot);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_states.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_states.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_states.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Path, PathStyle};
    use kurbo::{Point, Size};

    fn scene_with_line() -> (Scene, Archive) {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        let mut archive = Archive::new();
        archive.save(&scene).unwrap();
        scene.add(Path::new(
            vec![Point::new(1.0, 1.0), Point::new(9.0, 9.0)],
            PathStyle::default(),
        ));
        archive.save(&scene).unwrap();
        (scene, archive)
    }

    #[test]
    fn test_save_dedup() {
        let (scene, mut archive) = scene_with_line();
        assert_eq!(archive.undo_depth(), 1);

        // Identical state: no new entry.
        archive.save(&scene).unwrap();
        assert_eq!(archive.undo_depth(), 1);
    }

    #[test]
    fn test_selection_only_change_dedups() {
        let (mut scene, mut archive) = scene_with_line();
        for path in scene.iter_mut() {
            path.select();
        }
        archive.save(&scene).unwrap();
        assert_eq!(archive.undo_depth(), 1);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let (mut scene, mut archive) = scene_with_line();
        assert_eq!(scene.len(), 2);

        archive.undo(&mut scene).unwrap();
        assert_eq!(scene.len(), 1);
        assert!(archive.can_redo());

        archive.redo(&mut scene).unwrap();
        assert_eq!(scene.len(), 2);
        assert!(!archive.can_redo());
    }

    #[test]
    fn test_undo_clears_selection() {
        let (mut scene, mut archive) = scene_with_line();
        scene.add(Path::new(
            vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)],
            PathStyle::default(),
        ));
        archive.save(&scene).unwrap();
        for path in scene.iter_mut() {
            path.select();
        }

        archive.undo(&mut scene).unwrap();
        assert!(!scene.has_selection());
    }

    #[test]
    fn test_save_after_undo_drops_redo() {
        let (mut scene, mut archive) = scene_with_line();
        archive.undo(&mut scene).unwrap();
        assert!(archive.can_redo());

        scene.add(Path::new(
            vec![Point::new(2.0, 2.0), Point::new(4.0, 4.0)],
            PathStyle::default(),
        ));
        archive.save(&scene).unwrap();
        assert!(!archive.can_redo());
    }

    #[test]
    fn test_empty_stacks_error() {
        let mut scene = Scene::new(Size::new(10.0, 10.0));
        let mut archive = Archive::new();
        assert!(matches!(
            archive.undo(&mut scene),
            Err(ArchiveError::NothingToUndo)
        ));
        assert!(matches!(
            archive.redo(&mut scene),
            Err(ArchiveError::NothingToRedo)
        ));
    }
}

//! Linear undo history.

use hexrealm_map::Map;

use crate::mv::Move;

/// Applied moves plus the redo tail.
///
/// Moves before the cursor are applied, moves at or after it have been
/// undone. Adding a move discards the redo tail. The map is passed to each
/// call; the history never holds on to it.
///
/// # Examples
///
/// ```
/// use hexrealm_core::{Pos, RegionRes, RegionVar};
/// use hexrealm_map::{Map, MapConfig};
/// use hexrealm_moves::{History, Move, RegionChange};
///
/// let mut map = Map::new(&MapConfig::new(4, 4)).unwrap();
/// let mut history = History::new();
/// let change = RegionChange::new(Pos::new(0, 0), RegionRes::default(), RegionVar::default(), true);
/// history.add(&mut map, Move::new(change));
/// assert_eq!(history.count(), (1, 0));
/// assert!(history.undo(&mut map).is_some());
/// assert_eq!(history.count(), (0, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct History {
    list: Vec<Move>,
    cursor: usize,
}

impl History {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every move without touching the map.
    pub fn clear(&mut self) {
        self.list.clear();
        self.cursor = 0;
    }

    /// Apply `mv` and record it, dropping anything that could be redone.
    pub fn add(&mut self, map: &mut Map, mut mv: Move) {
        self.list.truncate(self.cursor);
        mv.apply(map);
        self.list.push(mv);
        self.cursor += 1;
    }

    /// Revert the last applied move.
    pub fn undo(&mut self, map: &mut Map) -> Option<&Move> {
        let prev = self.cursor.checked_sub(1)?;
        self.cursor = prev;
        let mv = &mut self.list[prev];
        mv.revert(map);
        Some(&*mv)
    }

    /// Re-apply the first undone move.
    pub fn redo(&mut self, map: &mut Map) -> Option<&Move> {
        let mv = self.list.get_mut(self.cursor)?;
        mv.apply(map);
        self.cursor += 1;
        Some(&*mv)
    }

    /// `(undoable, redoable)` move counts.
    pub fn count(&self) -> (usize, usize) {
        (self.cursor, self.list.len() - self.cursor)
    }

    /// Moves currently applied, oldest first.
    pub fn applied(&self) -> &[Move] {
        &self.list[..self.cursor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityPlace;
    use crate::troop::TroopMove;
    use hexrealm_core::{EntState, Pos, Troop, TroopType};
    use hexrealm_test_utils::fixtures::{digest, duel_map};

    #[test]
    fn undo_redo_walks_the_stack() {
        let mut map = duel_map();
        let start = digest(&map);
        let a = Pos::new(1, 1);
        let b = Pos::new(2, 1);
        let mut history = History::new();

        history.add(&mut map, Move::new(EntityPlace::new(EntState::Troop(Troop::new(TroopType::Spearman, a)))));
        let placed = digest(&map);
        history.add(&mut map, Move::new(TroopMove::new(a, b)));
        let moved = digest(&map);
        assert_eq!(history.count(), (2, 0));

        let undone = history.undo(&mut map).and_then(Move::revert_cursor);
        assert_eq!(undone, Some(a));
        assert_eq!(digest(&map), placed);
        history.undo(&mut map);
        assert_eq!(digest(&map), start);
        assert!(history.undo(&mut map).is_none());
        assert_eq!(history.count(), (0, 2));

        history.redo(&mut map);
        history.redo(&mut map);
        assert_eq!(digest(&map), moved);
        assert!(history.redo(&mut map).is_none());
    }

    #[test]
    fn add_discards_redo_tail() {
        let mut map = duel_map();
        let a = Pos::new(1, 1);
        let mut history = History::new();
        history.add(&mut map, Move::new(EntityPlace::new(EntState::Troop(Troop::new(TroopType::Farmer, a)))));
        history.add(&mut map, Move::new(TroopMove::new(a, Pos::new(2, 1))));
        history.undo(&mut map);
        history.add(&mut map, Move::new(TroopMove::new(a, Pos::new(1, 2))));
        assert_eq!(history.count(), (2, 0));
        assert_eq!(history.applied().len(), 2);
        assert_eq!(map.troops()[0].entity.pos, Pos::new(1, 2));

        history.clear();
        assert_eq!(history.count(), (0, 0));
    }
}

use log::debug;

use crate::{facelets::FaceletState, moves::Move};

/// The quarter turns applied to one cube, oldest first. Replaying them on a
/// solved cube gives back the live state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    pub fn new() -> MoveHistory {
        MoveHistory::default()
    }

    pub fn record(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Pop the last move and turn it back on `state`. Returns `None` without
    /// touching `state` if nothing has been recorded.
    pub fn undo(&mut self, state: &mut FaceletState) -> Option<Move> {
        let mv = self.moves.pop()?;
        state.apply(mv.inverse());
        debug!(target: "history", "Undid {mv}, {} moves left", self.moves.len());
        Some(mv)
    }

    /// Forget every move. The caller is responsible for resetting the cube.
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Rebuild the cube state from the solved state.
    pub fn replay(&self) -> FaceletState {
        FaceletState::after(&self.moves)
    }
}

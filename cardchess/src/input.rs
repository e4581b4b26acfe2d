use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Coordinate, DrawOutcome, GameState, IllegalMove, PlayerId, Renderer, TurnChange};

/// A pointer event from whatever shows the game, already resolved to the
/// thing that was clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    SelectCell { x: i8, z: i8 },
    SelectHandCard { index: usize },
    /// Take the top card of the deck into the hand. Does not end the turn.
    DrawCard,
    /// End the turn without acting.
    Pass,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    HandCard(usize),
    Piece(Coordinate),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Selected(Selection),
    Deselected,
    /// Out of turn, or a click that means nothing without a selection.
    Ignored,
    Drew(DrawOutcome),
    Committed(TurnChange),
}

/// Turns clicks of one human player into game actions.
///
/// A hand card followed by a cell places the card. One of the player's own
/// pieces followed by a cell moves it there, capturing whatever enemy stands
/// on it. Selecting a piece highlights where it could go. Drawing and passing
/// are available at any point of the turn and drop the selection.
#[derive(Clone, Debug)]
pub struct InputController {
    player: PlayerId,
    selection: Option<Selection>,
}

impl InputController {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            selection: None,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Applies one event. A failed commit clears the selection.
    pub fn handle<R: Renderer>(
        &mut self,
        state: &mut GameState<R>,
        event: InputEvent,
    ) -> Result<InputOutcome, IllegalMove> {
        trace!(?event, player = %self.player, "Input");
        if !state.is_player_turn(self.player) {
            return Ok(InputOutcome::Ignored);
        }
        match event {
            InputEvent::SelectHandCard { index } => {
                let hand_size = state
                    .player_by_id(self.player)
                    .ok_or(IllegalMove::UnknownPlayer {
                        player: self.player,
                    })?
                    .hand()
                    .len();
                if index >= hand_size {
                    return Err(IllegalMove::InvalidHandIndex { index, hand_size });
                }
                state.clear_highlight();
                Ok(self.select(Selection::HandCard(index)))
            }
            InputEvent::SelectCell { x, z } => {
                let coord = Coordinate::new(x, z)?;
                self.select_cell(state, coord)
            }
            InputEvent::DrawCard => {
                self.drop_selection(state);
                Ok(InputOutcome::Drew(state.draw_card(self.player)?))
            }
            InputEvent::Pass => {
                self.drop_selection(state);
                Ok(InputOutcome::Committed(state.pass_turn(self.player)?))
            }
        }
    }

    fn select_cell<R: Renderer>(
        &mut self,
        state: &mut GameState<R>,
        coord: Coordinate,
    ) -> Result<InputOutcome, IllegalMove> {
        let own_piece = state
            .board()
            .entity_at(coord)
            .is_some_and(|e| e.side == state.active_side());
        match self.selection.take() {
            Some(Selection::HandCard(index)) => {
                let change = state.commit_placement(self.player, index, coord)?;
                Ok(InputOutcome::Committed(change))
            }
            Some(Selection::Piece(from)) if from == coord => {
                state.clear_highlight();
                Ok(InputOutcome::Deselected)
            }
            Some(Selection::Piece(_)) | None if own_piece => {
                state.highlight_moves(coord);
                Ok(self.select(Selection::Piece(coord)))
            }
            Some(Selection::Piece(from)) => {
                state.clear_highlight();
                let change = state.commit_move(self.player, from, coord)?;
                Ok(InputOutcome::Committed(change))
            }
            None => Ok(InputOutcome::Ignored),
        }
    }

    fn drop_selection<R: Renderer>(&mut self, state: &mut GameState<R>) {
        if let Some(Selection::Piece(_)) = self.selection.take() {
            state.clear_highlight();
        }
    }

    fn select(&mut self, selection: Selection) -> InputOutcome {
        self.selection = Some(selection);
        InputOutcome::Selected(selection)
    }
}

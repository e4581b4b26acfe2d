use std::time::Duration;

use cardchess::{GameState, Renderer, Side};
use tracing::info;

use crate::player::Participant;
use crate::recording::{GameRecording, Recorder};

/// Why a session stopped. The game itself has no end condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnd {
    /// Both sides passed one after the other, so nothing can change anymore.
    Stalemate,
    TurnLimit,
    /// A human's input stream ended.
    InputClosed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub end: GameEnd,
    pub turns: u32,
    pub scores: [u32; 2],
}

/// Settings for driving one game.
pub struct Session {
    pub seed: u64,
    pub think_delay: Duration,
    pub max_turns: Option<u32>,
    pub recorder: Option<Recorder>,
    /// Print the board to stdout after every turn.
    pub show_board: bool,
}

/// Lets the participants take turns until the session ends, then records the game.
///
/// `participants` are indexed by side. Returns an error only on IO failure or
/// when a bot's decision is rejected, not for rejected human input.
pub fn play_game<R: Renderer>(
    session: &mut Session,
    state: &mut GameState<R>,
    participants: &mut [Participant; 2],
) -> anyhow::Result<GameSummary> {
    let mut passes_in_a_row = 0;
    let end = loop {
        if session.max_turns.is_some_and(|max| state.turn() > max) {
            break GameEnd::TurnLimit;
        }
        let participant = &mut participants[state.active_side().index()];
        let moves_before = state.history().len();
        if participant.take_turn(state, session.think_delay)?.is_none() {
            break GameEnd::InputClosed;
        }
        if state.history().len() == moves_before {
            passes_in_a_row += 1;
            if passes_in_a_row >= 2 {
                break GameEnd::Stalemate;
            }
        } else {
            passes_in_a_row = 0;
        }
        if session.show_board {
            println!("{}", state.board());
        }
    };

    let summary = GameSummary {
        end,
        turns: state.turn(),
        scores: [Side::First, Side::Second].map(|side| state.player(side).score()),
    };
    info!(
        end = ?summary.end,
        turns = summary.turns,
        white = summary.scores[0],
        black = summary.scores[1],
        "Game over"
    );

    if let Some(recorder) = session.recorder.as_mut() {
        recorder.write_game_recording(&GameRecording::from_state(session.seed, state))?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use cardchess::{
        Board, Coordinate, Deck, Entity, GameConfig, NullRenderer, PieceKind, Player, PlayerId,
        PlayerKind, RandomBot,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn session(max_turns: Option<u32>, recorder: Option<Recorder>) -> Session {
        Session {
            seed: 9,
            think_delay: Duration::ZERO,
            max_turns,
            recorder,
            show_board: false,
        }
    }

    fn bot(id: u8, seed: u64) -> Participant {
        Participant::bot("bot", PlayerId(id), Box::new(RandomBot::new(StdRng::seed_from_u64(seed))))
    }

    #[test]
    fn bots_fill_the_board_then_stall() {
        let config = GameConfig {
            first_player: PlayerKind::Automated,
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = GameState::new(&config, NullRenderer, &mut rng).unwrap();
        let mut participants = [bot(0, 1), bot(1, 2)];
        let dir = tempfile::tempdir().unwrap();
        let recorder = Recorder::new(dir.path().to_path_buf()).unwrap();

        let summary = play_game(&mut session(None, Some(recorder)), &mut state, &mut participants).unwrap();

        assert_eq!(summary.end, GameEnd::Stalemate);
        assert!(state.board().is_full());
        // 64 placements, then two passes
        assert_eq!(summary.turns, 67);
        assert_eq!(state.history().len(), 64);
        assert_eq!(state.board().entities_of(Side::First).count(), 32);
        assert!(dir.path().join("game_000001.json").is_file());
    }

    #[test]
    fn turn_limit_stops_early() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = GameState::new(&GameConfig::default(), NullRenderer, &mut rng).unwrap();
        let mut participants = [bot(0, 3), bot(1, 4)];
        let summary = play_game(&mut session(Some(10), None), &mut state, &mut participants).unwrap();
        assert_eq!(summary.end, GameEnd::TurnLimit);
        assert_eq!(summary.turns, 11);
        assert_eq!(state.board().num_entities(), 10);
    }

    #[test]
    fn closed_input_ends_session() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = GameState::new(&GameConfig::default(), NullRenderer, &mut rng).unwrap();
        let events = concat!(
            "{\"type\":\"SelectHandCard\",\"index\":0}\n",
            "{\"type\":\"SelectCell\",\"x\":4,\"z\":1}\n",
        );
        let human = Participant::human("human", PlayerId(0), Box::new(Cursor::new(events)));
        let mut participants = [human, bot(1, 5)];
        let summary = play_game(&mut session(None, None), &mut state, &mut participants).unwrap();
        assert_eq!(summary.end, GameEnd::InputClosed);
        assert_eq!(summary.turns, 3);
        assert_eq!(state.board().num_entities(), 2);
    }

    #[test]
    fn human_without_cards_can_pass_into_stalemate() {
        let mut board = Board::new();
        for coord in Coordinate::all() {
            board
                .place_entity(Entity::new(PieceKind::Pawn, Side::Second, coord), coord)
                .unwrap();
        }
        let players = [
            Player::new(PlayerId(0), PlayerKind::Human, Side::First, Deck::default()),
            Player::new(PlayerId(1), PlayerKind::Automated, Side::Second, Deck::default()),
        ];
        let mut state = GameState::from_parts(players, board, NullRenderer);
        let events = concat!(
            "{\"type\":\"SelectHandCard\",\"index\":0}\n",
            "{\"type\":\"DrawCard\"}\n",
            "{\"type\":\"Pass\"}\n",
        );
        let human = Participant::human("human", PlayerId(0), Box::new(Cursor::new(events)));
        let mut participants = [human, bot(1, 6)];

        let summary = play_game(&mut session(None, None), &mut state, &mut participants).unwrap();

        assert_eq!(summary.end, GameEnd::Stalemate);
        assert_eq!(summary.turns, 3);
        assert!(state.history().is_empty());
    }
}

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::{
    candidate_moves, notation, Board, BotMove, CardDefinition, Coordinate, Deck, DrawOutcome,
    Entity, GameConfig, IllegalMove, IllegalPlacement, MissingAsset, MoveHistory, NullRenderer,
    PieceKind, Player, PlayerId, Renderer, Side, TurnChange, TurnRecord, ARCHETYPES,
};

/// Called with the side to move and the new turn number after every turn switch.
pub type TurnObserver = Box<dyn FnMut(Side, u32)>;

/// The turn coordinator: owns both players, the board, whose turn it is, and
/// the move history.
///
/// Every action that changes the board goes through one of the `commit_*`
/// methods (or [`Self::pass_turn()`]), which reject players that are not to
/// move. A successful commit records the move, issues the render commands and
/// switches the turn. There is no terminal state; the game goes on until the
/// owner drops it.
pub struct GameState<R: Renderer = NullRenderer> {
    /// Indexed by [`Side::index()`].
    players: [Player; 2],
    board: Board,
    active: Side,
    /// Starts at 1 and grows by one with every switch.
    turn: u32,
    history: MoveHistory,
    observer: Option<TurnObserver>,
    renderer: R,
}

impl<R: Renderer> GameState<R> {
    /// Sets up a fresh game: loads the card art, builds and shuffles both
    /// decks, deals the initial hands.
    ///
    /// The first side is human or automated as configured, and always moves first.
    pub fn new(config: &GameConfig, mut renderer: R, rng: &mut StdRng) -> Result<Self, MissingAsset> {
        // Decks are built from the archetypes, and the bot pool is a subset of them
        let all_cards: Vec<CardDefinition> = [Side::First, Side::Second]
            .into_iter()
            .flat_map(|side| ARCHETYPES.iter().map(move |a| a.card_for(side)))
            .collect();
        renderer.load_assets(&all_cards)?;

        let players = [
            Player::new(
                PlayerId(0),
                config.first_player,
                Side::First,
                Deck::with_copies(Side::First, config.copies_per_archetype, rng),
            ),
            Player::new(
                PlayerId(1),
                config.second_player,
                Side::Second,
                Deck::with_copies(Side::Second, config.copies_per_archetype, rng),
            ),
        ];
        let board = if config.standard_setup {
            Board::standard_setup()
        } else {
            Board::new()
        };

        let mut state = Self::from_parts(players, board, renderer);
        for player in state.players.iter_mut() {
            let drawn = player.draw_initial_hand(config.initial_hand_size);
            debug!(player = %player.id, drawn, remaining = player.deck().len(), "Dealt initial hand");
        }
        let initial: Vec<Entity> = state.board.entities().copied().collect();
        for entity in &initial {
            state.renderer.place_visual(entity, None);
        }
        Ok(state)
    }

    /// Assembles a game from existing parts, with the players in any order. The
    /// turn counter starts at 1 with the first side to move.
    ///
    /// Panics if both players are on the same side.
    pub fn from_parts(mut players: [Player; 2], board: Board, renderer: R) -> Self {
        players.sort_by_key(|p| p.side);
        assert_ne!(players[0].side, players[1].side, "Both players are on the same side");
        Self {
            players,
            board,
            active: Side::First,
            turn: 1,
            history: MoveHistory::new(),
            observer: None,
            renderer,
        }
    }

    pub fn active_side(&self) -> Side {
        self.active
    }

    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn player_by_id(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Registers the turn observer, replacing any previous one.
    pub fn set_turn_observer(&mut self, observer: impl FnMut(Side, u32) + 'static) {
        if self.observer.is_some() {
            debug!("Replacing turn observer");
        }
        self.observer = Some(Box::new(observer));
    }

    pub fn is_player_turn(&self, id: PlayerId) -> bool {
        self.active_player().id == id
    }

    /// Hands the turn to the other side and notifies the observer.
    pub fn switch_turn(&mut self) -> TurnChange {
        self.active = self.active.other();
        self.turn += 1;
        info!(turn = self.turn, side = %self.active, "Turn {}: {}'s turn", self.turn, self.active);
        if let Some(observer) = self.observer.as_mut() {
            observer(self.active, self.turn);
        }
        TurnChange {
            side: self.active,
            turn: self.turn,
            automated: self.active_player().is_automated(),
        }
    }

    /// Appends a move to the history of `side`.
    pub fn record_move(
        &mut self,
        side: Side,
        kind: PieceKind,
        to: Coordinate,
        from: Option<Coordinate>,
        capture: bool,
        placement: bool,
    ) -> &TurnRecord {
        let notation = notation(kind, to, capture, placement);
        info!(turn = self.turn, side = %side, notation, "Move");
        self.history.push(TurnRecord {
            turn: self.turn,
            side,
            kind,
            to,
            from,
            capture,
            placement,
            notation,
        })
    }

    /// Takes the entity on `coord` off the board and credits it to `capturer`.
    ///
    /// Does not check whose turn it is or which side the entity belongs to.
    pub fn capture_piece(&mut self, coord: Coordinate, capturer: PlayerId) -> Result<Entity, IllegalMove> {
        let idx = self.index_of(capturer)?;
        let entity = self
            .board
            .remove_entity(coord)
            .ok_or(IllegalPlacement::EmptyCell { coord })?;
        let points = self.players[idx].record_capture(entity);
        self.renderer.animate_destruction(&entity);
        info!(
            player = %capturer,
            kind = %entity.kind,
            %coord,
            points,
            score = self.players[idx].score(),
            "Captured"
        );
        Ok(entity)
    }

    /// Plays the card at `hand_index` from the player's hand onto `coord`.
    ///
    /// The card stays in the hand if anything is wrong with the placement.
    pub fn commit_placement(
        &mut self,
        player: PlayerId,
        hand_index: usize,
        coord: Coordinate,
    ) -> Result<TurnChange, IllegalMove> {
        let idx = self.checked_turn(player)?;
        if let Some(occupant) = self.board.entity_at(coord) {
            return Err(IllegalPlacement::Occupied {
                coord,
                occupant: *occupant,
            }
            .into());
        }
        let card = self.players[idx].play_card(hand_index)?;
        self.place_card(idx, card, coord)
    }

    /// Places a piece from `card` without taking it from the player's hand.
    pub fn commit_card(
        &mut self,
        player: PlayerId,
        card: CardDefinition,
        coord: Coordinate,
    ) -> Result<TurnChange, IllegalMove> {
        let idx = self.checked_turn(player)?;
        self.place_card(idx, card, coord)
    }

    /// Moves the player's piece from `from` to `to`, capturing an enemy piece on `to`.
    ///
    /// There is no movement legality check beyond whose piece it is.
    pub fn commit_move(
        &mut self,
        player: PlayerId,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<TurnChange, IllegalMove> {
        let idx = self.checked_turn(player)?;
        let side = self.players[idx].side;
        let mover = *self
            .board
            .entity_at(from)
            .ok_or(IllegalPlacement::EmptyCell { coord: from })?;
        if mover.side != side {
            return Err(IllegalMove::NotYourPiece { coord: from });
        }
        let capture = match self.board.entity_at(to) {
            Some(target) if target.side == side => {
                return Err(IllegalPlacement::Occupied {
                    coord: to,
                    occupant: *target,
                }
                .into())
            }
            Some(_) => true,
            None => false,
        };
        if capture {
            self.capture_piece(to, player)?;
        }
        self.board.move_entity(from, to)?;
        self.renderer.remove_visual(from);
        if let Some(moved) = self.board.entity_at(to).copied() {
            self.renderer.place_visual(&moved, None);
        }
        self.record_move(side, mover.kind, to, Some(from), capture, false);
        Ok(self.switch_turn())
    }

    /// Gives up the turn without acting.
    pub fn pass_turn(&mut self, player: PlayerId) -> Result<TurnChange, IllegalMove> {
        self.checked_turn(player)?;
        info!(%player, turn = self.turn, "Passed");
        Ok(self.switch_turn())
    }

    /// Carries out a decision maker's choice for `player`.
    pub fn apply_bot_move(&mut self, player: PlayerId, bot_move: BotMove) -> Result<TurnChange, IllegalMove> {
        match bot_move {
            BotMove::Place { card, coord } => self.commit_card(player, card, coord),
            BotMove::Pass => self.pass_turn(player),
        }
    }

    /// Draws a card for `player`. Drawing is not a move and is allowed at any time.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<DrawOutcome, IllegalMove> {
        let idx = self.index_of(player)?;
        Ok(self.players[idx].draw_card())
    }

    /// Highlights where the piece on `coord` could go, and returns those cells.
    pub fn highlight_moves(&mut self, coord: Coordinate) -> Vec<Coordinate> {
        let cells = candidate_moves(&self.board, coord);
        self.renderer.highlight(&cells);
        cells
    }

    pub fn clear_highlight(&mut self) {
        self.renderer.highlight(&[]);
    }

    fn index_of(&self, player: PlayerId) -> Result<usize, IllegalMove> {
        self.players
            .iter()
            .position(|p| p.id == player)
            .ok_or(IllegalMove::UnknownPlayer { player })
    }

    fn checked_turn(&self, player: PlayerId) -> Result<usize, IllegalMove> {
        let idx = self.index_of(player)?;
        if self.players[idx].side != self.active {
            debug!(%player, active = %self.active, "Rejected action out of turn");
            return Err(IllegalMove::NotYourTurn {
                player,
                active: self.active,
            });
        }
        Ok(idx)
    }

    fn place_card(&mut self, idx: usize, card: CardDefinition, coord: Coordinate) -> Result<TurnChange, IllegalMove> {
        let side = self.players[idx].side;
        let entity = Entity::new(card.kind, side, coord);
        self.board.place_entity(entity, coord)?;
        self.renderer.place_visual(&entity, Some(&card));
        self.record_move(side, card.kind, coord, None, false, true);
        Ok(self.switch_turn())
    }
}

impl<R: Renderer + std::fmt::Debug> std::fmt::Debug for GameState<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("players", &self.players)
            .field("board", &self.board)
            .field("active", &self.active)
            .field("turn", &self.turn)
            .field("history", &self.history)
            .field("observer", &self.observer.is_some())
            .field("renderer", &self.renderer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use quickcheck::quickcheck;
    use rand::SeedableRng;

    use super::*;
    use crate::{coord, CommandLog, PlayerKind, RenderCommand, BOT_CANDIDATES};

    const FIRST: PlayerId = PlayerId(0);
    const SECOND: PlayerId = PlayerId(1);

    fn card(kind: PieceKind, side: Side) -> CardDefinition {
        let archetype = BOT_CANDIDATES.iter().find(|a| a.kind == kind).unwrap();
        archetype.card_for(side)
    }

    /// Both players hold exactly `hand`, with nothing left in their decks.
    fn game_with_hands(hand: &[PieceKind]) -> GameState<CommandLog> {
        let players = [Side::First, Side::Second].map(|side| {
            let cards = hand.iter().rev().map(|&k| card(k, side)).collect();
            let id = PlayerId(side.index() as u8);
            let mut player = Player::new(id, PlayerKind::Human, side, Deck::from_cards(cards));
            player.draw_initial_hand(hand.len());
            player
        });
        GameState::from_parts(players, Board::new(), CommandLog::new())
    }

    quickcheck! {
        fn switching_alternates_sides(n: u8) -> bool {
            let mut state = game_with_hands(&[]);
            for _ in 0..n {
                state.switch_turn();
            }
            let expected = if n % 2 == 0 { Side::First } else { Side::Second };
            state.active_side() == expected && state.turn() == 1 + n as u32
        }
    }

    #[test]
    fn new_game_deals_hands() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = GameConfig {
            copies_per_archetype: 2,
            ..GameConfig::default()
        };
        let state = GameState::new(&config, NullRenderer, &mut rng).unwrap();
        assert_eq!(state.active_side(), Side::First);
        assert_eq!(state.turn(), 1);
        for player in state.players() {
            assert_eq!(player.hand().len(), 7);
            assert_eq!(player.deck().len(), 7);
            assert!(player.hand().cards().iter().all(|c| c.side == player.side));
        }
        assert!(state.player(Side::Second).is_automated());
        assert_eq!(state.board().num_entities(), 0);
    }

    #[test]
    fn standard_setup_is_rendered() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = GameConfig {
            standard_setup: true,
            ..GameConfig::default()
        };
        let state = GameState::new(&config, CommandLog::new(), &mut rng).unwrap();
        assert_eq!(state.renderer().commands().len(), 32);
    }

    #[test]
    fn placing_a_pawn_card_switches_turn() {
        let mut state = game_with_hands(&[PieceKind::Pawn, PieceKind::Rook]);
        let change = state.commit_placement(FIRST, 0, coord!("d4")).unwrap();

        let placed = state.board().entity_at(Coordinate::new(3, 3).unwrap()).unwrap();
        assert_eq!(placed.kind, PieceKind::Pawn);
        assert_eq!(placed.side, Side::First);
        assert_eq!(change, TurnChange { side: Side::Second, turn: 2, automated: false });
        assert_eq!(state.active_side(), Side::Second);
        assert_eq!(state.turn(), 2);
        assert_eq!(state.player(Side::First).hand().len(), 1);

        let record = &state.history().of(Side::First)[0];
        assert!(record.placement);
        assert_eq!(record.turn, 1);
        assert_eq!(record.notation, "@d4");
        assert!(matches!(
            state.renderer().commands(),
            [RenderCommand::Place { texture: Some(_), .. }]
        ));
    }

    #[test]
    fn out_of_turn_actions_are_rejected() {
        let mut state = game_with_hands(&[PieceKind::Pawn]);
        assert_eq!(
            state.commit_placement(SECOND, 0, coord!("d5")),
            Err(IllegalMove::NotYourTurn { player: SECOND, active: Side::First })
        );
        assert!(matches!(state.pass_turn(SECOND), Err(IllegalMove::NotYourTurn { .. })));
        assert!(matches!(
            state.commit_placement(PlayerId(7), 0, coord!("d5")),
            Err(IllegalMove::UnknownPlayer { .. })
        ));
        assert_eq!(state.turn(), 1);
        assert_eq!(state.board().num_entities(), 0);
        assert_eq!(state.player(Side::Second).hand().len(), 1);
    }

    #[test]
    fn placement_on_occupied_cell_keeps_card() {
        let mut state = game_with_hands(&[PieceKind::Pawn, PieceKind::Queen]);
        state.commit_placement(FIRST, 0, coord!("d4")).unwrap();
        let err = state.commit_placement(SECOND, 0, coord!("d4")).unwrap_err();
        assert!(matches!(
            err,
            IllegalMove::IllegalPlacement { err: IllegalPlacement::Occupied { .. } }
        ));
        assert_eq!(state.player(Side::Second).hand().len(), 2);
        assert_eq!(state.active_side(), Side::Second);
        assert!(matches!(
            state.commit_placement(SECOND, 5, coord!("d5")),
            Err(IllegalMove::InvalidHandIndex { index: 5, hand_size: 2 })
        ));
    }

    #[test]
    fn capture_scores_point_value() {
        let mut state = game_with_hands(&[PieceKind::Rook, PieceKind::King]);
        state.commit_placement(FIRST, 0, coord!("a1")).unwrap();
        state.commit_placement(SECOND, 1, coord!("e8")).unwrap();

        let rook = state.capture_piece(coord!("a1"), SECOND).unwrap();
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(state.board().entity_at(coord!("a1")).is_none());
        assert_eq!(state.player(Side::Second).score(), 5);

        let king = state.capture_piece(coord!("e8"), FIRST).unwrap();
        assert_eq!(king.kind, PieceKind::King);
        assert!(state.board().entity_at(coord!("e8")).is_none());
        assert_eq!(state.player(Side::First).score(), 0);
        assert_eq!(state.player(Side::First).captured().len(), 1);

        assert!(matches!(
            state.renderer().commands().last(),
            Some(RenderCommand::Destroy { .. })
        ));
        assert!(state.capture_piece(coord!("e8"), FIRST).is_err());
    }

    #[test]
    fn moving_onto_enemy_captures() {
        let mut state = game_with_hands(&[PieceKind::Rook, PieceKind::Knight]);
        state.commit_placement(FIRST, 0, coord!("a1")).unwrap();
        state.commit_placement(SECOND, 1, coord!("a5")).unwrap();

        assert_eq!(
            state.commit_move(FIRST, coord!("a5"), coord!("a6")),
            Err(IllegalMove::NotYourPiece { coord: coord!("a5") })
        );
        state.commit_move(FIRST, coord!("a1"), coord!("a5")).unwrap();

        assert!(state.board().entity_at(coord!("a1")).is_none());
        let rook = state.board().entity_at(coord!("a5")).unwrap();
        assert_eq!((rook.kind, rook.side), (PieceKind::Rook, Side::First));
        assert_eq!(state.player(Side::First).score(), 3);
        let record = state.history().of(Side::First).last().unwrap();
        assert_eq!(record.notation, "Rxa5");
        assert_eq!(record.from, Some(coord!("a1")));
        assert!(record.capture);
        assert_eq!(state.turn(), 4);
    }

    #[test]
    fn moving_onto_own_piece_fails() {
        let mut state = game_with_hands(&[PieceKind::Rook, PieceKind::Pawn]);
        state.commit_placement(FIRST, 0, coord!("a1")).unwrap();
        state.pass_turn(SECOND).unwrap();
        state.commit_placement(FIRST, 0, coord!("a2")).unwrap();
        state.pass_turn(SECOND).unwrap();
        let err = state.commit_move(FIRST, coord!("a1"), coord!("a2")).unwrap_err();
        assert!(matches!(
            err,
            IllegalMove::IllegalPlacement { err: IllegalPlacement::Occupied { .. } }
        ));
        assert_eq!(state.board().num_entities(), 2);
        assert_eq!(state.active_side(), Side::First);
    }

    #[test]
    fn last_registered_observer_wins() {
        let mut state = game_with_hands(&[]);
        let first_seen = Rc::new(RefCell::new(Vec::new()));
        let second_seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&first_seen);
        state.set_turn_observer(move |side, turn| sink.borrow_mut().push((side, turn)));
        state.switch_turn();
        let sink = Rc::clone(&second_seen);
        state.set_turn_observer(move |side, turn| sink.borrow_mut().push((side, turn)));
        state.switch_turn();

        assert_eq!(*first_seen.borrow(), vec![(Side::Second, 2)]);
        assert_eq!(*second_seen.borrow(), vec![(Side::First, 3)]);
    }

    #[test]
    fn highlight_goes_to_renderer() {
        let mut state = game_with_hands(&[PieceKind::King]);
        state.commit_placement(FIRST, 0, coord!("a1")).unwrap();
        let cells = state.highlight_moves(coord!("a1"));
        assert_eq!(cells.len(), 3);
        state.clear_highlight();
        assert_eq!(
            state.renderer().commands()[1..],
            [
                RenderCommand::Highlight { cells },
                RenderCommand::Highlight { cells: vec![] },
            ]
        );
    }

    #[test]
    fn players_can_be_given_in_any_order() {
        let players = [Side::Second, Side::First].map(|side| {
            let id = PlayerId(side.index() as u8);
            Player::new(id, PlayerKind::Human, side, Deck::from_cards(Vec::new()))
        });
        let state = GameState::from_parts(players, Board::new(), NullRenderer);
        assert_eq!(state.player(Side::First).id, FIRST);
        assert_eq!(state.player(Side::Second).id, SECOND);
        assert!(state.is_player_turn(FIRST));
    }

    #[test]
    #[should_panic(expected = "same side")]
    fn players_on_the_same_side_panic() {
        let players = [0, 1].map(|id| {
            Player::new(PlayerId(id), PlayerKind::Human, Side::First, Deck::from_cards(Vec::new()))
        });
        GameState::from_parts(players, Board::new(), NullRenderer);
    }

    #[test]
    fn draw_card_moves_top_of_deck_into_hand() {
        let players = [Side::First, Side::Second].map(|side| {
            let cards = vec![card(PieceKind::Rook, side), card(PieceKind::Knight, side)];
            let id = PlayerId(side.index() as u8);
            let mut player = Player::new(id, PlayerKind::Human, side, Deck::from_cards(cards));
            player.draw_initial_hand(1);
            player
        });
        let mut state = GameState::from_parts(players, Board::new(), NullRenderer);

        // Drawing is allowed out of turn and does not switch it
        assert_eq!(
            state.draw_card(SECOND),
            Ok(DrawOutcome::Drawn(card(PieceKind::Rook, Side::Second)))
        );
        let second = state.player(Side::Second);
        assert_eq!(second.hand().len(), 2);
        assert!(second.deck().is_empty());
        assert_eq!(state.active_side(), Side::First);
        assert_eq!(state.draw_card(SECOND), Ok(DrawOutcome::DeckExhausted));
        assert_eq!(state.player(Side::First).hand().len(), 1);
    }

    #[test]
    fn draw_card_rejects_unknown_player() {
        let mut state = game_with_hands(&[PieceKind::Pawn]);
        assert_eq!(
            state.draw_card(PlayerId(9)),
            Err(IllegalMove::UnknownPlayer { player: PlayerId(9) })
        );
    }

    #[test]
    fn new_game_fails_without_card_art() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let mut rng = StdRng::seed_from_u64(1);
        let renderer = crate::AssetCatalog::new(&missing, NullRenderer);
        let Err(err) = GameState::new(&GameConfig::default(), renderer, &mut rng) else {
            panic!("Game started without card art");
        };
        assert_eq!(err.texture, ARCHETYPES[0].card_for(Side::First).texture);
        assert!(err.path.starts_with(&missing));
    }

    #[test]
    fn new_game_loads_card_art() {
        let dir = tempfile::tempdir().unwrap();
        for side in [Side::First, Side::Second] {
            for archetype in ARCHETYPES.iter() {
                let texture = archetype.card_for(side).texture;
                std::fs::write(dir.path().join(format!("{}.png", texture)), b"").unwrap();
            }
        }
        let mut rng = StdRng::seed_from_u64(1);
        let renderer = crate::AssetCatalog::new(dir.path(), CommandLog::new());
        let state = GameState::new(&GameConfig::default(), renderer, &mut rng).unwrap();
        assert_eq!(state.turn(), 1);
    }
}

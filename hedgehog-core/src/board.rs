use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::{
    Action, ActionError, ActionRecord, Cell, CellKind, CellNotFound, Coord, Direction,
    GameSettings, Grid, InvalidConfiguration, PitMode, PlacementError, PlayerId, PlayerTracker,
    START_ZONE_WIDTH, Stage, Token, TokenId, TurnError, generate_board_layout,
};

/// Column that tokens are placed into and that [`PitMode::Origins`] sends them back to.
pub const START_COLUMN: usize = 0;

/// Creates a board with a random layout, validating the parameters first.
pub fn new_board(
    rows: usize,
    player_count: usize,
    token_count: usize,
    win_count: usize,
    pit_mode: PitMode,
) -> Result<Board, InvalidConfiguration> {
    Board::new(GameSettings::new(
        rows,
        player_count,
        token_count,
        win_count,
        pit_mode,
    ))
}

/// The race board together with the turn state machine.
///
/// Every command either succeeds or returns an error without touching the board.
#[derive(Debug, Clone)]
pub struct Board {
    settings: GameSettings,
    grid: Grid<Cell>,
    tracker: PlayerTracker,
    stage: Stage,
    turn_counter: usize,
    current_player: PlayerId,
    current_round: usize,
    forward_row: usize,
    side_moved: bool,
    forward_moved: bool,
    history: Vec<ActionRecord>,
    rng: StdRng,
}

impl Board {
    pub fn new(settings: GameSettings) -> Result<Self, InvalidConfiguration> {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    pub fn with_seed(settings: GameSettings, seed: u64) -> Result<Self, InvalidConfiguration> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(settings: GameSettings, mut rng: StdRng) -> Result<Self, InvalidConfiguration> {
        settings.validate()?;
        let layout = generate_board_layout(settings.rows, &mut rng);
        Self::with_layout(settings, &layout, rng)
    }

    /// Creates a board on a fixed pit layout, where `true` marks a pit.
    /// The layout must have the board's dimensions and keep the start zone
    /// and the finish column free of pits.
    pub fn with_layout(
        settings: GameSettings,
        layout: &Grid<bool>,
        mut rng: StdRng,
    ) -> Result<Self, InvalidConfiguration> {
        settings.validate()?;
        let finish_col = settings.cols() - 1;
        let blocked = (0..START_ZONE_WIDTH)
            .chain([finish_col])
            .any(|col| layout.column(col).any(|&is_pit| is_pit));
        if blocked || layout.rows() != settings.rows || layout.cols() != settings.cols() {
            return Err(InvalidConfiguration::Layout {
                rows: settings.rows,
                cols: settings.cols(),
            });
        }
        let forward_row = rng.gen_range(0..settings.rows);
        let board = Board {
            grid: Self::build_grid(layout, settings.pit_mode),
            tracker: PlayerTracker::new(
                settings.player_count,
                settings.token_count,
                settings.win_count,
            ),
            stage: Stage::Placement,
            turn_counter: 0,
            current_player: 0,
            current_round: 0,
            forward_row,
            side_moved: false,
            forward_moved: false,
            history: Vec::new(),
            settings,
            rng,
        };
        log::info!(
            "New {}x{} board for {} players with {} tokens each ({})",
            board.rows(),
            board.cols(),
            settings.player_count,
            settings.token_count,
            settings.pit_mode
        );
        log::debug!("Initial board:\n{}", board);
        Ok(board)
    }

    fn build_grid(layout: &Grid<bool>, pit_mode: PitMode) -> Grid<Cell> {
        Grid::from_fn(layout.rows(), layout.cols(), |pos| {
            let is_pit = layout.get(pos).copied().unwrap_or(false);
            Cell::new(!is_pit, pit_mode)
        })
    }

    /// Starts over with the same settings on a freshly generated layout.
    pub fn reset(&mut self) {
        let layout = generate_board_layout(self.settings.rows, &mut self.rng);
        self.grid = Self::build_grid(&layout, self.settings.pit_mode);
        self.tracker = PlayerTracker::new(
            self.settings.player_count,
            self.settings.token_count,
            self.settings.win_count,
        );
        self.stage = Stage::Placement;
        self.turn_counter = 0;
        self.current_player = 0;
        self.current_round = 0;
        self.side_moved = false;
        self.forward_moved = false;
        self.history.clear();
        self.forward_row = self.rng.gen_range(0..self.settings.rows);
        log::info!("Game restarted");
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn pit_mode(&self) -> PitMode {
        self.settings.pit_mode
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn turn_counter(&self) -> usize {
        self.turn_counter
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// The row rolled for this turn. Movable tokens in this row must move forward before the turn can end.
    pub fn forward_row(&self) -> usize {
        self.forward_row
    }

    pub fn side_moved(&self) -> bool {
        self.side_moved
    }

    pub fn forward_moved(&self) -> bool {
        self.forward_moved
    }

    pub fn tracker(&self) -> &PlayerTracker {
        &self.tracker
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tracker.token(id)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.tracker.winner()
    }

    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    pub fn cell(&self, pos: Coord) -> Result<&Cell, CellNotFound> {
        self.grid.get(pos)
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.grid.iter()
    }

    pub fn stack_count(&self, pos: Coord) -> Result<usize, CellNotFound> {
        Ok(self.grid.get(pos)?.len())
    }

    pub fn cell_kind(&self, pos: Coord) -> Result<CellKind, CellNotFound> {
        let cell = self.grid.get(pos)?;
        let col = pos.col as usize;
        let kind = if col == self.cols() - 1 {
            CellKind::Finish
        } else if col < START_ZONE_WIDTH {
            CellKind::Start
        } else if !cell.is_enabled() {
            CellKind::Pit(cell.pit_mode())
        } else {
            CellKind::Normal
        };
        Ok(kind)
    }

    /// The token the current player places next, if the game is still in the placement stage.
    pub fn next_token(&self) -> Option<TokenId> {
        if self.stage != Stage::Placement {
            return None;
        }
        let id = TokenId::new(self.current_player, self.current_round);
        self.tracker.token(id).map(Token::id)
    }

    /// Movable tokens in the forward row, of any player.
    pub fn tokens_in_forward_row(&self) -> Vec<TokenId> {
        let row = self.forward_row as i32;
        self.tracker
            .iter_tokens()
            .filter(|t| t.is_movable() && t.location().is_some_and(|pos| pos.row == row))
            .map(Token::id)
            .collect()
    }

    /// Checks whether every cell left of `col` is empty.
    pub fn prev_cols_are_empty(&self, col: usize) -> bool {
        (0..col).all(|c| self.grid.column(c).all(Cell::is_empty))
    }

    pub fn can_place(&self, row: i32) -> Result<(), PlacementError> {
        if self.stage != Stage::Placement {
            return Err(PlacementError::NotAllowed);
        }
        let height = self.grid.get(Coord::new(row, START_COLUMN as i32))?.len();
        if self.grid.column(START_COLUMN).any(|cell| cell.len() < height) {
            return Err(PlacementError::StackTooTall);
        }
        Ok(())
    }

    /// Places the current player's next token at the start of `row` and passes the turn.
    pub fn place(&mut self, row: i32) -> Result<(), PlacementError> {
        self.can_place(row)
            .inspect_err(|err| log::debug!("Rejected placement in row {}: {}", row, err))?;
        let player = self.current_player;
        let token = self.next_token().ok_or(PlacementError::NotAllowed)?;
        let landed = self.stack_token(Coord::new(row, START_COLUMN as i32), token)?;
        self.history.push(ActionRecord::Place {
            player,
            token,
            landed,
        });
        self.advance_turn();
        Ok(())
    }

    pub fn can_move(&self, from: Coord, dir: Direction) -> Result<(), TurnError> {
        self.check_move(from, dir).map(|_| ())
    }

    fn check_move(&self, from: Coord, dir: Direction) -> Result<TokenId, TurnError> {
        if self.stage != Stage::Play {
            return Err(TurnError::NotAllowed);
        }
        if dir.is_sideways() && self.side_moved {
            return Err(TurnError::DuplicateSideMove);
        }
        if dir == Direction::Forward && self.forward_moved {
            return Err(TurnError::DuplicateForwardMove);
        }
        let cell = self.grid.get(from)?;
        self.grid.check(from.offset_dir(dir))?;
        let token = cell.peek()?;
        if !self.tracker.token(token).is_some_and(Token::is_movable) {
            return Err(TurnError::TokenNotMovable(from));
        }
        if dir.is_sideways() && token.player != self.current_player {
            return Err(TurnError::NotYourToken(from));
        }
        if dir == Direction::Forward && from.row != self.forward_row as i32 {
            return Err(TurnError::NotForwardRow(from));
        }
        Ok(token)
    }

    pub fn move_up(&mut self, pos: Coord) -> Result<(), TurnError> {
        self.side_move(pos, Direction::Up)
    }

    pub fn move_down(&mut self, pos: Coord) -> Result<(), TurnError> {
        self.side_move(pos, Direction::Down)
    }

    fn side_move(&mut self, pos: Coord, dir: Direction) -> Result<(), TurnError> {
        let record = self.move_token(pos, dir)?;
        self.side_moved = true;
        self.history.push(record);
        self.check_for_winner();
        Ok(())
    }

    /// Moves the top token at `pos` one column forward and ends the turn.
    /// Any player's token may be moved, as long as it sits in the forward row.
    pub fn move_forward(&mut self, pos: Coord) -> Result<(), TurnError> {
        let record = self.move_token(pos, Direction::Forward)?;
        self.side_moved = true;
        self.forward_moved = true;
        self.history.push(record);
        self.check_for_winner();
        self.advance_turn();
        Ok(())
    }

    /// Gives up this turn's sideways move.
    pub fn skip_side_move(&mut self) -> Result<(), TurnError> {
        if self.stage != Stage::Play {
            return Err(TurnError::NotAllowed);
        }
        if self.forward_moved {
            return Err(TurnError::DuplicateForwardMove);
        }
        if self.side_moved {
            return Err(TurnError::DuplicateSideMove);
        }
        self.side_moved = true;
        self.history.push(ActionRecord::SkipSideMove {
            player: self.current_player,
        });
        Ok(())
    }

    pub fn can_end_turn(&self) -> Result<(), TurnError> {
        if self.stage != Stage::Play {
            return Err(TurnError::NotAllowed);
        }
        if !self.forward_moved && !self.tokens_in_forward_row().is_empty() {
            return Err(TurnError::ForwardMovePending);
        }
        Ok(())
    }

    /// Ends the turn without a forward move, which is only possible
    /// when nothing movable sits in the forward row.
    pub fn end_turn(&mut self) -> Result<(), TurnError> {
        self.can_end_turn()
            .inspect_err(|err| log::debug!("Rejected end of turn: {}", err))?;
        let player = self.current_player;
        self.advance_turn();
        self.history.push(ActionRecord::EndTurn { player });
        Ok(())
    }

    pub fn try_do_action(&mut self, action: Action) -> Result<(), ActionError> {
        match action {
            Action::Place { row } => self.place(row)?,
            Action::MoveUp(pos) => self.move_up(pos)?,
            Action::MoveDown(pos) => self.move_down(pos)?,
            Action::MoveForward(pos) => self.move_forward(pos)?,
            Action::SkipSideMove => self.skip_side_move()?,
            Action::EndTurn => self.end_turn()?,
        }
        Ok(())
    }

    /// Lists every action the current player may take right now.
    pub fn gen_actions(&self) -> Vec<Action> {
        match self.stage {
            Stage::GameOver => Vec::new(),
            Stage::Placement => (0..self.rows() as i32)
                .filter(|&row| self.can_place(row).is_ok())
                .map(|row| Action::Place { row })
                .collect(),
            Stage::Play => {
                let mut actions = Vec::new();
                for token in self.tracker.iter_tokens().filter(|t| t.is_movable()) {
                    let Some(pos) = token.location() else {
                        continue;
                    };
                    for dir in Direction::ALL {
                        if self.can_move(pos, dir).is_ok() {
                            actions.push(Action::moving(pos, dir));
                        }
                    }
                }
                if !self.side_moved && !self.forward_moved {
                    actions.push(Action::SkipSideMove);
                }
                if self.can_end_turn().is_ok() {
                    actions.push(Action::EndTurn);
                }
                actions
            }
        }
    }

    fn move_token(&mut self, from: Coord, dir: Direction) -> Result<ActionRecord, TurnError> {
        let token = self
            .check_move(from, dir)
            .inspect_err(|err| log::debug!("Rejected {:?} move from {}: {}", dir, from, err))?;
        let player = self.current_player;
        self.grid.get_mut(from)?.pop()?;
        let landed = self.stack_token(from.offset_dir(dir), token)?;
        if let Some(top) = self.grid.get(from)?.top() {
            self.update_token(top, Token::release);
        }
        Ok(ActionRecord::Move {
            player,
            token,
            from,
            dir,
            landed,
        })
    }

    /// Puts `token` onto the cell at `pos`, applying the pit rules.
    /// Returns the coordinate the token ends up on, which differs from `pos`
    /// when a pit sends it elsewhere.
    fn stack_token(&mut self, pos: Coord, token: TokenId) -> Result<Coord, CellNotFound> {
        self.grid.check(pos)?;
        let col = pos.col as usize;
        let pit_mode = self.settings.pit_mode;

        if pit_mode == PitMode::Pits && self.prev_cols_are_empty(col) {
            self.release_column(col);
        }

        let (enabled, buried) = {
            let cell = self.grid.get(pos)?;
            (cell.is_enabled(), cell.top())
        };
        if let Some(buried) = buried {
            self.update_token(buried, Token::block);
        }

        if !enabled {
            match pit_mode {
                PitMode::WormHoles => {
                    let exit = self.worm_hole_exit(pos);
                    log::debug!("Token {:?} entered worm hole {} and left at {}", token, pos, exit);
                    return self.stack_token(exit, token);
                }
                PitMode::Origins => {
                    let origin = Coord::new(pos.row, START_COLUMN as i32);
                    log::debug!("Token {:?} fell into {} and returns to {}", token, pos, origin);
                    return self.stack_token(origin, token);
                }
                PitMode::Pits | PitMode::BlackHoles => {}
            }
        }

        self.push_token(pos, token)?;
        if enabled {
            self.update_token(token, Token::release);
        } else {
            self.update_token(token, Token::block);
            if pit_mode == PitMode::BlackHoles {
                self.update_token(token, Token::set_unwinnable);
                log::info!("Token {:?} is lost in the black hole at {}", token, pos);
            }
        }

        if col == self.cols() - 1 {
            if let Some(top) = self.grid.get(pos)?.top() {
                self.update_token(top, Token::set_finished);
            }
        }
        Ok(pos)
    }

    fn push_token(&mut self, pos: Coord, token: TokenId) -> Result<(), CellNotFound> {
        self.grid.get_mut(pos)?.push(token);
        self.update_token(token, |t| t.set_location(pos));
        Ok(())
    }

    fn update_token(&mut self, id: TokenId, f: impl FnOnce(&mut Token)) {
        if let Some(token) = self.tracker.token_mut(id) {
            f(token);
        }
    }

    /// Re-enables every cell of `col` and lets the tokens on top move again.
    fn release_column(&mut self, col: usize) {
        let mut released = Vec::new();
        for row in 0..self.rows() {
            if let Ok(cell) = self.grid.get_mut(Coord::new(row as i32, col as i32)) {
                if !cell.is_enabled() {
                    log::debug!("Pit at ({}, {}) opens up", row, col);
                    cell.set_enabled(true);
                }
                released.extend(cell.top());
            }
        }
        for token in released {
            self.update_token(token, Token::release);
        }
    }

    /// Picks a random enabled cell outside the finish column.
    fn worm_hole_exit(&mut self, pit: Coord) -> Coord {
        let finish_col = self.cols() as i32 - 1;
        let exits: Vec<Coord> = self
            .grid
            .iter()
            .filter(|(pos, cell)| cell.is_enabled() && pos.col < finish_col)
            .map(|(pos, _)| pos)
            .collect();
        exits
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Coord::new(pit.row, START_COLUMN as i32))
    }

    /// Ends the turn, unless a movable token in the forward row still has to move during play.
    /// Returns whether the turn ended.
    fn advance_turn(&mut self) -> bool {
        match self.stage {
            Stage::GameOver => return false,
            Stage::Play if !self.forward_moved && !self.tokens_in_forward_row().is_empty() => {
                return false;
            }
            _ => {}
        }
        let player_count = self.settings.player_count;
        self.turn_counter += 1;
        self.current_player = self.turn_counter % player_count;
        self.current_round = self.turn_counter / player_count;
        self.side_moved = false;
        self.forward_moved = false;
        self.forward_row = self.rng.gen_range(0..self.settings.rows);

        if self.stage == Stage::Placement && self.current_round >= self.settings.token_count {
            self.stage = Stage::Play;
            log::info!("All tokens placed, the race begins");
        }
        log::debug!(
            "Turn {}: player {}, round {}, forward row {}\n{}",
            self.turn_counter,
            self.current_player,
            self.current_round,
            self.forward_row,
            self
        );
        self.check_for_winner();
        true
    }

    fn check_for_winner(&mut self) {
        if self.stage != Stage::Play || !self.tracker.has_winner() {
            return;
        }
        self.stage = Stage::GameOver;
        if let Some(winner) = self.tracker.winner() {
            log::info!("Player {} wins after {} turns", winner, self.turn_counter);
        }
    }

    fn cell_label(&self, cell: &Cell) -> String {
        match cell.top().and_then(|id| self.tracker.token(id)) {
            Some(token) => format!("{:<2}", token.label()),
            None if !cell.is_enabled() => "XX".to_string(),
            None => "..".to_string(),
        }
    }

    /// Renders one line per row, marking the forward row with `>`.
    pub fn to_text(&self) -> String {
        (0..self.rows())
            .map(|row| {
                let marker = if row == self.forward_row { '>' } else { ' ' };
                let cells: Vec<String> = self
                    .grid
                    .row(row)
                    .iter()
                    .map(|cell| self.cell_label(cell))
                    .collect();
                format!("{}{}", marker, cells.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

use hedgehog_core::{Action, Board, GameSettings, PlayerId, Stage};

use crate::{SessionResult, Storage};

/// Something a front end should react to after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameEvent {
    TurnStarted {
        player: PlayerId,
        round: usize,
        forward_row: usize,
    },
    StageChanged(Stage),
    /// Reported once, when the player has lost too many tokens to ever win.
    PlayerCannotWin(PlayerId),
    Winner(PlayerId),
}

/// Owns the board of the running game and turns its state changes into [`GameEvent`]s.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    reported_losers: Vec<PlayerId>,
    storage: Option<Storage>,
}

impl GameSession {
    pub fn new(settings: GameSettings) -> SessionResult<Self> {
        Ok(Self::from_board(Board::new(settings)?))
    }

    pub fn with_seed(settings: GameSettings, seed: u64) -> SessionResult<Self> {
        Ok(Self::from_board(Board::with_seed(settings, seed)?))
    }

    pub fn from_board(board: Board) -> Self {
        GameSession {
            board,
            reported_losers: Vec::new(),
            storage: None,
        }
    }

    /// Starts a game with the last used settings. Settings of later games are saved back to `storage`.
    pub fn from_saved(storage: Storage) -> SessionResult<Self> {
        let settings = storage.load_settings_or_default();
        let mut session = Self::new(settings)?;
        session.storage = Some(storage);
        Ok(session)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> &GameSettings {
        self.board.settings()
    }

    /// Replaces the running game. The old game is kept if the settings are invalid.
    pub fn new_game(&mut self, settings: GameSettings) -> SessionResult<Vec<GameEvent>> {
        self.board = Board::new(settings)?;
        self.reported_losers.clear();
        if let Some(storage) = &self.storage {
            if let Err(err) = storage.save_settings(&settings) {
                log::warn!("Failed to save settings: {}", err);
            }
        }
        Ok(self.start_events())
    }

    /// Starts over with the current settings.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        self.board.reset();
        self.reported_losers.clear();
        self.start_events()
    }

    /// Applies a command and reports what changed. Rejected commands leave the game untouched.
    pub fn apply(&mut self, action: Action) -> SessionResult<Vec<GameEvent>> {
        let stage = self.board.stage();
        let turn = self.board.turn_counter();
        self.board.try_do_action(action)?;

        let mut events = Vec::new();
        for loser in self.board.tracker().losers() {
            if !self.reported_losers.contains(&loser) {
                self.reported_losers.push(loser);
                events.push(GameEvent::PlayerCannotWin(loser));
            }
        }
        if self.board.stage() != stage {
            events.push(GameEvent::StageChanged(self.board.stage()));
        }
        if self.board.stage() == Stage::GameOver {
            if stage != Stage::GameOver {
                events.extend(self.board.winner().map(GameEvent::Winner));
            }
        } else if self.board.turn_counter() != turn {
            events.push(self.turn_started());
        }
        log::debug!("{:?} -> {:?}", action, events);
        Ok(events)
    }

    fn start_events(&self) -> Vec<GameEvent> {
        vec![GameEvent::StageChanged(self.board.stage()), self.turn_started()]
    }

    fn turn_started(&self) -> GameEvent {
        GameEvent::TurnStarted {
            player: self.board.current_player(),
            round: self.board.current_round(),
            forward_row: self.board.forward_row(),
        }
    }
}

mod action;
mod board;
mod cell;
mod coord;
mod layout;
mod settings;
mod stack;
mod token;
mod tracker;

pub use action::*;
pub use board::*;
pub use cell::*;
pub use coord::*;
pub use layout::*;
pub use settings::*;
pub use stack::*;
pub use token::*;
pub use tracker::*;

pub type PlayerId = usize;

/// What happens to a hedgehog that lands on a pit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PitMode {
    /// The hedgehog is stuck until no other hedgehog is behind it.
    #[default]
    Pits,
    /// The hedgehog is stuck for good and can no longer count towards a win.
    BlackHoles,
    /// The hedgehog is sent to a random free cell outside the finish column.
    WormHoles,
    /// The hedgehog is sent back to the start of its row.
    Origins,
}

impl PitMode {
    pub const ALL: [PitMode; 4] = [
        PitMode::Pits,
        PitMode::BlackHoles,
        PitMode::WormHoles,
        PitMode::Origins,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PitMode::Pits => "Pits",
            PitMode::BlackHoles => "Black Holes",
            PitMode::WormHoles => "Worm Holes",
            PitMode::Origins => "Origins",
        }
    }
}

impl std::fmt::Display for PitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    Placement,
    Play,
    GameOver,
}

/// How a cell should be presented, derived from its column and enabled flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Start,
    Normal,
    Pit(PitMode),
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    #[error("stack is empty")]
    EmptyStack,
    #[error("cell is disabled")]
    CellDisabled,
}

impl From<EmptyStack> for CellError {
    fn from(_: EmptyStack) -> Self {
        CellError::EmptyStack
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementError {
    #[error("tokens can only be placed during the placement stage")]
    NotAllowed,
    #[error(transparent)]
    CellNotFound(#[from] CellNotFound),
    #[error("cannot stack higher than the lowest stack in the column")]
    StackTooTall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("tokens can only be moved during play")]
    NotAllowed,
    #[error(transparent)]
    CellNotFound(#[from] CellNotFound),
    #[error(transparent)]
    Cell(#[from] CellError),
    #[error("token at {0} cannot move")]
    TokenNotMovable(Coord),
    #[error("token at {0} belongs to another player")]
    NotYourToken(Coord),
    #[error("token at {0} is not in the forward row")]
    NotForwardRow(Coord),
    #[error("sideways move already performed")]
    DuplicateSideMove,
    #[error("forward move already performed")]
    DuplicateForwardMove,
    #[error("a token in the forward row must be moved first")]
    ForwardMovePending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidConfiguration {
    #[error("board must have between {min} and {max} rows, got {0}", min = MIN_ROWS, max = MAX_ROWS)]
    Rows(usize),
    #[error("game needs between {min} and {max} players, got {0}", min = MIN_PLAYERS, max = MAX_PLAYERS)]
    Players(usize),
    #[error(
        "each player needs between {min} and {max} tokens, got {0}",
        min = MIN_TOKENS,
        max = MAX_TOKENS
    )]
    Tokens(usize),
    #[error("win count must be between 1 and {token_count}, got {win_count}")]
    WinCount { win_count: usize, token_count: usize },
    #[error("pit layout must be {rows}x{cols} with no pits in the start zone or finish column")]
    Layout { rows: usize, cols: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("invalid placement: {0}")]
    Place(#[from] PlacementError),
    #[error("invalid move: {0}")]
    Turn(#[from] TurnError),
}

use crate::{Coord, Direction, PlayerId, TokenId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Places the current player's next token in the start column.
    Place { row: i32 },
    MoveUp(Coord),
    MoveDown(Coord),
    MoveForward(Coord),
    SkipSideMove,
    EndTurn,
}

impl Action {
    pub fn moving(pos: Coord, dir: Direction) -> Self {
        match dir {
            Direction::Up => Action::MoveUp(pos),
            Direction::Down => Action::MoveDown(pos),
            Direction::Forward => Action::MoveForward(pos),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionRecord {
    Place {
        player: PlayerId,
        token: TokenId,
        /// Where the token ended up after any redirect.
        landed: Coord,
    },
    Move {
        player: PlayerId,
        token: TokenId,
        from: Coord,
        dir: Direction,
        landed: Coord,
    },
    SkipSideMove {
        player: PlayerId,
    },
    EndTurn {
        player: PlayerId,
    },
}

impl ActionRecord {
    /// The player whose turn it was when the action was taken.
    pub fn player(&self) -> PlayerId {
        match self {
            ActionRecord::Place { player, .. }
            | ActionRecord::Move { player, .. }
            | ActionRecord::SkipSideMove { player }
            | ActionRecord::EndTurn { player } => *player,
        }
    }

    pub fn to_action(&self) -> Action {
        match self {
            ActionRecord::Place { landed, .. } => Action::Place { row: landed.row },
            ActionRecord::Move { from, dir, .. } => Action::moving(*from, *dir),
            ActionRecord::SkipSideMove { .. } => Action::SkipSideMove,
            ActionRecord::EndTurn { .. } => Action::EndTurn,
        }
    }
}

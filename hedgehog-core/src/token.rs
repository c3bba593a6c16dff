use crate::{Coord, PlayerId};

/// Identifies a hedgehog by its owner and its slot within the owner's set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenId {
    pub player: PlayerId,
    pub slot: usize,
}

impl TokenId {
    pub fn new(player: PlayerId, slot: usize) -> Self {
        TokenId { player, slot }
    }
}

/// A hedgehog and its movement state.
/// `finished` only ever goes from false to true, `winnable` only from true to false.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    id: TokenId,
    location: Option<Coord>,
    movable: bool,
    finished: bool,
    winnable: bool,
}

impl Token {
    /// Creates an unplaced token.
    pub fn new(id: TokenId) -> Self {
        Token {
            id,
            location: None,
            movable: false,
            finished: false,
            winnable: true,
        }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn owner(&self) -> PlayerId {
        self.id.player
    }

    pub fn location(&self) -> Option<Coord> {
        self.location
    }

    pub fn is_placed(&self) -> bool {
        self.location.is_some()
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_winnable(&self) -> bool {
        self.winnable
    }

    pub(crate) fn set_location(&mut self, pos: Coord) {
        self.location = Some(pos);
    }

    /// Marks the token as buried or trapped.
    pub(crate) fn block(&mut self) {
        self.movable = false;
    }

    /// Lets the token move again. Finished tokens stay put.
    pub(crate) fn release(&mut self) {
        if !self.finished {
            self.movable = true;
        }
    }

    pub(crate) fn set_finished(&mut self) {
        self.finished = true;
        self.movable = false;
    }

    pub(crate) fn set_unwinnable(&mut self) {
        self.winnable = false;
    }

    /// Short label used by the text board: the owner id, followed by `F` when finished
    /// or `D` when the token cannot currently move.
    pub fn label(&self) -> String {
        if self.finished {
            format!("{}F", self.owner())
        } else if self.movable {
            format!("{}", self.owner())
        } else {
            format!("{}D", self.owner())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_is_unplaced() {
        let token = Token::new(TokenId::new(3, 1));
        assert_eq!(token.owner(), 3);
        assert_eq!(token.location(), None);
        assert!(!token.is_placed());
        assert!(!token.is_movable());
        assert!(!token.is_finished());
        assert!(token.is_winnable());
    }

    #[test]
    fn test_finished_token_cannot_be_released() {
        let mut token = Token::new(TokenId::new(0, 0));
        token.release();
        assert!(token.is_movable());
        token.set_finished();
        assert!(!token.is_movable());
        token.release();
        assert!(!token.is_movable());
        assert!(token.is_finished());
    }

    #[test]
    fn test_labels() {
        let mut token = Token::new(TokenId::new(2, 0));
        assert_eq!(token.label(), "2D");
        token.release();
        assert_eq!(token.label(), "2");
        token.set_finished();
        assert_eq!(token.label(), "2F");
    }
}

use crate::{BoundedStack, CellError, PitMode, TokenId};

/// A single square of the race board.
/// Holds a stack of hedgehogs, of which only the top one can ever leave.
/// Disabled cells are obstacles: their contents stay visible but cannot be popped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    stack: BoundedStack<TokenId>,
    enabled: bool,
    pit_mode: PitMode,
}

impl Cell {
    pub fn new(enabled: bool, pit_mode: PitMode) -> Self {
        Cell {
            stack: BoundedStack::new(),
            enabled,
            pit_mode,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn pit_mode(&self) -> PitMode {
        self.pit_mode
    }

    pub fn push(&mut self, token: TokenId) {
        self.stack.push(token);
    }

    pub fn pop(&mut self) -> Result<TokenId, CellError> {
        if !self.enabled {
            return Err(CellError::CellDisabled);
        }
        Ok(self.stack.pop()?)
    }

    pub fn peek(&self) -> Result<TokenId, CellError> {
        Ok(*self.stack.peek()?)
    }

    pub fn peek_below_top(&self) -> Result<TokenId, CellError> {
        Ok(*self.stack.peek_below_top()?)
    }

    pub fn top(&self) -> Option<TokenId> {
        self.stack.peek().ok().copied()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Iterates over the stacked tokens from bottom to top.
    pub fn tokens(&self) -> impl DoubleEndedIterator<Item = TokenId> {
        self.stack.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_round_trip() {
        let mut cell = Cell::new(true, PitMode::Pits);
        let token = TokenId::new(1, 2);
        cell.push(TokenId::new(0, 0));
        let before = cell.len();
        cell.push(token);
        assert_eq!(cell.pop(), Ok(token));
        assert_eq!(cell.len(), before);
    }

    #[test]
    fn test_disabled_cell_is_look_but_dont_pop() {
        let mut cell = Cell::new(false, PitMode::BlackHoles);
        let token = TokenId::new(0, 1);
        cell.push(token);
        assert_eq!(cell.peek(), Ok(token));
        assert_eq!(cell.pop(), Err(CellError::CellDisabled));
        assert_eq!(cell.len(), 1);

        cell.set_enabled(true);
        assert_eq!(cell.pop(), Ok(token));
    }

    #[test]
    fn test_empty_cell_errors() {
        let mut cell = Cell::new(true, PitMode::WormHoles);
        assert_eq!(cell.pop(), Err(CellError::EmptyStack));
        assert_eq!(cell.peek(), Err(CellError::EmptyStack));
        assert_eq!(cell.peek_below_top(), Err(CellError::EmptyStack));
        assert_eq!(cell.top(), None);
    }

    #[test]
    fn test_peek_below_top() {
        let mut cell = Cell::new(true, PitMode::Origins);
        cell.push(TokenId::new(0, 0));
        assert_eq!(cell.peek_below_top(), Err(CellError::EmptyStack));
        cell.push(TokenId::new(1, 0));
        assert_eq!(cell.peek_below_top(), Ok(TokenId::new(0, 0)));
        assert_eq!(
            cell.tokens().collect::<Vec<_>>(),
            vec![TokenId::new(0, 0), TokenId::new(1, 0)]
        );
    }
}

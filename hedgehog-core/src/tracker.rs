use crate::{PlayerId, Token, TokenId};

/// Owns every hedgehog of a game, grouped by player, and decides when somebody has won.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerTracker {
    tokens: Vec<Vec<Token>>,
    win_count: usize,
    winner: Option<PlayerId>,
}

impl PlayerTracker {
    pub fn new(player_count: usize, token_count: usize, win_count: usize) -> Self {
        let tokens = (0..player_count)
            .map(|player| {
                (0..token_count)
                    .map(|slot| Token::new(TokenId::new(player, slot)))
                    .collect()
            })
            .collect();
        PlayerTracker {
            tokens,
            win_count,
            winner: None,
        }
    }

    pub fn player_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.first().map_or(0, Vec::len)
    }

    pub fn win_count(&self) -> usize {
        self.win_count
    }

    /// Returns the tokens of the given player, or an empty slice for unknown players.
    pub fn tokens_for(&self, player: PlayerId) -> &[Token] {
        self.tokens.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.player).and_then(|t| t.get(id.slot))
    }

    pub(crate) fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.get_mut(id.player).and_then(|t| t.get_mut(id.slot))
    }

    pub fn iter_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().flatten()
    }

    pub fn finished_count(&self, player: PlayerId) -> usize {
        self.tokens_for(player)
            .iter()
            .filter(|t| t.is_finished())
            .count()
    }

    pub fn winnable_count(&self, player: PlayerId) -> usize {
        self.tokens_for(player)
            .iter()
            .filter(|t| t.is_winnable())
            .count()
    }

    /// Players that still own at least `win_count` winnable tokens.
    pub fn players_that_can_win(&self) -> Vec<PlayerId> {
        (0..self.player_count())
            .filter(|&p| self.winnable_count(p) >= self.win_count)
            .collect()
    }

    /// Players that lost too many tokens to black holes to ever win.
    pub fn losers(&self) -> Vec<PlayerId> {
        (0..self.player_count())
            .filter(|&p| self.winnable_count(p) < self.win_count)
            .collect()
    }

    /// Determines the winner without recording it.
    /// A player wins when they are the only one left who can still win,
    /// or when they have finished `win_count` tokens.
    /// Simultaneous finishers are resolved in favour of the lowest player id.
    pub fn find_winner(&self) -> Option<PlayerId> {
        if let [last_standing] = self.players_that_can_win().as_slice() {
            return Some(*last_standing);
        }
        (0..self.player_count()).find(|&p| self.finished_count(p) >= self.win_count)
    }

    /// Checks for a winner and records it.
    /// Once recorded, the winner never changes.
    pub fn has_winner(&mut self) -> bool {
        if self.winner.is_none() {
            self.winner = self.find_winner();
        }
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }
}

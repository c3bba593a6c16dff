use crate::{EXTRA_COLUMNS, InvalidConfiguration, PitMode};

pub const MIN_ROWS: usize = 4;
pub const MAX_ROWS: usize = 12;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
pub const MIN_TOKENS: usize = 2;
pub const MAX_TOKENS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSettings {
    pub rows: usize,
    pub player_count: usize,
    pub token_count: usize,
    pub win_count: usize,
    pub pit_mode: PitMode,
}

impl GameSettings {
    pub fn new(
        rows: usize,
        player_count: usize,
        token_count: usize,
        win_count: usize,
        pit_mode: PitMode,
    ) -> Self {
        GameSettings {
            rows,
            player_count,
            token_count,
            win_count,
            pit_mode,
        }
    }

    /// Number of columns of a board with these settings: the pit area plus start zone and finish line.
    pub fn cols(&self) -> usize {
        self.rows + EXTRA_COLUMNS
    }

    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        if !(MIN_ROWS..=MAX_ROWS).contains(&self.rows) {
            return Err(InvalidConfiguration::Rows(self.rows));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(InvalidConfiguration::Players(self.player_count));
        }
        if !(MIN_TOKENS..=MAX_TOKENS).contains(&self.token_count) {
            return Err(InvalidConfiguration::Tokens(self.token_count));
        }
        if self.win_count < 1 || self.win_count > self.token_count {
            return Err(InvalidConfiguration::WinCount {
                win_count: self.win_count,
                token_count: self.token_count,
            });
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings::new(6, 2, 4, 3, PitMode::Pits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let settings = GameSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.cols(), 9);
    }

    #[test]
    fn test_validate_ranges() {
        let cases = [
            (GameSettings::new(3, 2, 4, 3, PitMode::Pits), Err(InvalidConfiguration::Rows(3))),
            (GameSettings::new(13, 2, 4, 3, PitMode::Pits), Err(InvalidConfiguration::Rows(13))),
            (GameSettings::new(12, 1, 4, 3, PitMode::Pits), Err(InvalidConfiguration::Players(1))),
            (GameSettings::new(4, 7, 4, 3, PitMode::Pits), Err(InvalidConfiguration::Players(7))),
            (GameSettings::new(4, 6, 1, 1, PitMode::Pits), Err(InvalidConfiguration::Tokens(1))),
            (GameSettings::new(4, 6, 9, 3, PitMode::Pits), Err(InvalidConfiguration::Tokens(9))),
            (
                GameSettings::new(4, 2, 4, 0, PitMode::Pits),
                Err(InvalidConfiguration::WinCount { win_count: 0, token_count: 4 }),
            ),
            (
                GameSettings::new(4, 2, 4, 5, PitMode::Pits),
                Err(InvalidConfiguration::WinCount { win_count: 5, token_count: 4 }),
            ),
            (GameSettings::new(4, 2, 2, 2, PitMode::Origins), Ok(())),
            (GameSettings::new(12, 6, 8, 1, PitMode::WormHoles), Ok(())),
        ];
        for (settings, expected) in cases {
            assert_eq!(settings.validate(), expected, "{:?}", settings);
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            InvalidConfiguration::Rows(3).to_string(),
            "board must have between 4 and 12 rows, got 3"
        );
        assert_eq!(
            InvalidConfiguration::WinCount { win_count: 5, token_count: 4 }.to_string(),
            "win count must be between 1 and 4, got 5"
        );
    }
}

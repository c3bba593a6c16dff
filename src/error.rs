use hedgehog_core::{ActionError, InvalidConfiguration};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no data directory available on this platform")]
    NoDataDir,
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed stored data: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
#[error("failed to initialise logger: {0}")]
pub struct LoggerError(#[from] pub flexi_logger::FlexiLoggerError);

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid game settings: {0}")]
    Config(#[from] InvalidConfiguration),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use hedgehog_core::{PlacementError, TurnError};

    #[test]
    fn test_error_messages() {
        let cases = [
            (
                SessionError::from(InvalidConfiguration::Players(7)),
                "invalid game settings: game needs between 2 and 6 players, got 7",
            ),
            (
                SessionError::from(ActionError::from(PlacementError::StackTooTall)),
                "invalid placement: cannot stack higher than the lowest stack in the column",
            ),
            (
                SessionError::from(ActionError::from(TurnError::DuplicateSideMove)),
                "invalid move: sideways move already performed",
            ),
            (
                SessionError::from(StorageError::NoDataDir),
                "no data directory available on this platform",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }
}
